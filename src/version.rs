//! Application version resolution.
//!
//! The version reported in metric labels comes from the crate version baked
//! in at build time. Deploys from a pre-release build advertise the stable
//! version they were cut from, so a pre-release suffix is stripped and the
//! patch component decremented by one (floored at zero).

/// Version string reported when no usable version can be resolved.
pub const FALLBACK_VERSION: &str = "dev";

/// Resolve the app version from the compile-time crate version.
pub fn app_version() -> String {
    resolve(option_env!("CARGO_PKG_VERSION"))
}

/// Apply the pre-release downgrade rule to a raw version string.
///
/// - `None` resolves to `"dev"`.
/// - A version without a pre-release suffix passes through unchanged.
/// - `MAJOR.MINOR.PATCH-<suffix>` resolves to `MAJOR.MINOR.(PATCH-1)`,
///   with the patch floored at 0.
/// - A pre-release whose base is not `MAJOR.MINOR.PATCH` resolves to `"dev"`.
pub fn resolve(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return FALLBACK_VERSION.to_string();
    };

    let Some((base, _suffix)) = raw.split_once('-') else {
        return raw.to_string();
    };

    match parse_base(base) {
        Some((major, minor, patch)) => {
            format!("{}.{}.{}", major, minor, patch.saturating_sub(1))
        }
        None => FALLBACK_VERSION.to_string(),
    }
}

fn parse_base(base: &str) -> Option<(u64, u64, u64)> {
    let mut parts = base.splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    Some((major, minor, patch))
}

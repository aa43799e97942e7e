//! Team-member profile click-through tracking

use axum::extract::{Path, State};
use axum::response::Redirect;

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::members;

/// Count a profile click and redirect to the member's profile.
///
/// Unknown names answer 404 without touching the counter, which keeps the
/// click metric's cardinality bounded by the compiled-in directory.
pub async fn handler(
    State(state): State<AppState>,
    Path(member_name): Path<String>,
) -> AppResult<Redirect> {
    let Some(url) = members::profile_url(&member_name) else {
        return Err(AppError::UnknownMember(member_name));
    };

    state
        .metrics()
        .record_member_click(&member_name, state.app_version())?;

    tracing::debug!(member = %member_name, "Profile click recorded");
    Ok(Redirect::to(url))
}

//! Static team directory behind the profile click-through links.
//!
//! The directory is compiled in: `/click/{member_name}` only redirects for
//! names listed here, which also bounds the cardinality of the member click
//! counter.

/// A team member and their public profile.
#[derive(Debug, Clone, Copy)]
pub struct TeamMember {
    pub name: &'static str,
    pub profile_url: &'static str,
}

/// Everyone listed on the index page.
pub const TEAM: &[TeamMember] = &[
    TeamMember {
        name: "mira",
        profile_url: "https://github.com/mira",
    },
    TeamMember {
        name: "jonas",
        profile_url: "https://github.com/jonas",
    },
    TeamMember {
        name: "priya",
        profile_url: "https://github.com/priya",
    },
    TeamMember {
        name: "tomas",
        profile_url: "https://github.com/tomas",
    },
];

/// Profile URL for a member, or `None` for names not in the directory.
///
/// Lookup is exact-match: case and whitespace differences miss.
pub fn profile_url(name: &str) -> Option<&'static str> {
    TEAM.iter()
        .find(|member| member.name == name)
        .map(|member| member.profile_url)
}

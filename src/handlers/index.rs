//! Landing page with the review submission form

use axum::response::Html;

use crate::views;

/// Serve the review submission form and the team directory links.
pub async fn handler() -> Html<String> {
    Html(views::index_page())
}

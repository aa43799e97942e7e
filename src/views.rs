//! Inline HTML views for the browser-facing pages.
//!
//! Each page is a `format!` over a static shell; all user-supplied text
//! goes through [`escape_html`] before interpolation.

use axum::http::StatusCode;

use crate::feedback::Sentiment;
use crate::members;

/// Message rendered in place of a prediction when the model service cannot
/// be reached.
pub const DEGRADED_MESSAGE: &str = "Error contacting model service";

/// Escape text for safe interpolation into HTML bodies and attributes.
///
/// Escaped characters are all single-byte, so the input is copied over in
/// runs between them.
pub fn escape_html(input: &str) -> String {
    fn entity(byte: u8) -> Option<&'static str> {
        match byte {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        }
    }

    let mut escaped = String::with_capacity(input.len());
    let mut run_start = 0;
    for (i, byte) in input.bytes().enumerate() {
        if let Some(replacement) = entity(byte) {
            escaped.push_str(&input[run_start..i]);
            escaped.push_str(replacement);
            run_start = i + 1;
        }
    }
    escaped.push_str(&input[run_start..]);
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// Landing page: the review form plus the team directory links.
pub fn index_page() -> String {
    let mut links = String::new();
    for member in members::TEAM {
        links.push_str(&format!(
            "<li><a href=\"/click/{name}\">{name}</a></li>\n",
            name = member.name
        ));
    }

    page(
        "Reviewlens",
        &format!(
            "<h1>Restaurant Review Sentiment</h1>\n\
             <form action=\"/predict\" method=\"post\">\n\
             <textarea name=\"review\" rows=\"6\" cols=\"60\" placeholder=\"How was your meal?\"></textarea><br>\n\
             <button type=\"submit\">Predict sentiment</button>\n\
             </form>\n\
             <h2>Team</h2>\n\
             <ul>\n{links}</ul>"
        ),
    )
}

/// Prediction result page.
///
/// With a sentiment, the page embeds the feedback form carrying the review
/// and the predicted value; with `None` (model unavailable) it shows the
/// degraded message and no feedback form.
pub fn result_page(review: &str, prediction: Option<Sentiment>) -> String {
    let review_escaped = escape_html(review);

    let body = match prediction {
        Some(sentiment) => format!(
            "<h1>Prediction</h1>\n\
             <p>Review: {review_escaped}</p>\n\
             <p>Predicted sentiment: <strong>{label}</strong></p>\n\
             <h2>Was this prediction correct?</h2>\n\
             <form action=\"/feedback\" method=\"post\">\n\
             <input type=\"hidden\" name=\"review\" value=\"{review_escaped}\">\n\
             <input type=\"hidden\" name=\"predicted_sentiment\" value=\"{value}\">\n\
             <button type=\"submit\" name=\"feedback\" value=\"correct\">Correct</button>\n\
             <button type=\"submit\" name=\"feedback\" value=\"incorrect\">Incorrect</button>\n\
             </form>",
            label = sentiment.label(),
            value = sentiment.as_u8(),
        ),
        None => format!(
            "<h1>Prediction</h1>\n\
             <p>Review: {review_escaped}</p>\n\
             <p>{DEGRADED_MESSAGE}</p>\n\
             <p><a href=\"/\">Try again</a></p>"
        ),
    };

    page("Prediction", &body)
}

/// Acknowledgement page after feedback is forwarded.
pub fn thanks_page() -> String {
    page(
        "Thank you",
        "<h1>Thanks for your feedback!</h1>\n<p><a href=\"/\">Submit another review</a></p>",
    )
}

/// Error page used by `AppError::into_response`.
pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        &status.to_string(),
        &format!(
            "<h1>{status}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back</a></p>",
            message = escape_html(message),
        ),
    )
}

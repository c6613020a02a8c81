//! Check-in page handler.

use axum::response::Html;

/// Serves the check-in form as a single self-contained HTML document.
///
/// Event metadata arrives through query parameters and is read once by
/// the inline script; the server renders nothing dynamically.
pub async fn checkin_page() -> Html<&'static str> {
    Html(include_str!("../../assets/checkin.html"))
}

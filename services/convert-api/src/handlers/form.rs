//! Upload form served at the root path.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Drag-and-drop upload form
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::http::StatusCode;
use rand::RngCore;

use crate::models::AppState;
use crate::templates::BaseTemplate;

pub fn random_console_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex::encode(b)
}

#[derive(Default)]
pub struct TemplateGlobals {
    pub backend_hostname: String,
    pub active_page: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}

/// Collect the shared page fields, draining the console's pending flash messages.
pub fn build_template_globals(state: &AppState, console_id: &str, active_page: &str) -> TemplateGlobals {
    let flash_messages = state.with_console(console_id, |s| std::mem::take(&mut s.flash_messages));
    let has_flash_messages = !flash_messages.is_empty();
    TemplateGlobals {
        backend_hostname: crate::utils::hostname_from_url(&state.api_base_url),
        active_page: active_page.to_string(),
        flash_messages,
        has_flash_messages,
    }
}

pub fn push_flash(state: &AppState, console_id: &str, message: impl Into<String>) {
    let message = message.into();
    state.with_console(console_id, |s| s.flash_messages.push(message));
}

pub fn redirect_with_flash(state: &AppState, console_id: &str, to: &str, message: impl Into<String>) -> Response {
    push_flash(state, console_id, message);
    Redirect::to(to).into_response()
}

pub fn inject_context<T: BaseTemplate>(t: &T, html: String) -> Response {
    // Expose the page context to scripts on the page.
    let context = serde_json::json!({
        "backendHostname": t.backend_hostname(),
        "activePage": t.active_page(),
    });
    let inject = format!(r#"<script>window.__CONSOLE_CONTEXT__ = {};</script></body>"#, context);
    Html(html.replace("</body>", &inject)).into_response()
}

pub fn render_template<T: askama::Template + BaseTemplate>(t: T) -> Response {
    match t.render() {
        Ok(body) => inject_context(&t, body),
        Err(e) => {
            tracing::error!(%e, page = t.active_page(), "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::helpers::random_console_id;

pub const CONSOLE_COOKIE: &str = "console_id";

/// Identifies the browser whose view state a request reads and mutates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleId(pub String);

/// Attach a [`ConsoleId`] to every request, issuing a cookie on first visit.
pub async fn console_middleware(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let existing = jar
        .get(CONSOLE_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    match existing {
        Some(id) => {
            request.extensions_mut().insert(ConsoleId(id));
            next.run(request).await
        }
        None => {
            let id = random_console_id();
            tracing::debug!(console_id = %id, "Issuing console cookie");
            request.extensions_mut().insert(ConsoleId(id.clone()));
            let response = next.run(request).await;
            let mut cookie = Cookie::new(CONSOLE_COOKIE, id);
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookie.set_max_age(time::Duration::seconds(crate::config::CONSOLE_SESSION_TTL_SECS as i64));
            (jar.add(cookie), response).into_response()
        }
    }
}

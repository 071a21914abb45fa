use axum::{
    extract::State,
    http::{header::{CACHE_CONTROL, CONTENT_TYPE}, HeaderValue},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

async fn root_get() -> impl IntoResponse {
    Redirect::to("/instances")
}

async fn stylesheet_get(State(state): State<AppState>) -> impl IntoResponse {
    let css = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
    ([(CONTENT_TYPE, "text/css")], css)
}

pub fn build_router(state: AppState) -> Router {
    let console_routes = Router::new()
        .route("/", get(root_get))
        .route("/instances", get(handlers::instances::instances_get))
        .route("/instances/refresh", post(handlers::instances::instances_refresh_post))
        .route("/instances/confirm-delete/:provider", get(handlers::instances::confirm_delete_get))
        .route("/instances/delete/:provider", post(handlers::instances::delete_post))
        .route("/create", get(handlers::create::create_get).post(handlers::create::create_post))
        .route("/create/provider", post(handlers::create::provider_post))
        .route_layer(axum::middleware::from_fn(handlers::console_middleware));

    Router::new()
        .route(
            "/static/styles.css",
            get(stylesheet_get).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=3600"),
            )),
        )
        .merge(console_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

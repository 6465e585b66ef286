use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{json_content_type, require_admin, require_authentication};
use crate::state::AppState;

/// Full application router.
///
/// Layer order seen by a request: trace → content-type → authentication →
/// admin check (management routes only) → handler.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(public::health::get))
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user_banner", get(protected::user_banner::get))
        .merge(admin_routes())
        .route_layer(middleware::from_fn_with_state(state, require_authentication))
        .layer(middleware::from_fn(json_content_type))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/banner", get(elevated::banner::list).post(elevated::banner::create))
        .route(
            "/banner/:id",
            patch(elevated::banner::patch).delete(elevated::banner::delete),
        )
        .route_layer(middleware::from_fn(require_admin))
}

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{auth, events, health_check, method_not_allowed, route_not_found};
use crate::middleware::{expose_internal_errors, require_admin};
use crate::state::AppState;

/// Event routes. Reads are public, writes go through the admin gate.
fn event_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(events::create_event))
        .route(
            "/:id",
            put(events::update_event).delete(events::delete_event),
        )
        .route("/:id/dates", patch(events::update_event_dates))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_admin,
        ));

    Router::new()
        .route("/", get(events::list_events))
        .route("/:id", get(events::get_event))
        .merge(protected)
}

/// The `/api` tree without outer middleware.
pub fn api_routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(auth::login))
        .nest("/events", event_routes(&state));

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let production = config.environment.is_production();
    let mut router = api_routes(state);
    if !production {
        router = router.layer(middleware::map_response(expose_internal_errors));
    }

    create_security_headers_layer(router, production)
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

use crate::{
    handlers::{auth, health, users},
    state::AppState,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
///
/// Everything under `/api/users` requires an authenticated principal carrying
/// one of the configured roles; `/health` is open.
pub fn router(state: AppState, cors_allow_any: bool) -> Router {
    let user_routes = Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/users/hello", get(users::hello))
        .route("/api/users/:id", get(users::get_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let router = Router::new()
        .route("/health", get(health::health_check))
        .merge(user_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

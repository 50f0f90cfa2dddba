use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/register", post(handlers::register))
        .route("/api/clicker", get(handlers::clicker))
        .route("/api/clicker/tap", post(handlers::tap))
        .route("/api/session", delete(handlers::clear_session))
        .with_state(state)
}

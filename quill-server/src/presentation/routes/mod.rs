use axum::Router;
use axum::routing::get;

use super::AppState;
use super::handlers::healthz;

pub(crate) mod auth;
pub(crate) mod drafts;
pub(crate) mod generate;
pub(crate) mod posts;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/auth", auth::router())
        .nest("/api/drafts", drafts::router(state.clone()))
        .nest("/api/posts", posts::router(state.clone()))
        .nest("/api/generate", generate::router(state))
}

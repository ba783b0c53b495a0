use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::drafts::{
    delete_draft, export_draft, get_draft, list_drafts, publish_draft, save_draft, update_draft,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_drafts).post(save_draft))
        .route(
            "/{id}",
            get(get_draft).put(update_draft).delete(delete_draft),
        )
        .route("/{id}/publish", post(publish_draft))
        .route("/{id}/export", get(export_draft))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, update_post,
};
use crate::presentation::handlers::ratings::{post_ratings, rate_post};
use crate::presentation::middleware::auth::{jwt_auth_middleware, optional_jwt_auth_middleware};

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/{id}", get(get_post));

    // Сводка видна всем, но с токеном в ней есть оценка зрителя.
    let ratings = Router::new()
        .route("/{id}/ratings", get(post_ratings))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_jwt_auth_middleware,
        ));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/{id}", put(update_post).delete(delete_post))
        .route("/{id}/rating", put(rate_post))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(ratings).merge(protected)
}

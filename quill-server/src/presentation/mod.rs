use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::draft_service::DraftService;
use crate::application::generation_service::GenerationService;
use crate::application::post_service::PostService;
use crate::application::rating_service::RatingService;
use crate::data::repositories::postgres::draft_repository::PostgresDraftRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::rating_repository::PostgresRatingRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::completion_client::OpenAiCompletionClient;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) draft_service: Arc<DraftService<PostgresDraftRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository, PostgresDraftRepository>>,
    pub(crate) rating_service: Arc<RatingService<PostgresRatingRepository>>,
    pub(crate) generation_service: Arc<GenerationService<OpenAiCompletionClient>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        draft_service: Arc<DraftService<PostgresDraftRepository>>,
        post_service: Arc<PostService<PostgresPostRepository, PostgresDraftRepository>>,
        rating_service: Arc<RatingService<PostgresRatingRepository>>,
        generation_service: Arc<GenerationService<OpenAiCompletionClient>>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            draft_service,
            post_service,
            rating_service,
            generation_service,
            jwt,
        }
    }
}

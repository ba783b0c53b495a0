use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::draft_service::DraftService;
use application::generation_service::GenerationService;
use application::post_service::PostService;
use application::rating_service::RatingService;
use data::repositories::postgres::draft_repository::PostgresDraftRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::rating_repository::PostgresRatingRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::completion_client::OpenAiCompletionClient;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings).await?;
    run_migrations(&pool).await?;
    info!("database is ready");

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);

    let completion = &settings.completion;
    let backend = match &completion.api_key {
        Some(api_key) => {
            info!(model = %completion.model, "completion backend enabled");
            Some(OpenAiCompletionClient::new(
                api_key.as_str(),
                completion.base_url.as_str(),
                completion.model.as_str(),
                Duration::from_secs(completion.timeout_secs),
            )?)
        }
        None => {
            info!("completion API key is not set, generation uses fallback content");
            None
        }
    };

    let state = AppState::new(
        Arc::new(AuthService::new(
            PostgresUserRepository::new(pool.clone()),
            jwt.clone(),
        )),
        Arc::new(DraftService::new(PostgresDraftRepository::new(pool.clone()))),
        Arc::new(PostService::new(
            PostgresPostRepository::new(pool.clone()),
            PostgresDraftRepository::new(pool.clone()),
        )),
        Arc::new(RatingService::new(PostgresRatingRepository::new(pool))),
        Arc::new(GenerationService::new(backend)),
        Arc::new(jwt),
    );

    server::run_http(&settings, state).await
}

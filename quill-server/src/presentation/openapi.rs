use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::app_error::ErrorBody;
use crate::presentation::handlers::auth::{AuthResponseDto, LoginDto, RegisterDto, UserDto};
use crate::presentation::handlers::drafts::{DraftBodyDto, DraftDto, DraftListDto, SaveDraftDto};
use crate::presentation::handlers::generate::{GenerateDto, GeneratedArticleDto};
use crate::presentation::handlers::posts::{
    CreatePostDto, PostDto, PostListDto, PublishedPostDto, UpdatePostDto,
};
use crate::presentation::handlers::ratings::{RateDto, RatingDto, RatingSummaryDto};
use crate::presentation::handlers::{HealthzResponse, SuccessDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::healthz,
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::drafts::list_drafts,
        crate::presentation::handlers::drafts::get_draft,
        crate::presentation::handlers::drafts::save_draft,
        crate::presentation::handlers::drafts::update_draft,
        crate::presentation::handlers::drafts::delete_draft,
        crate::presentation::handlers::drafts::publish_draft,
        crate::presentation::handlers::drafts::export_draft,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::ratings::rate_post,
        crate::presentation::handlers::ratings::post_ratings,
        crate::presentation::handlers::generate::generate
    ),
    components(
        schemas(
            HealthzResponse,
            ErrorBody,
            SuccessDto,
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            UserDto,
            DraftBodyDto,
            SaveDraftDto,
            DraftDto,
            DraftListDto,
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            PublishedPostDto,
            PostListDto,
            RateDto,
            RatingDto,
            RatingSummaryDto,
            GenerateDto,
            GeneratedArticleDto
        )
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "drafts", description = "Private drafts of the caller"),
        (name = "posts", description = "Post endpoints"),
        (name = "ratings", description = "Post ratings"),
        (name = "generate", description = "Article generation")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

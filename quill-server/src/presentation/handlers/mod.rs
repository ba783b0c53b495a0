use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod auth;
pub(crate) mod drafts;
pub(crate) mod generate;
pub(crate) mod posts;
pub(crate) mod ratings;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    status: &'static str,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthzResponse))
)]
pub(crate) async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

/// Ответ на удаление черновика или поста.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SuccessDto {
    pub(crate) success: bool,
}

impl SuccessDto {
    pub(crate) fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

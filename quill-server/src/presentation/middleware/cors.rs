use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];
const ALLOWED_HEADERS: [HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

/// `*` в списке источников разрешает любой origin.
pub(crate) fn build_cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| anyhow!("invalid CORS origin: {err}"))?;
        CorsLayer::new().allow_origin(origins)
    };

    Ok(layer
        .allow_methods(ALLOWED_METHODS)
        // имя файла экспорта читается клиентом из этого заголовка
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_headers(ALLOWED_HEADERS))
}

pub(crate) fn apply_cors(router: Router, origins: &[String]) -> Result<Router> {
    Ok(router.layer(build_cors_layer(origins)?))
}

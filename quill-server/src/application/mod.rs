pub(crate) mod auth_service;
pub(crate) mod draft_service;
pub(crate) mod fallback_content;
pub(crate) mod generation_service;
pub(crate) mod post_service;
pub(crate) mod rating_service;

pub(crate) mod draft;
pub(crate) mod error;
pub(crate) mod generation;
pub(crate) mod listing;
pub(crate) mod markdown;
pub(crate) mod post;
pub(crate) mod rating;
pub(crate) mod user;

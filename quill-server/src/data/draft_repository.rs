use async_trait::async_trait;

use crate::domain::draft::{Draft, DraftFields};
use crate::domain::error::DomainError;
use crate::domain::listing::Recency;

/// Все операции, кроме создания, фильтруют по автору: чужой черновик
/// для репозитория неотличим от отсутствующего.
#[async_trait]
pub(crate) trait DraftRepository: Send + Sync {
    async fn create_draft(&self, author_id: i64, fields: DraftFields)
    -> Result<Draft, DomainError>;
    async fn get_draft_owned(&self, id: i64, author_id: i64)
    -> Result<Option<Draft>, DomainError>;
    async fn list_drafts(&self, author_id: i64, order: Recency) -> Result<Vec<Draft>, DomainError>;
    async fn update_draft_owned(
        &self,
        id: i64,
        author_id: i64,
        fields: DraftFields,
    ) -> Result<Option<Draft>, DomainError>;
    async fn delete_draft_owned(&self, id: i64, author_id: i64) -> Result<bool, DomainError>;
}

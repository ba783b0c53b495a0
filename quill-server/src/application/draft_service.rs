use crate::data::draft_repository::DraftRepository;
use crate::domain::draft::{Draft, DraftFields};
use crate::domain::error::DomainError;
use crate::domain::listing::ListSort;
use crate::domain::markdown::{ExportFormat, export_filename};

#[derive(Debug, Clone)]
pub(crate) struct DraftExport {
    pub(crate) filename: String,
    pub(crate) content_type: &'static str,
    pub(crate) body: String,
}

#[derive(Debug, Clone)]
pub(crate) enum SavedDraft {
    Created(Draft),
    Updated(Draft),
}

pub(crate) struct DraftService<R: DraftRepository> {
    repo: R,
}

impl<R: DraftRepository> DraftService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list(
        &self,
        author_id: i64,
        sort: ListSort,
    ) -> Result<Vec<Draft>, DomainError> {
        self.repo.list_drafts(author_id, sort.recency()).await
    }

    pub(crate) async fn get(&self, author_id: i64, draft_id: i64) -> Result<Draft, DomainError> {
        self.repo
            .get_draft_owned(draft_id, author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("draft", draft_id))
    }

    /// Без `draft_id` создаёт новый черновик, с ним обновляет существующий.
    pub(crate) async fn save(
        &self,
        author_id: i64,
        draft_id: Option<i64>,
        fields: DraftFields,
    ) -> Result<SavedDraft, DomainError> {
        match draft_id {
            Some(draft_id) => self
                .update(author_id, draft_id, fields)
                .await
                .map(SavedDraft::Updated),
            None => {
                let fields = fields.validate()?;
                let draft = self.repo.create_draft(author_id, fields).await?;
                Ok(SavedDraft::Created(draft))
            }
        }
    }

    pub(crate) async fn update(
        &self,
        author_id: i64,
        draft_id: i64,
        fields: DraftFields,
    ) -> Result<Draft, DomainError> {
        let fields = fields.validate()?;
        self.repo
            .update_draft_owned(draft_id, author_id, fields)
            .await?
            .ok_or_else(|| DomainError::not_found("draft", draft_id))
    }

    pub(crate) async fn delete(&self, author_id: i64, draft_id: i64) -> Result<(), DomainError> {
        if !self.repo.delete_draft_owned(draft_id, author_id).await? {
            return Err(DomainError::not_found("draft", draft_id));
        }
        Ok(())
    }

    pub(crate) async fn export(
        &self,
        author_id: i64,
        draft_id: i64,
        format: ExportFormat,
    ) -> Result<DraftExport, DomainError> {
        let draft = self.get(author_id, draft_id).await?;

        Ok(DraftExport {
            filename: export_filename(&draft.title, format),
            content_type: format.content_type(),
            body: format.render(&draft.content),
        })
    }
}

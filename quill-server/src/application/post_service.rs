use crate::data::draft_repository::DraftRepository;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::listing::ListSort;
use crate::domain::post::{
    CreatePostRequest, Post, PublishedPost, UpdatePostRequest, rank_by_rating, slugify,
};

const MAX_SLUG_ATTEMPTS: u32 = 100;
const MAX_SLUG_CHARS: usize = 255;

pub(crate) struct PostService<P: PostRepository, D: DraftRepository> {
    posts: P,
    drafts: D,
}

impl<P: PostRepository, D: DraftRepository> PostService<P, D> {
    pub(crate) fn new(posts: P, drafts: D) -> Self {
        Self { posts, drafts }
    }

    /// Публичная лента. `highest-rated` досортировывает выборку "сначала новые",
    /// поэтому посты с равной оценкой остаются в порядке убывания даты.
    pub(crate) async fn list_published(
        &self,
        sort: ListSort,
    ) -> Result<Vec<PublishedPost>, DomainError> {
        let mut posts = self.posts.list_published(sort.recency()).await?;
        if sort == ListSort::HighestRated {
            rank_by_rating(&mut posts);
        }
        Ok(posts)
    }

    pub(crate) async fn get_published(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(post_id)
            .await?
            .filter(|post| post.published)
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    pub(crate) async fn create(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let explicit_slug = req.slug.as_deref().is_some_and(|slug| !slug.trim().is_empty());
        let req = req.validate()?;
        let base = req.slug.unwrap_or_else(|| slugify(&req.title));
        let post = NewPost {
            title: req.title,
            content: req.content,
            summary: req.summary,
            slug: base.clone(),
            published: req.published,
            author_id,
        };

        if explicit_slug {
            return self.posts.create_post(post).await;
        }

        // выведенный из заголовка slug занят: пробуем base-2, base-3, ...
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = match attempt {
                1 => base.clone(),
                n => suffixed_slug(&base, n),
            };
            match self.posts.create_post(NewPost { slug, ..post.clone() }).await {
                Err(DomainError::AlreadyExists(_)) => {
                    tracing::debug!(slug = %base, attempt, "slug taken, retrying with suffix");
                }
                result => return result,
            }
        }
        Err(DomainError::AlreadyExists("slug".to_string()))
    }

    /// Копирует черновик автора в новый опубликованный пост.
    pub(crate) async fn publish_draft(
        &self,
        author_id: i64,
        draft_id: i64,
    ) -> Result<Post, DomainError> {
        let draft = self
            .drafts
            .get_draft_owned(draft_id, author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("draft", draft_id))?;

        self.create(
            author_id,
            CreatePostRequest {
                title: draft.title,
                content: draft.content,
                summary: None,
                slug: None,
                published: true,
            },
        )
        .await
    }

    pub(crate) async fn update(
        &self,
        author_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            content: req.content,
            summary: req.summary,
            published: req.published,
        };

        self.posts
            .update_post_owned(post_id, author_id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    pub(crate) async fn delete(&self, author_id: i64, post_id: i64) -> Result<(), DomainError> {
        if !self.posts.delete_post_owned(post_id, author_id).await? {
            return Err(DomainError::not_found("post", post_id));
        }
        Ok(())
    }
}

fn suffixed_slug(base: &str, n: u32) -> String {
    let suffix = format!("-{n}");
    let stem: String = base.chars().take(MAX_SLUG_CHARS - suffix.len()).collect();
    stem + &suffix
}

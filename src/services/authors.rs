//! Author service

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDraft, AuthorForm, Book},
    repository::Repository,
};

/// An author with the books that reference it
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.list_authors().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository
            .get_author(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Fetch the author and its books concurrently
    async fn fetch_with_books(&self, id: Uuid) -> AppResult<(Option<Author>, Vec<Book>)> {
        tokio::try_join!(self.repository.get_author(id), self.repository.books_by_author(id))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        let (author, books) = self.fetch_with_books(id).await?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<FormOutcome<Author, AuthorDraft>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                return Ok(FormOutcome::Invalid {
                    draft: rejected.draft,
                    errors: rejected.errors,
                })
            }
        };

        let author = input.into_author(Uuid::new_v4());
        self.repository.insert_author(&author).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(FormOutcome::Saved(author))
    }

    /// Replace the author stored under `id`. The id is never regenerated.
    pub async fn update(&self, id: Uuid, form: AuthorForm) -> AppResult<FormOutcome<Author, Author>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                let author = self.get(id).await?;
                return Ok(FormOutcome::Invalid {
                    draft: author,
                    errors: rejected.errors,
                });
            }
        };

        let author = input.into_author(id);
        let updated = self
            .repository
            .update_author(&author)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Updated author {}", updated.id);
        Ok(FormOutcome::Saved(updated))
    }

    /// Author and books for the delete confirmation, `None` when absent
    pub async fn delete_preview(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let (author, books) = self.fetch_with_books(id).await?;
        Ok(author.map(|author| AuthorDetail { author, books }))
    }

    /// Delete an author that no book references.
    ///
    /// The reference check and the delete are separate statements; a book
    /// created for this author in between is not detected.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, books) = self.fetch_with_books(id).await?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::Missing);
        };
        if !books.is_empty() {
            tracing::warn!("Refusing to delete author {}: {} book(s) reference it", id, books.len());
            return Ok(DeleteOutcome::Blocked {
                entity: author,
                dependents: books,
            });
        }

        self.repository.delete_author(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

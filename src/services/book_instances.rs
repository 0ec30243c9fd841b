//! Book instance (copy) service

use std::{collections::HashMap, convert::Infallible};

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceDraft, BookInstanceForm},
    repository::Repository,
};

/// A copy with its book resolved
#[derive(Debug, Clone)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    /// `None` when the referenced book no longer exists
    pub book: Option<Book>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let (instances, books) =
            tokio::try_join!(self.repository.list_book_instances(), self.repository.list_books())?;
        let books: HashMap<Uuid, Book> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceDetail {
                book: books.get(&instance.book_id).cloned(),
                instance,
            })
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository
            .get_book_instance(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        let Some(instance) = self.repository.get_book_instance(id).await? else {
            return Ok(None);
        };
        let book = self.repository.get_book(instance.book_id).await?;
        if book.is_none() {
            tracing::warn!("Copy {} references missing book {}", instance.id, instance.book_id);
        }
        Ok(Some(BookInstanceDetail { instance, book }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    /// Books offered by the copy form
    pub async fn form_references(&self) -> AppResult<Vec<Book>> {
        self.repository.list_books().await
    }

    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstance, Vec<Book>)> {
        let (instance, books) =
            tokio::try_join!(self.repository.get_book_instance(id), self.repository.list_books())?;
        let instance = instance.ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        Ok((instance, books))
    }

    pub async fn create(&self, form: BookInstanceForm) -> AppResult<FormOutcome<BookInstance, BookInstanceDraft>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                return Ok(FormOutcome::Invalid {
                    draft: rejected.draft,
                    errors: rejected.errors,
                })
            }
        };

        let instance = input.into_book_instance(Uuid::new_v4());
        self.repository.insert_book_instance(&instance).await?;
        tracing::info!("Created copy {} of book {}", instance.id, instance.book_id);
        Ok(FormOutcome::Saved(instance))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstance, BookInstance>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                let instance = self.get(id).await?;
                return Ok(FormOutcome::Invalid {
                    draft: instance,
                    errors: rejected.errors,
                });
            }
        };

        let instance = input.into_book_instance(id);
        let updated = self
            .repository
            .update_book_instance(&instance)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("Updated copy {}", updated.id);
        Ok(FormOutcome::Saved(updated))
    }

    pub async fn delete_preview(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        self.find_detail(id).await
    }

    /// Copies have no dependents, so a stored copy is always deleted.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookInstance, Infallible>> {
        if !self.repository.delete_book_instance(id).await? {
            return Ok(DeleteOutcome::Missing);
        }
        tracing::info!("Deleted copy {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

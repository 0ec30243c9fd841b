//! Genre service

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreDraft, GenreForm},
    repository::Repository,
};

#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.list_genres().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.repository
            .get_genre(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    async fn fetch_with_books(&self, id: Uuid) -> AppResult<(Option<Genre>, Vec<Book>)> {
        tokio::try_join!(self.repository.get_genre(id), self.repository.books_by_genre(id))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        let (genre, books) = self.fetch_with_books(id).await?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok(GenreDetail { genre, books })
    }

    /// Create a genre, or return the stored one when the name is taken.
    ///
    /// Uniqueness is checked here, not by the store, so two concurrent
    /// submissions of a new name can both insert.
    pub async fn create(&self, form: GenreForm) -> AppResult<FormOutcome<Genre, GenreDraft>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                return Ok(FormOutcome::Invalid {
                    draft: rejected.draft,
                    errors: rejected.errors,
                })
            }
        };

        if let Some(existing) = self.repository.find_genre_by_name(&input.name).await? {
            tracing::info!("Genre '{}' already exists as {}", existing.name, existing.id);
            return Ok(FormOutcome::Existing(existing));
        }

        let genre = input.into_genre(Uuid::new_v4());
        self.repository.insert_genre(&genre).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(FormOutcome::Saved(genre))
    }

    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<FormOutcome<Genre, Genre>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                let genre = self.get(id).await?;
                return Ok(FormOutcome::Invalid {
                    draft: genre,
                    errors: rejected.errors,
                });
            }
        };

        let genre = input.into_genre(id);
        let updated = self
            .repository
            .update_genre(&genre)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Updated genre {}", updated.id);
        Ok(FormOutcome::Saved(updated))
    }

    pub async fn delete_preview(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        let (genre, books) = self.fetch_with_books(id).await?;
        Ok(genre.map(|genre| GenreDetail { genre, books }))
    }

    /// Delete a genre no book references. Check and delete are not atomic.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, books) = self.fetch_with_books(id).await?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Missing);
        };
        if !books.is_empty() {
            tracing::warn!("Refusing to delete genre {}: {} book(s) reference it", id, books.len());
            return Ok(DeleteOutcome::Blocked {
                entity: genre,
                dependents: books,
            });
        }

        self.repository.delete_genre(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::repository::{CatalogStore, MemoryStore};

    fn service() -> (GenresService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (GenresService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn duplicate_name_returns_the_existing_genre() {
        let (service, store) = service();
        let FormOutcome::Saved(fantasy) = service.create(GenreForm { name: "Fantasy".into() }).await.unwrap()
        else {
            panic!("create failed");
        };

        match service.create(GenreForm { name: " Fantasy ".into() }).await.unwrap() {
            FormOutcome::Existing(existing) => {
                assert_eq!(existing.id, fantasy.id);
                assert_eq!(existing.url(), fantasy.url());
            }
            other => panic!("expected Existing, got {:?}", other),
        }
        assert_eq!(store.count_genres().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_is_refused_while_books_use_the_genre() {
        let (service, store) = service();
        let FormOutcome::Saved(genre) = service.create(GenreForm { name: "Poetry".into() }).await.unwrap()
        else {
            panic!("create failed");
        };
        store
            .insert_book(&Book {
                id: Uuid::new_v4(),
                title: "Leaves of Grass".into(),
                author_id: Uuid::new_v4(),
                summary: "Poems".into(),
                isbn: "9780486456768".into(),
                genre_ids: vec![genre.id],
            })
            .await
            .unwrap();

        assert!(matches!(
            service.delete(genre.id).await.unwrap(),
            DeleteOutcome::Blocked { .. }
        ));
        assert_eq!(store.count_genres().await.unwrap(), 1);
        assert_eq!(service.detail(genre.id).await.unwrap().books.len(), 1);
    }

    #[tokio::test]
    async fn update_renames_in_place() {
        let (service, _) = service();
        let FormOutcome::Saved(genre) = service.create(GenreForm { name: "Scifi".into() }).await.unwrap()
        else {
            panic!("create failed");
        };
        let FormOutcome::Saved(updated) = service
            .update(genre.id, GenreForm { name: "Science Fiction".into() })
            .await
            .unwrap()
        else {
            panic!("update failed");
        };
        assert_eq!(updated.id, genre.id);
        assert_eq!(service.get(genre.id).await.unwrap().name, "Science Fiction");
    }
}

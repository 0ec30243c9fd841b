//! Book service

use std::collections::HashMap;

use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDraft, BookForm, BookInstance, Genre},
    repository::Repository,
};

/// A book with its author resolved, for the list page
#[derive(Debug, Clone)]
pub struct BookListing {
    pub book: Book,
    pub author: Option<Author>,
}

/// A book with its references resolved and its copies
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    /// `None` when the referenced author no longer exists
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Choices offered by the book form
#[derive(Debug, Clone)]
pub struct BookFormReferences {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookListing>> {
        let (books, authors) = tokio::try_join!(self.repository.list_books(), self.repository.list_authors())?;
        let authors: HashMap<Uuid, Author> = authors.into_iter().map(|a| (a.id, a)).collect();
        Ok(books
            .into_iter()
            .map(|book| BookListing {
                author: authors.get(&book.author_id).cloned(),
                book,
            })
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        self.repository
            .get_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    async fn fetch_with_instances(&self, id: Uuid) -> AppResult<(Option<Book>, Vec<BookInstance>)> {
        tokio::try_join!(self.repository.get_book(id), self.repository.instances_by_book(id))
    }

    /// Resolve the author and genre references of a book
    async fn populate(&self, book: &Book) -> AppResult<(Option<Author>, Vec<Genre>)> {
        let (author, genres) = tokio::try_join!(
            self.repository.get_author(book.author_id),
            self.repository.genres_by_ids(&book.genre_ids)
        )?;
        if author.is_none() {
            tracing::warn!("Book {} references missing author {}", book.id, book.author_id);
        }
        Ok((author, genres))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, instances) = self.fetch_with_instances(id).await?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let (author, genres) = self.populate(&book).await?;
        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    pub async fn form_references(&self) -> AppResult<BookFormReferences> {
        let (authors, genres) = tokio::try_join!(self.repository.list_authors(), self.repository.list_genres())?;
        Ok(BookFormReferences { authors, genres })
    }

    /// The stored book plus the form choices, for the update form
    pub async fn edit(&self, id: Uuid) -> AppResult<(Book, BookFormReferences)> {
        let (book, references) = tokio::try_join!(self.repository.get_book(id), self.form_references())?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        Ok((book, references))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<Book, BookDraft>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                return Ok(FormOutcome::Invalid {
                    draft: rejected.draft,
                    errors: rejected.errors,
                })
            }
        };

        let book = input.into_book(Uuid::new_v4());
        self.repository.insert_book(&book).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(FormOutcome::Saved(book))
    }

    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<FormOutcome<Book, Book>> {
        let input = match form.process() {
            Ok(input) => input,
            Err(rejected) => {
                let book = self.get(id).await?;
                return Ok(FormOutcome::Invalid {
                    draft: book,
                    errors: rejected.errors,
                });
            }
        };

        let book = input.into_book(id);
        let updated = self
            .repository
            .update_book(&book)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Updated book {}", updated.id);
        Ok(FormOutcome::Saved(updated))
    }

    pub async fn delete_preview(&self, id: Uuid) -> AppResult<Option<(Book, Vec<BookInstance>)>> {
        let (book, instances) = self.fetch_with_instances(id).await?;
        Ok(book.map(|book| (book, instances)))
    }

    /// Delete a book with no copies. Check and delete are not atomic.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        let (book, instances) = self.fetch_with_instances(id).await?;
        let Some(book) = book else {
            return Ok(DeleteOutcome::Missing);
        };
        if !instances.is_empty() {
            tracing::warn!("Refusing to delete book {}: {} copies reference it", id, instances.len());
            return Ok(DeleteOutcome::Blocked {
                entity: book,
                dependents: instances,
            });
        }

        self.repository.delete_book(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

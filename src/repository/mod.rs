//! Repository layer: the entity store behind every service

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

pub use memory::MemoryStore;

/// Query/command interface of the entity store.
///
/// `update_*` return `None` when the id no longer exists. `delete_*` return
/// whether a record was removed. Reference checks are left to the caller;
/// nothing here enforces them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Authors
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn insert_author(&self, author: &Author) -> AppResult<()>;
    async fn update_author(&self, author: &Author) -> AppResult<Option<Author>>;
    async fn delete_author(&self, id: Uuid) -> AppResult<bool>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Books
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn insert_book(&self, book: &Book) -> AppResult<()>;
    async fn update_book(&self, book: &Book) -> AppResult<Option<Book>>;
    async fn delete_book(&self, id: Uuid) -> AppResult<bool>;
    async fn count_books(&self) -> AppResult<i64>;

    // Genres
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn insert_genre(&self, genre: &Genre) -> AppResult<()>;
    async fn update_genre(&self, genre: &Genre) -> AppResult<Option<Genre>>;
    async fn delete_genre(&self, id: Uuid) -> AppResult<bool>;
    async fn count_genres(&self) -> AppResult<i64>;

    // Book instances
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn insert_book_instance(&self, instance: &BookInstance) -> AppResult<()>;
    async fn update_book_instance(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>>;
    async fn delete_book_instance(&self, id: Uuid) -> AppResult<bool>;
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
}

/// Shared handle to the store, cloned into every service
pub type Repository = Arc<dyn CatalogStore>;

/// PostgreSQL-backed store. Query methods live in the per-entity modules.
#[derive(Clone)]
pub struct PgStore {
    pub pool: Pool<Postgres>,
}

impl PgStore {
    /// Create a new store with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_get(id).await
    }
    async fn insert_author(&self, author: &Author) -> AppResult<()> {
        self.authors_insert(author).await
    }
    async fn update_author(&self, author: &Author) -> AppResult<Option<Author>> {
        self.authors_update(author).await
    }
    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        self.authors_delete(id).await
    }
    async fn count_authors(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books_list().await
    }
    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books_get(id).await
    }
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_find_by_author(author_id).await
    }
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_find_by_genre(genre_id).await
    }
    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        self.books_insert(book).await
    }
    async fn update_book(&self, book: &Book) -> AppResult<Option<Book>> {
        self.books_update(book).await
    }
    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        self.books_delete(id).await
    }
    async fn count_books(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres_get(id).await
    }
    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        self.genres_find_by_ids(ids).await
    }
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres_find_by_name(name).await
    }
    async fn insert_genre(&self, genre: &Genre) -> AppResult<()> {
        self.genres_insert(genre).await
    }
    async fn update_genre(&self, genre: &Genre) -> AppResult<Option<Genre>> {
        self.genres_update(genre).await
    }
    async fn delete_genre(&self, id: Uuid) -> AppResult<bool> {
        self.genres_delete(id).await
    }
    async fn count_genres(&self) -> AppResult<i64> {
        self.genres_count().await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        self.book_instances_list().await
    }
    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.book_instances_get(id).await
    }
    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.book_instances_find_by_book(book_id).await
    }
    async fn insert_book_instance(&self, instance: &BookInstance) -> AppResult<()> {
        self.book_instances_insert(instance).await
    }
    async fn update_book_instance(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        self.book_instances_update(instance).await
    }
    async fn delete_book_instance(&self, id: Uuid) -> AppResult<bool> {
        self.book_instances_delete(id).await
    }
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.book_instances_count(status).await
    }
}

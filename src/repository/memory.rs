//! In-process store, selected with a `memory://` database URL.
//!
//! Keeps every collection in a map behind one async lock. Records are
//! returned as clones so callers never hold the lock across an await.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

#[derive(Default)]
struct Collections {
    authors: HashMap<Uuid, Author>,
    books: HashMap<Uuid, Book>,
    genres: HashMap<Uuid, Genre>,
    book_instances: HashMap<Uuid, BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by<T: Clone, K: Ord>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(|item| key(item));
    items
}

fn replace<T: Clone>(map: &mut HashMap<Uuid, T>, id: Uuid, record: &T) -> Option<T> {
    let slot = map.get_mut(&id)?;
    *slot = record.clone();
    Some(record.clone())
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.authors.values().cloned(), |a| a.family_name.to_lowercase()))
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn insert_author(&self, author: &Author) -> AppResult<()> {
        self.inner.write().await.authors.insert(author.id, author.clone());
        Ok(())
    }

    async fn update_author(&self, author: &Author) -> AppResult<Option<Author>> {
        Ok(replace(&mut self.inner.write().await.authors, author.id, author))
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.authors.remove(&id).is_some())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.authors.len() as i64)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.books.values().cloned(), |b| b.title.to_lowercase()))
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_by(
            db.books.values().filter(|b| b.author_id == author_id).cloned(),
            |b| b.title.to_lowercase(),
        ))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_by(
            db.books.values().filter(|b| b.genre_ids.contains(&genre_id)).cloned(),
            |b| b.title.to_lowercase(),
        ))
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        self.inner.write().await.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn update_book(&self, book: &Book) -> AppResult<Option<Book>> {
        Ok(replace(&mut self.inner.write().await.books, book.id, book))
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.books.len() as i64)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.genres.values().cloned(), |g| g.name.to_lowercase()))
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        Ok(sorted_by(
            ids.iter().filter_map(|id| db.genres.get(id).cloned()),
            |g| g.name.to_lowercase(),
        ))
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let db = self.inner.read().await;
        Ok(db.genres.values().find(|g| g.name == name).cloned())
    }

    async fn insert_genre(&self, genre: &Genre) -> AppResult<()> {
        self.inner.write().await.genres.insert(genre.id, genre.clone());
        Ok(())
    }

    async fn update_genre(&self, genre: &Genre) -> AppResult<Option<Genre>> {
        Ok(replace(&mut self.inner.write().await.genres, genre.id, genre))
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.genres.remove(&id).is_some())
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.genres.len() as i64)
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        let db = self.inner.read().await;
        Ok(sorted_by(db.book_instances.values().cloned(), |i| i.imprint.to_lowercase()))
    }

    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.inner.read().await.book_instances.get(&id).cloned())
    }

    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let db = self.inner.read().await;
        Ok(sorted_by(
            db.book_instances.values().filter(|i| i.book_id == book_id).cloned(),
            |i| i.imprint.to_lowercase(),
        ))
    }

    async fn insert_book_instance(&self, instance: &BookInstance) -> AppResult<()> {
        self.inner
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(())
    }

    async fn update_book_instance(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        Ok(replace(&mut self.inner.write().await.book_instances, instance.id, instance))
    }

    async fn delete_book_instance(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.book_instances.remove(&id).is_some())
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let db = self.inner.read().await;
        let count = db
            .book_instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(count as i64)
    }
}

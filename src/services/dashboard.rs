//! Landing page summary counts

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::BookInstanceStatus,
    repository::Repository,
};

/// Collection counts shown on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Run the five counts concurrently. All of them or none: the first
    /// failure becomes a single `AppError::Aggregate` and the rest are dropped.
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let repo = &self.repository;
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
            tokio::try_join!(
                repo.count_books(),
                repo.count_book_instances(None),
                repo.count_book_instances(Some(BookInstanceStatus::Available)),
                repo.count_authors(),
                repo.count_genres(),
            )
            .map_err(|e| AppError::Aggregate(Box::new(e)))?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }
}

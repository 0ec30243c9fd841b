//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod dashboard;
pub mod genres;

use crate::{repository::Repository, validation::FieldError};

/// Result of a create or update submission.
///
/// `Invalid` is recovered by re-rendering the form; the draft is what the
/// form shows back (the submitted values on create, the stored entity on
/// update).
#[derive(Debug)]
pub enum FormOutcome<T, D> {
    Saved(T),
    /// An equal record already existed and nothing was written
    Existing(T),
    Invalid { draft: D, errors: Vec<FieldError> },
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome<T, D> {
    Deleted,
    /// Nothing stored under the id
    Missing,
    /// Dependents still reference the entity; nothing was deleted
    Blocked { entity: T, dependents: Vec<D> },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository),
        }
    }
}

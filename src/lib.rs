//! Local library catalog
//!
//! A server-rendered catalog of authors, books, genres and book copies,
//! with list, detail, create, update and delete pages for each and a
//! landing page summarising the collection.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: Arc<views::Views>,
}

impl AppState {
    /// Wire services and templates over the given store
    pub fn new(config: AppConfig, repository: repository::Repository) -> AppResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
            views: Arc::new(views::Views::new()?),
        })
    }
}

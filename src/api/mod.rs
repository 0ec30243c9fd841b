//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod dashboard;
pub mod genres;
pub mod health;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::Redirect,
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{error::AppError, AppState};

/// Identifier taken from the `:id` path segment.
///
/// Anything that is not a well-formed identifier cannot name a stored record,
/// so it is rejected as NotFound rather than as a bad request.
pub struct EntityId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Uuid::parse_str(&raw).map(EntityId).map_err(|_| {
            tracing::warn!("Malformed identifier in path: {}", raw);
            AppError::NotFound(format!("No record with id {}", raw))
        })
    }
}

/// Body of a delete confirmation. The hidden field is named after the kind.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default, alias = "authorid", alias = "bookid", alias = "genreid", alias = "bookinstanceid")]
    pub id: Option<String>,
}

impl DeleteForm {
    /// The submitted id, or the path id when the field is absent or blank
    pub fn target(&self, path_id: Uuid) -> Result<Uuid, AppError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(path_id),
            Some(raw) => Uuid::parse_str(raw)
                .map_err(|_| AppError::NotFound(format!("No record with id {}", raw))),
        }
    }
}

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(dashboard::index))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/author/create", get(authors::create_form).post(authors::create_author))
        .route("/author/:id", get(authors::author_detail))
        .route("/author/:id/update", get(authors::update_form).post(authors::update_author))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete_author))
        // Books
        .route("/books", get(books::list_books))
        .route("/book/create", get(books::create_form).post(books::create_book))
        .route("/book/:id", get(books::book_detail))
        .route("/book/:id/update", get(books::update_form).post(books::update_book))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete_book))
        // Genres
        .route("/genres", get(genres::list_genres))
        .route("/genre/create", get(genres::create_form).post(genres::create_genre))
        .route("/genre/:id", get(genres::genre_detail))
        .route("/genre/:id/update", get(genres::update_form).post(genres::update_genre))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete_genre))
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::book_instance_detail))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update_book_instance),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete_book_instance),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

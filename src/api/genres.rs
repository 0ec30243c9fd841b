//! Genre pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde_json::json;

use super::{DeleteForm, EntityId};
use crate::{
    error::AppResult,
    models::{Book, Genre, GenreForm},
    services::{genres::GenreDetail, DeleteOutcome, FormOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/genres";

pub async fn list_genres(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    tracing::debug!("Listing {} genres", genres.len());

    let genre_list: Vec<_> = genres.iter().map(Genre::view).collect();
    state
        .views
        .render("genre_list", &json!({ "title": "Genre List", "genre_list": genre_list }))
}

pub async fn genre_detail(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let GenreDetail { genre, books } = state.services.genres.detail(id).await?;
    let genre_books: Vec<_> = books.iter().map(Book::view).collect();
    state.views.render(
        "genre_detail",
        &json!({ "title": "Genre Detail", "genre": genre.view(), "genre_books": genre_books }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render("genre_form", &json!({ "title": "Create Genre" }))
}

/// Create a genre; an already stored name redirects to that genre
pub async fn create_genre(State(state): State<AppState>, Form(form): Form<GenreForm>) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        FormOutcome::Saved(genre) | FormOutcome::Existing(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render("genre_form", &json!({ "title": "Create Genre", "genre": draft, "errors": errors }))?
            .into_response()),
    }
}

pub async fn update_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let genre = state.services.genres.get(id).await?;
    state
        .views
        .render("genre_form", &json!({ "title": "Update Genre", "genre": genre }))
}

pub async fn update_genre(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(id, form).await? {
        FormOutcome::Saved(genre) | FormOutcome::Existing(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render("genre_form", &json!({ "title": "Update Genre", "genre": draft, "errors": errors }))?
            .into_response()),
    }
}

fn delete_page(state: &AppState, genre: &Genre, books: &[Book]) -> AppResult<Html<String>> {
    let genre_books: Vec<_> = books.iter().map(Book::view).collect();
    state.views.render(
        "genre_delete",
        &json!({ "title": "Delete Genre", "genre": genre.view(), "genre_books": genre_books }),
    )
}

pub async fn delete_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    match state.services.genres.delete_preview(id).await? {
        Some(GenreDetail { genre, books }) => Ok(delete_page(&state, &genre, &books)?.into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete_genre(
    State(state): State<AppState>,
    EntityId(path_id): EntityId,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    let id = form.target(path_id)?;
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
        DeleteOutcome::Blocked { entity, dependents } => {
            Ok(delete_page(&state, &entity, &dependents)?.into_response())
        }
    }
}

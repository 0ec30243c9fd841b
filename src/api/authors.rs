//! Author pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde_json::json;

use super::{DeleteForm, EntityId};
use crate::{
    error::AppResult,
    models::{Author, AuthorForm, Book},
    services::{authors::AuthorDetail, DeleteOutcome, FormOutcome},
    AppState,
};

const LIST_URL: &str = "/catalog/authors";

/// List all authors ordered by family name
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    tracing::debug!("Listing {} authors", authors.len());

    let author_list: Vec<_> = authors.iter().map(Author::view).collect();
    state
        .views
        .render("author_list", &json!({ "title": "Author List", "author_list": author_list }))
}

/// Show an author with all of their books
pub async fn author_detail(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let AuthorDetail { author, books } = state.services.authors.detail(id).await?;
    let author_books: Vec<_> = books.iter().map(Book::view).collect();
    state.views.render(
        "author_detail",
        &json!({ "title": "Author Detail", "author": author.view(), "author_books": author_books }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render("author_form", &json!({ "title": "Create Author" }))
}

pub async fn create_author(State(state): State<AppState>, Form(form): Form<AuthorForm>) -> AppResult<Response> {
    match state.services.authors.create(form).await? {
        FormOutcome::Saved(author) | FormOutcome::Existing(author) => Ok(Redirect::to(&author.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render(
                "author_form",
                &json!({ "title": "Create Author", "author": draft, "errors": errors }),
            )?
            .into_response()),
    }
}

pub async fn update_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let author = state.services.authors.get(id).await?;
    state
        .views
        .render("author_form", &json!({ "title": "Update Author", "author": author }))
}

pub async fn update_author(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(id, form).await? {
        FormOutcome::Saved(author) | FormOutcome::Existing(author) => Ok(Redirect::to(&author.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => Ok(state
            .views
            .render(
                "author_form",
                &json!({ "title": "Update Author", "author": draft, "errors": errors }),
            )?
            .into_response()),
    }
}

fn delete_page(state: &AppState, author: &Author, books: &[Book]) -> AppResult<Html<String>> {
    let author_books: Vec<_> = books.iter().map(Book::view).collect();
    state.views.render(
        "author_delete",
        &json!({ "title": "Delete Author", "author": author.view(), "author_books": author_books }),
    )
}

/// Delete confirmation; an unknown author goes back to the list
pub async fn delete_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    match state.services.authors.delete_preview(id).await? {
        Some(AuthorDetail { author, books }) => Ok(delete_page(&state, &author, &books)?.into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete_author(
    State(state): State<AppState>,
    EntityId(path_id): EntityId,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    let id = form.target(path_id)?;
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
        DeleteOutcome::Blocked { entity, dependents } => {
            Ok(delete_page(&state, &entity, &dependents)?.into_response())
        }
    }
}

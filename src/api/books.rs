//! Book pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Serialize;
use serde_json::{json, Value};

use super::{DeleteForm, EntityId};
use crate::{
    error::AppResult,
    models::{author::AuthorView, book::BookView, Book, BookForm, BookInstance, Genre},
    services::{
        books::{BookDetail, BookFormReferences, BookListing},
        DeleteOutcome, FormOutcome,
    },
    validation::FieldError,
    AppState,
};

const LIST_URL: &str = "/catalog/books";

/// A book list row with its author, when the author still exists
#[derive(Serialize)]
struct BookRow<'a> {
    #[serde(flatten)]
    book: BookView<'a>,
    author: Option<AuthorView<'a>>,
}

pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let listings = state.services.books.list().await?;
    tracing::debug!("Listing {} books", listings.len());

    let book_list: Vec<_> = listings
        .iter()
        .map(|BookListing { book, author }| BookRow {
            book: book.view(),
            author: author.as_ref().map(|a| a.view()),
        })
        .collect();
    state
        .views
        .render("book_list", &json!({ "title": "Book List", "book_list": book_list }))
}

pub async fn book_detail(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let BookDetail {
        book,
        author,
        genres,
        instances,
    } = state.services.books.detail(id).await?;

    let genres: Vec<_> = genres.iter().map(Genre::view).collect();
    let book_instances: Vec<_> = instances.iter().map(BookInstance::view).collect();
    state.views.render(
        "book_detail",
        &json!({
            "title": book.title,
            "book": book.view(),
            "author": author.as_ref().map(|a| a.view()),
            "genres": genres,
            "book_instances": book_instances,
        }),
    )
}

/// Render the book form. `author` and `genres` are the submitted or stored
/// selections, marked in the choice lists.
fn form_page(
    state: &AppState,
    title: &str,
    book: Value,
    references: &BookFormReferences,
    author: &str,
    genres: &[String],
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let authors: Vec<_> = references
        .authors
        .iter()
        .map(|a| {
            let id = a.id.to_string();
            json!({ "selected": id == author, "id": id, "name": a.name() })
        })
        .collect();
    let genre_choices: Vec<_> = references
        .genres
        .iter()
        .map(|g| {
            let id = g.id.to_string();
            json!({ "checked": genres.contains(&id), "id": id, "name": g.name })
        })
        .collect();

    state.views.render(
        "book_form",
        &json!({
            "title": title,
            "book": book,
            "authors": authors,
            "genres": genre_choices,
            "errors": errors,
        }),
    )
}

fn stored_selection(book: &Book) -> (String, Vec<String>) {
    (
        book.author_id.to_string(),
        book.genre_ids.iter().map(|id| id.to_string()).collect(),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let references = state.services.books.form_references().await?;
    form_page(&state, "Create Book", Value::Null, &references, "", &[], &[])
}

pub async fn create_book(State(state): State<AppState>, Form(form): Form<BookForm>) -> AppResult<Response> {
    match state.services.books.create(form).await? {
        FormOutcome::Saved(book) | FormOutcome::Existing(book) => Ok(Redirect::to(&book.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => {
            let references = state.services.books.form_references().await?;
            let book = serde_json::to_value(&draft)?;
            Ok(form_page(&state, "Create Book", book, &references, &draft.author, &draft.genre, &errors)?.into_response())
        }
    }
}

pub async fn update_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let (book, references) = state.services.books.edit(id).await?;
    let (author, genres) = stored_selection(&book);
    form_page(&state, "Update Book", serde_json::to_value(&book)?, &references, &author, &genres, &[])
}

pub async fn update_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.update(id, form).await? {
        FormOutcome::Saved(book) | FormOutcome::Existing(book) => Ok(Redirect::to(&book.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => {
            let references = state.services.books.form_references().await?;
            let (author, genres) = stored_selection(&draft);
            let book = serde_json::to_value(&draft)?;
            Ok(form_page(&state, "Update Book", book, &references, &author, &genres, &errors)?.into_response())
        }
    }
}

fn delete_page(state: &AppState, book: &Book, instances: &[BookInstance]) -> AppResult<Html<String>> {
    let book_instances: Vec<_> = instances.iter().map(BookInstance::view).collect();
    state.views.render(
        "book_delete",
        &json!({ "title": "Delete Book", "book": book.view(), "book_instances": book_instances }),
    )
}

pub async fn delete_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    match state.services.books.delete_preview(id).await? {
        Some((book, instances)) => Ok(delete_page(&state, &book, &instances)?.into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete_book(
    State(state): State<AppState>,
    EntityId(path_id): EntityId,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    let id = form.target(path_id)?;
    match state.services.books.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
        DeleteOutcome::Blocked { entity, dependents } => {
            Ok(delete_page(&state, &entity, &dependents)?.into_response())
        }
    }
}

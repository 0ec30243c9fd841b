//! Book instance (copy) pages

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
    models::{book::BookView, book_instance::BookInstanceView, Book, BookInstanceForm, BookInstanceStatus},
    services::{book_instances::BookInstanceDetail, DeleteOutcome, FormOutcome},
    validation::FieldError,
    AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";

/// A copy with the book it belongs to, when the book still exists
#[derive(Serialize)]
struct CopyRow<'a> {
    #[serde(flatten)]
    instance: BookInstanceView<'a>,
    book: Option<BookView<'a>>,
}

impl<'a> From<&'a BookInstanceDetail> for CopyRow<'a> {
    fn from(detail: &'a BookInstanceDetail) -> Self {
        CopyRow {
            instance: detail.instance.view(),
            book: detail.book.as_ref().map(Book::view),
        }
    }
}

pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Html<String>> {
    let copies = state.services.book_instances.list().await?;
    tracing::debug!("Listing {} book copies", copies.len());

    let bookinstance_list: Vec<CopyRow> = copies.iter().map(CopyRow::from).collect();
    state.views.render(
        "bookinstance_list",
        &json!({ "title": "Book Instance List", "bookinstance_list": bookinstance_list }),
    )
}

pub async fn book_instance_detail(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Html<String>> {
    let detail = state.services.book_instances.detail(id).await?;
    state.views.render(
        "bookinstance_detail",
        &json!({
            "title": "Book Instance Detail",
            "bookinstance": detail.instance.view(),
            "book": detail.book.as_ref().map(Book::view),
        }),
    )
}

/// Render the copy form with `book` and `status` marked as selected
fn form_page(
    state: &AppState,
    title: &str,
    bookinstance: Value,
    books: &[Book],
    book: &str,
    status: &str,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let books: Vec<_> = books
        .iter()
        .map(|b| {
            let id = b.id.to_string();
            json!({ "selected": id == book, "id": id, "title": b.title })
        })
        .collect();
    let statuses: Vec<_> = BookInstanceStatus::NAMES
        .iter()
        .map(|name| json!({ "name": name, "selected": *name == status }))
        .collect();

    state.views.render(
        "bookinstance_form",
        &json!({
            "title": title,
            "bookinstance": bookinstance,
            "books": books,
            "statuses": statuses,
            "errors": errors,
        }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.form_references().await?;
    let status = BookInstanceStatus::default();
    form_page(&state, "Create BookInstance", Value::Null, &books, "", status.as_str(), &[])
}

pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(form).await? {
        FormOutcome::Saved(copy) | FormOutcome::Existing(copy) => Ok(Redirect::to(&copy.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => {
            let books = state.services.book_instances.form_references().await?;
            let value = serde_json::to_value(&draft)?;
            Ok(
                form_page(&state, "Create BookInstance", value, &books, &draft.book, &draft.status, &errors)?
                    .into_response(),
            )
        }
    }
}

pub async fn update_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Html<String>> {
    let (copy, books) = state.services.book_instances.edit(id).await?;
    let book = copy.book_id.to_string();
    let value = serde_json::to_value(&copy)?;
    form_page(&state, "Update BookInstance", value, &books, &book, copy.status.as_str(), &[])
}

pub async fn update_book_instance(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.update(id, form).await? {
        FormOutcome::Saved(copy) | FormOutcome::Existing(copy) => Ok(Redirect::to(&copy.url()).into_response()),
        FormOutcome::Invalid { draft, errors } => {
            let books = state.services.book_instances.form_references().await?;
            let book = draft.book_id.to_string();
            let value = serde_json::to_value(&draft)?;
            Ok(
                form_page(&state, "Update BookInstance", value, &books, &book, draft.status.as_str(), &errors)?
                    .into_response(),
            )
        }
    }
}

fn delete_page(state: &AppState, detail: &BookInstanceDetail) -> AppResult<Html<String>> {
    state.views.render(
        "bookinstance_delete",
        &json!({
            "title": "Delete BookInstance",
            "bookinstance": detail.instance.view(),
            "book": detail.book.as_ref().map(Book::view),
        }),
    )
}

pub async fn delete_form(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    match state.services.book_instances.delete_preview(id).await? {
        Some(detail) => Ok(delete_page(&state, &detail)?.into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete_book_instance(
    State(state): State<AppState>,
    EntityId(path_id): EntityId,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    let id = form.target(path_id)?;
    match state.services.book_instances.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(Redirect::to(LIST_URL).into_response()),
        // Copies have no dependents; the dependent list is uninhabited.
        DeleteOutcome::Blocked { dependents, .. } => match dependents.into_iter().next() {
            Some(never) => match never {},
            None => Ok(Redirect::to(LIST_URL).into_response()),
        },
    }
}

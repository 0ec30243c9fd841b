//! Book model and form

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{sanitize::escape, Check, FieldRule, FieldValue, Rejected, Validator};

/// Full book model from database. Author and genres are references by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    pub fn view(&self) -> BookView<'_> {
        BookView {
            book: self,
            url: self.url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookView<'a> {
    #[serde(flatten)]
    pub book: &'a Book,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl BookInput {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            title: self.title,
            author_id: self.author_id,
            summary: self.summary,
            isbn: self.isbn,
            genre_ids: self.genre_ids,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

static TITLE: Lazy<FieldRule> =
    Lazy::new(|| FieldRule::new("title").trim().check(Check::NotEmpty, "Title must not be empty."));

static AUTHOR: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("author")
        .trim()
        .check(Check::NotEmpty, "Author must not be empty.")
        .check(Check::Identifier, "Author must be a valid identifier.")
});

static SUMMARY: Lazy<FieldRule> =
    Lazy::new(|| FieldRule::new("summary").trim().check(Check::NotEmpty, "Summary must not be empty"));

static ISBN: Lazy<FieldRule> =
    Lazy::new(|| FieldRule::new("isbn").trim().check(Check::NotEmpty, "ISBN must not be empty"));

static GENRE: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("genre")
        .trim()
        .check(Check::Identifier, "Genre must be a valid identifier.")
});

/// Book form as submitted. `genre` is a checkbox group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: FieldValue,
    #[serde(default)]
    pub author: FieldValue,
    #[serde(default)]
    pub summary: FieldValue,
    #[serde(default)]
    pub isbn: FieldValue,
    #[serde(default)]
    pub genre: FieldValue,
}

impl BookForm {
    pub fn process(self) -> Result<BookInput, Rejected<BookDraft>> {
        let title = self.title.into_scalar();
        let author = self.author.into_scalar();
        let summary = self.summary.into_scalar();
        let isbn = self.isbn.into_scalar();
        let genre = self.genre.normalize();

        let mut v = Validator::new();
        let title = v.field(&TITLE, title.as_deref());
        let author = v.field(&AUTHOR, author.as_deref());
        let summary = v.field(&SUMMARY, summary.as_deref());
        let isbn = v.field(&ISBN, isbn.as_deref());
        let genre = v.each(&GENRE, genre);

        let author_id = Uuid::parse_str(&author).ok();
        let genre_ids: Vec<Uuid> = genre.iter().filter_map(|g| Uuid::parse_str(g).ok()).collect();
        let draft = BookDraft {
            title: escape(&title),
            author: escape(&author),
            summary: escape(&summary),
            isbn: escape(&isbn),
            genre: genre.iter().map(|g| escape(g)).collect(),
        };

        match (v.finish(), author_id) {
            (Ok(()), Some(author_id)) => Ok(BookInput {
                title: draft.title,
                author_id,
                summary: draft.summary,
                isbn: draft.isbn,
                genre_ids,
            }),
            (result, _) => Err(Rejected {
                draft,
                errors: result.err().unwrap_or_default(),
            }),
        }
    }
}

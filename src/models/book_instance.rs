//! Book instance (physical copy) model and form

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{
    sanitize::{escape, to_date},
    Check, FieldRule, FieldValue, Rejected, Validator,
};

use super::format_date;

/// Copy availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "book_instance_status")]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub const NAMES: &'static [&'static str] = &["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn is_available(&self) -> bool {
        self.status == BookInstanceStatus::Available
    }

    pub fn view(&self) -> BookInstanceView<'_> {
        BookInstanceView {
            instance: self,
            url: self.url(),
            due_back_formatted: self.due_back.map(format_date).unwrap_or_default(),
            available: self.is_available(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookInstanceView<'a> {
    #[serde(flatten)]
    pub instance: &'a BookInstance,
    pub url: String,
    pub due_back_formatted: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceInput {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceInput {
    pub fn into_book_instance(self, id: Uuid) -> BookInstance {
        BookInstance {
            id,
            book_id: self.book_id,
            imprint: self.imprint,
            status: self.status,
            due_back: self.due_back,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookInstanceDraft {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

static BOOK: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("book")
        .trim()
        .check(Check::NotEmpty, "Book must be specified")
        .check(Check::Identifier, "Book must be a valid identifier.")
});

static IMPRINT: Lazy<FieldRule> =
    Lazy::new(|| FieldRule::new("imprint").trim().check(Check::NotEmpty, "Imprint must be specified"));

static STATUS: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("status")
        .trim()
        .optional()
        .check(Check::OneOf(BookInstanceStatus::NAMES), "Invalid status")
});

static DUE_BACK: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("due_back")
        .trim()
        .optional()
        .check(Check::IsoDate, "Invalid date")
});

/// Book instance form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: FieldValue,
    #[serde(default)]
    pub imprint: FieldValue,
    #[serde(default)]
    pub status: FieldValue,
    #[serde(default)]
    pub due_back: FieldValue,
}

impl BookInstanceForm {
    pub fn process(self) -> Result<BookInstanceInput, Rejected<BookInstanceDraft>> {
        let book = self.book.into_scalar();
        let imprint = self.imprint.into_scalar();
        let status = self.status.into_scalar();
        let due_back = self.due_back.into_scalar();

        let mut v = Validator::new();
        let book = v.field(&BOOK, book.as_deref());
        let imprint = v.field(&IMPRINT, imprint.as_deref());
        let status = v.field(&STATUS, status.as_deref());
        let due_back = v.field(&DUE_BACK, due_back.as_deref());

        let book_id = Uuid::parse_str(&book).ok();
        let parsed_status = BookInstanceStatus::parse(&status).unwrap_or_default();
        let draft = BookInstanceDraft {
            book: escape(&book),
            imprint: escape(&imprint),
            status: escape(&status),
            due_back: escape(&due_back),
        };

        match (v.finish(), book_id) {
            (Ok(()), Some(book_id)) => Ok(BookInstanceInput {
                book_id,
                imprint: draft.imprint,
                status: parsed_status,
                due_back: to_date(&due_back),
            }),
            (result, _) => Err(Rejected {
                draft,
                errors: result.err().unwrap_or_default(),
            }),
        }
    }
}

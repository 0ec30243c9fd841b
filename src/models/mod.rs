//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorDraft, AuthorForm, AuthorInput};
pub use book::{Book, BookDraft, BookForm, BookInput};
pub use book_instance::{
    BookInstance, BookInstanceDraft, BookInstanceForm, BookInstanceInput, BookInstanceStatus,
};
pub use genre::{Genre, GenreDraft, GenreForm, GenreInput};

/// Display format used on every page, e.g. "Jan 2, 1920"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

//! Genre model and form

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{sanitize::escape, Check, FieldRule, FieldValue, Rejected, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    pub fn view(&self) -> GenreView<'_> {
        GenreView {
            genre: self,
            url: self.url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenreView<'a> {
    #[serde(flatten)]
    pub genre: &'a Genre,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreInput {
    pub name: String,
}

impl GenreInput {
    pub fn into_genre(self, id: Uuid) -> Genre {
        Genre { id, name: self.name }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreDraft {
    pub name: String,
}

static NAME: Lazy<FieldRule> =
    Lazy::new(|| FieldRule::new("name").trim().check(Check::NotEmpty, "Genre name required"));

/// Genre form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: FieldValue,
}

impl GenreForm {
    pub fn process(self) -> Result<GenreInput, Rejected<GenreDraft>> {
        let name = self.name.into_scalar();

        let mut v = Validator::new();
        let name = escape(&v.field(&NAME, name.as_deref()));

        match v.finish() {
            Ok(()) => Ok(GenreInput { name }),
            Err(errors) => Err(Rejected {
                draft: GenreDraft { name },
                errors,
            }),
        }
    }
}

//! Author model and form

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

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family_name, first_name"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth.map(format_date).unwrap_or_default(),
            self.date_of_death.map(format_date).unwrap_or_default()
        )
    }

    pub fn view(&self) -> AuthorView<'_> {
        AuthorView {
            author: self,
            name: self.name(),
            url: self.url(),
            lifespan: self.lifespan(),
        }
    }
}

/// Author with its derived fields, as templates see it
#[derive(Debug, Serialize)]
pub struct AuthorView<'a> {
    #[serde(flatten)]
    pub author: &'a Author,
    pub name: String,
    pub url: String,
    pub lifespan: String,
}

/// Validated and sanitized author fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorInput {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Submitted values shown back in a rejected form
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

static FIRST_NAME: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("first_name")
        .trim()
        .check(Check::NotEmpty, "First name must be specified.")
        .check(Check::Alphanumeric, "First name has non-alphanumeric characters.")
});

static FAMILY_NAME: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("family_name")
        .trim()
        .check(Check::NotEmpty, "Family name must be specified.")
        .check(Check::Alphanumeric, "Family name has non-alphanumeric characters.")
});

static DATE_OF_BIRTH: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("date_of_birth")
        .trim()
        .optional()
        .check(Check::IsoDate, "Invalid date of birth")
});

static DATE_OF_DEATH: Lazy<FieldRule> = Lazy::new(|| {
    FieldRule::new("date_of_death")
        .trim()
        .optional()
        .check(Check::IsoDate, "Invalid date of death")
});

/// Author form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: FieldValue,
    #[serde(default)]
    pub family_name: FieldValue,
    #[serde(default)]
    pub date_of_birth: FieldValue,
    #[serde(default)]
    pub date_of_death: FieldValue,
}

impl AuthorForm {
    pub fn process(self) -> Result<AuthorInput, Rejected<AuthorDraft>> {
        let first_name = self.first_name.into_scalar();
        let family_name = self.family_name.into_scalar();
        let date_of_birth = self.date_of_birth.into_scalar();
        let date_of_death = self.date_of_death.into_scalar();

        let mut v = Validator::new();
        let first_name = v.field(&FIRST_NAME, first_name.as_deref());
        let family_name = v.field(&FAMILY_NAME, family_name.as_deref());
        let date_of_birth = v.field(&DATE_OF_BIRTH, date_of_birth.as_deref());
        let date_of_death = v.field(&DATE_OF_DEATH, date_of_death.as_deref());

        let input = AuthorInput {
            first_name: escape(&first_name),
            family_name: escape(&family_name),
            date_of_birth: to_date(&date_of_birth),
            date_of_death: to_date(&date_of_death),
        };

        match v.finish() {
            Ok(()) => Ok(input),
            Err(errors) => Err(Rejected {
                draft: AuthorDraft {
                    first_name: input.first_name,
                    family_name: input.family_name,
                    date_of_birth: escape(&date_of_birth),
                    date_of_death: escape(&date_of_death),
                },
                errors,
            }),
        }
    }
}

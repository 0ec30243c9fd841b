//! Handlebars view rendering

use axum::{http::StatusCode, response::Html};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::json;

use crate::{error::AppResult, validation::sanitize::escape};

/// Every page template, registered under its file stem. `layout` is used as
/// a partial block by the others.
const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("error", include_str!("../templates/error.hbs")),
    ("index", include_str!("../templates/index.hbs")),
    ("author_list", include_str!("../templates/author_list.hbs")),
    ("author_detail", include_str!("../templates/author_detail.hbs")),
    ("author_form", include_str!("../templates/author_form.hbs")),
    ("author_delete", include_str!("../templates/author_delete.hbs")),
    ("book_list", include_str!("../templates/book_list.hbs")),
    ("book_detail", include_str!("../templates/book_detail.hbs")),
    ("book_form", include_str!("../templates/book_form.hbs")),
    ("book_delete", include_str!("../templates/book_delete.hbs")),
    ("genre_list", include_str!("../templates/genre_list.hbs")),
    ("genre_detail", include_str!("../templates/genre_detail.hbs")),
    ("genre_form", include_str!("../templates/genre_form.hbs")),
    ("genre_delete", include_str!("../templates/genre_delete.hbs")),
    ("bookinstance_list", include_str!("../templates/bookinstance_list.hbs")),
    ("bookinstance_detail", include_str!("../templates/bookinstance_detail.hbs")),
    ("bookinstance_form", include_str!("../templates/bookinstance_form.hbs")),
    ("bookinstance_delete", include_str!("../templates/bookinstance_delete.hbs")),
];

/// Template registry shared by all handlers
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();
        // Stored text is escaped when it is submitted.
        registry.register_escape_fn(handlebars::no_escape);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> AppResult<Html<String>> {
        Ok(Html(self.registry.render(template, data)?))
    }
}

static ERROR_VIEWS: Lazy<Option<Views>> = Lazy::new(|| match Views::new() {
    Ok(views) => Some(views),
    Err(e) => {
        tracing::error!("Error page templates failed to load: {}", e);
        None
    }
});

/// The process-wide error page
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let message = escape(message);
    let data = json!({
        "title": "Error",
        "status": status.as_u16(),
        "reason": status.canonical_reason().unwrap_or_default(),
        "message": message,
    });
    ERROR_VIEWS
        .as_ref()
        .and_then(|views| views.render("error", &data).ok())
        .unwrap_or_else(|| Html(format!("<h1>{}</h1><p>{}</p>", status, message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_compiles() {
        let views = Views::new().unwrap();
        let page = views
            .render("genre_form", &json!({ "title": "Create Genre", "errors": [{ "msg": "Genre name required" }] }))
            .unwrap();
        assert!(page.0.contains("Genre name required"));
        assert!(page.0.contains("<title>Create Genre</title>"));
    }

    #[test]
    fn error_page_shows_status_and_message() {
        let page = error_page(StatusCode::NOT_FOUND, "Author not found");
        assert!(page.0.contains("404"));
        assert!(page.0.contains("Author not found"));
    }
}

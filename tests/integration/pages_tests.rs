use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use library_catalog::{models::Genre, repository::CatalogStore};

use crate::{body_text, location, TestApp};

#[tokio::test]
async fn health_reports_version() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn root_redirects_to_the_catalog() {
    let app = TestApp::new();
    assert_eq!(location(&app.get("/").await), "/catalog");
}

#[tokio::test]
async fn dashboard_shows_counts() {
    let app = TestApp::new();
    app.store
        .insert_genre(&Genre {
            id: Uuid::new_v4(),
            name: "Poetry".into(),
        })
        .await
        .unwrap();

    let response = app.get("/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<strong>Genres:</strong> 1"));
    assert!(body.contains("<strong>Books:</strong> 0"));
    assert!(!body.contains("Error getting dynamic content."));
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let app = TestApp::new();

    for uri in [
        format!("/catalog/author/{}", Uuid::new_v4()),
        format!("/catalog/book/{}", Uuid::new_v4()),
        format!("/catalog/genre/{}/update", Uuid::new_v4()),
        format!("/catalog/bookinstance/{}", Uuid::new_v4()),
        "/catalog/author/not-an-id".to_string(),
    ] {
        let response = app.get(&uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        assert!(body_text(response).await.contains("404"));
    }
}

#[tokio::test]
async fn list_pages_render_when_empty() {
    let app = TestApp::new();
    for (uri, empty) in [
        ("/catalog/authors", "There are no authors."),
        ("/catalog/books", "There are no books."),
        ("/catalog/genres", "There are no genres."),
        ("/catalog/bookinstances", "There are no book copies in this library."),
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(empty));
    }
}

#[tokio::test]
async fn create_forms_render() {
    let app = TestApp::new();
    for uri in [
        "/catalog/author/create",
        "/catalog/book/create",
        "/catalog/genre/create",
        "/catalog/bookinstance/create",
    ] {
        assert_eq!(app.get(uri).await.status(), StatusCode::OK, "{}", uri);
    }
}

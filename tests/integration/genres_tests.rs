use axum::http::StatusCode;
use uuid::Uuid;

use library_catalog::{models::Genre, repository::CatalogStore};

use crate::{body_text, location, TestApp};

#[tokio::test]
async fn existing_genre_name_redirects_to_the_stored_genre() {
    let app = TestApp::new();
    let fantasy = Genre {
        id: Uuid::new_v4(),
        name: "Fantasy".into(),
    };
    app.store.insert_genre(&fantasy).await.unwrap();

    let response = app.post_form("/catalog/genre/create", "name=Fantasy").await;

    assert_eq!(location(&response), fantasy.url());
    assert_eq!(app.store.count_genres().await.unwrap(), 1);
}

#[tokio::test]
async fn blank_genre_name_is_rejected() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=+++").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Genre name required"));
    assert_eq!(app.store.count_genres().await.unwrap(), 0);
}

#[tokio::test]
async fn genre_name_is_escaped_before_storage() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=%3Cb%3ESF%3C%2Fb%3E").await;
    location(&response);

    let genres = app.store.list_genres().await.unwrap();
    assert_eq!(genres[0].name, "&lt;b&gt;SF&lt;&#x2F;b&gt;");
}

#[tokio::test]
async fn long_escaped_name_is_stored_whole() {
    let app = TestApp::new();
    let name = "%26".repeat(60);

    let response = app.post_form("/catalog/genre/create", &format!("name={}", name)).await;
    location(&response);

    let genres = app.store.list_genres().await.unwrap();
    assert_eq!(genres[0].name, "&amp;".repeat(60));
    assert_eq!(genres[0].name.len(), 300);
}

use axum::http::StatusCode;
use uuid::Uuid;

use library_catalog::{
    models::{Author, Book},
    repository::CatalogStore,
};

use crate::{body_text, location, TestApp};

fn ursula() -> Author {
    Author {
        id: Uuid::new_v4(),
        first_name: "Ursula".into(),
        family_name: "LeGuin".into(),
        date_of_birth: None,
        date_of_death: None,
    }
}

#[tokio::test]
async fn empty_first_name_rerenders_the_form() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/author/create", "first_name=&family_name=LeGuin")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("First name must be specified."));
    assert!(body.contains("value=\"LeGuin\""));
    assert_eq!(app.store.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn valid_author_redirects_to_its_page() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/catalog/author/create",
            "first_name=Ursula&family_name=LeGuin&date_of_birth=1929-10-21&date_of_death=",
        )
        .await;

    let url = location(&response);
    assert!(url.starts_with("/catalog/author/"));

    let page = body_text(app.get(&url).await).await;
    assert!(page.contains("LeGuin, Ursula"));
    assert!(page.contains("Oct 21, 1929"));
}

#[tokio::test]
async fn update_keeps_the_identifier() {
    let app = TestApp::new();
    let author = ursula();
    app.store.insert_author(&author).await.unwrap();

    let response = app
        .post_form(
            &format!("/catalog/author/{}/update", author.id),
            "first_name=Ursula&family_name=Kroeber",
        )
        .await;

    assert_eq!(location(&response), author.url());
    let stored = app.store.get_author(author.id).await.unwrap().unwrap();
    assert_eq!(stored.family_name, "Kroeber");
    assert_eq!(app.store.count_authors().await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_update_shows_the_stored_author() {
    let app = TestApp::new();
    let author = ursula();
    app.store.insert_author(&author).await.unwrap();

    let response = app
        .post_form(&format!("/catalog/author/{}/update", author.id), "first_name=Ursula&family_name=Le+Guin")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Family name has non-alphanumeric characters."));
    assert!(body.contains("value=\"LeGuin\""));
}

#[tokio::test]
async fn referenced_author_is_not_deleted() {
    let app = TestApp::new();
    let author = ursula();
    app.store.insert_author(&author).await.unwrap();
    app.store
        .insert_book(&Book {
            id: Uuid::new_v4(),
            title: "The Dispossessed".into(),
            author_id: author.id,
            summary: "Anarres and Urras".into(),
            isbn: "9780061054884".into(),
            genre_ids: vec![],
        })
        .await
        .unwrap();

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", author.id), &format!("authorid={}", author.id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Delete the following books"));
    assert!(body.contains("The Dispossessed"));
    assert!(app.store.get_author(author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn unreferenced_author_is_deleted() {
    let app = TestApp::new();
    let author = ursula();
    app.store.insert_author(&author).await.unwrap();

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", author.id), &format!("authorid={}", author.id))
        .await;

    assert_eq!(location(&response), "/catalog/authors");
    assert!(app.store.get_author(author.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_page_for_missing_author_goes_to_the_list() {
    let app = TestApp::new();
    let response = app.get(&format!("/catalog/author/{}/delete", Uuid::new_v4())).await;
    assert_eq!(location(&response), "/catalog/authors");
}

#[tokio::test]
async fn long_names_are_accepted() {
    let app = TestApp::new();
    let family = "A".repeat(250);

    let response = app
        .post_form("/catalog/author/create", &format!("first_name=Ursula&family_name={}", family))
        .await;
    let url = location(&response);

    let authors = app.store.list_authors().await.unwrap();
    assert_eq!(authors[0].family_name, family);
    assert_eq!(authors[0].url(), url);
}

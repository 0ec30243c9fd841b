use axum::http::StatusCode;
use uuid::Uuid;

use library_catalog::{
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
    repository::CatalogStore,
};

use crate::{body_text, location, TestApp};

async fn seed(app: &TestApp) -> (Author, Genre, Genre) {
    let author = Author {
        id: Uuid::new_v4(),
        first_name: "Isaac".into(),
        family_name: "Asimov".into(),
        date_of_birth: None,
        date_of_death: None,
    };
    let scifi = Genre {
        id: Uuid::new_v4(),
        name: "Science Fiction".into(),
    };
    let classics = Genre {
        id: Uuid::new_v4(),
        name: "Classics".into(),
    };
    app.store.insert_author(&author).await.unwrap();
    app.store.insert_genre(&scifi).await.unwrap();
    app.store.insert_genre(&classics).await.unwrap();
    (author, scifi, classics)
}

#[tokio::test]
async fn repeated_genre_keys_are_all_stored() {
    let app = TestApp::new();
    let (author, scifi, classics) = seed(&app).await;

    let response = app
        .post_form(
            "/catalog/book/create",
            &format!(
                "title=Foundation&author={}&summary=Psychohistory&isbn=9780553293357&genre={}&genre={}",
                author.id, scifi.id, classics.id
            ),
        )
        .await;
    let url = location(&response);

    let books = app.store.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].url(), url);
    assert_eq!(books[0].genre_ids, vec![scifi.id, classics.id]);

    let page = body_text(app.get(&url).await).await;
    assert!(page.contains("Asimov, Isaac"));
    assert!(page.contains("Science Fiction"));
    assert!(page.contains("Classics"));
}

#[tokio::test]
async fn invalid_book_keeps_the_submitted_choices() {
    let app = TestApp::new();
    let (author, scifi, _) = seed(&app).await;

    let response = app
        .post_form(
            "/catalog/book/create",
            &format!("title=&author={}&summary=Robots&isbn=9780553294385&genre={}", author.id, scifi.id),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Title must not be empty."));
    assert!(body.contains(&format!("<option value=\"{}\" selected>", author.id)));
    assert!(body.contains(&format!("value=\"{}\" checked>", scifi.id)));
    assert_eq!(app.store.count_books().await.unwrap(), 0);
}

#[tokio::test]
async fn book_with_copies_is_not_deleted() {
    let app = TestApp::new();
    let (author, _, _) = seed(&app).await;
    let book = Book {
        id: Uuid::new_v4(),
        title: "I, Robot".into(),
        author_id: author.id,
        summary: "Three laws".into(),
        isbn: "9780553382563".into(),
        genre_ids: vec![],
    };
    app.store.insert_book(&book).await.unwrap();
    app.store
        .insert_book_instance(&BookInstance {
            id: Uuid::new_v4(),
            book_id: book.id,
            imprint: "Gnome Press, 1950".into(),
            status: BookInstanceStatus::Available,
            due_back: None,
        })
        .await
        .unwrap();

    let response = app
        .post_form(&format!("/catalog/book/{}/delete", book.id), &format!("bookid={}", book.id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Gnome Press, 1950"));
    assert_eq!(app.store.count_books().await.unwrap(), 1);
}

#[tokio::test]
async fn copy_without_status_is_in_maintenance() {
    let app = TestApp::new();
    let (author, _, _) = seed(&app).await;
    let book = Book {
        id: Uuid::new_v4(),
        title: "The Caves of Steel".into(),
        author_id: author.id,
        summary: "Baley and Olivaw".into(),
        isbn: "9780553293401".into(),
        genre_ids: vec![],
    };
    app.store.insert_book(&book).await.unwrap();

    let response = app
        .post_form(
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Doubleday&due_back=", book.id),
        )
        .await;
    let url = location(&response);

    let copies = app.store.list_book_instances().await.unwrap();
    assert_eq!(copies[0].status, BookInstanceStatus::Maintenance);
    assert_eq!(copies[0].url(), url);
    assert_eq!(
        app.store
            .count_book_instances(Some(BookInstanceStatus::Available))
            .await
            .unwrap(),
        0
    );

    let list = body_text(app.get("/catalog/bookinstances").await).await;
    assert!(list.contains("The Caves of Steel : Doubleday"));
}

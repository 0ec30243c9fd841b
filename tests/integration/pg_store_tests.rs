//! PostgreSQL store tests. The `#[ignore]`d ones need a live database:
//! DATABASE_URL=postgres://... cargo test -- --ignored

use sqlx::PgPool;
use uuid::Uuid;

use library_catalog::{
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
    repository::{CatalogStore, PgStore},
};

const SCHEMA: &str = include_str!("../../migrations/0001_catalog.sql");

#[test]
fn text_columns_are_unbounded() {
    // Escaping grows stored text, so no text column may carry a width.
    assert!(!SCHEMA.to_uppercase().contains("VARCHAR"));
    assert!(!SCHEMA.to_uppercase().contains("CHAR("));
}

fn author(family: &str) -> Author {
    Author {
        id: Uuid::new_v4(),
        first_name: "Ursula".into(),
        family_name: family.into(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1929, 10, 21),
        date_of_death: None,
    }
}

#[sqlx::test]
#[ignore]
async fn books_round_trip_genre_arrays(pool: PgPool) {
    let store = PgStore::new(pool);
    let writer = author("LeGuin");
    let fantasy = Genre {
        id: Uuid::new_v4(),
        name: "Fantasy".into(),
    };
    let classics = Genre {
        id: Uuid::new_v4(),
        name: "classics".into(),
    };
    store.insert_author(&writer).await.unwrap();
    store.insert_genre(&fantasy).await.unwrap();
    store.insert_genre(&classics).await.unwrap();

    let book = Book {
        id: Uuid::new_v4(),
        title: "A Wizard of Earthsea".into(),
        author_id: writer.id,
        summary: "Ged".into(),
        isbn: "9780547773742".into(),
        genre_ids: vec![fantasy.id, classics.id],
    };
    store.insert_book(&book).await.unwrap();

    assert_eq!(store.get_book(book.id).await.unwrap(), Some(book.clone()));
    assert_eq!(store.books_by_genre(classics.id).await.unwrap(), vec![book.clone()]);
    assert_eq!(store.books_by_author(writer.id).await.unwrap(), vec![book.clone()]);
    assert_eq!(
        store.genres_by_ids(&book.genre_ids).await.unwrap(),
        vec![classics.clone(), fantasy.clone()]
    );
    assert_eq!(store.find_genre_by_name("Fantasy").await.unwrap(), Some(fantasy));

    let retitled = Book {
        genre_ids: vec![],
        ..book.clone()
    };
    assert_eq!(store.update_book(&retitled).await.unwrap(), Some(retitled.clone()));
    assert!(store.books_by_genre(classics.id).await.unwrap().is_empty());
    assert!(store.delete_book(book.id).await.unwrap());
    assert!(!store.delete_book(book.id).await.unwrap());
}

#[sqlx::test]
#[ignore]
async fn copy_status_binds_to_the_enum(pool: PgPool) {
    let store = PgStore::new(pool);
    let book_id = Uuid::new_v4();
    for (imprint, status) in [
        ("Ace, 1968", BookInstanceStatus::Available),
        ("bantam, 1975", BookInstanceStatus::Loaned),
        ("Parnassus, 1968", BookInstanceStatus::Available),
    ] {
        store
            .insert_book_instance(&BookInstance {
                id: Uuid::new_v4(),
                book_id,
                imprint: imprint.into(),
                status,
                due_back: None,
            })
            .await
            .unwrap();
    }

    assert_eq!(store.count_book_instances(None).await.unwrap(), 3);
    assert_eq!(
        store
            .count_book_instances(Some(BookInstanceStatus::Available))
            .await
            .unwrap(),
        2
    );
    let imprints: Vec<_> = store
        .instances_by_book(book_id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.imprint)
        .collect();
    assert_eq!(imprints, vec!["Ace, 1968", "bantam, 1975", "Parnassus, 1968"]);
}

#[sqlx::test]
#[ignore]
async fn long_escaped_names_fit_the_schema(pool: PgPool) {
    let store = PgStore::new(pool);
    let writer = author(&"&amp;".repeat(60));
    store.insert_author(&writer).await.unwrap();
    store
        .insert_genre(&Genre {
            id: Uuid::new_v4(),
            name: "&amp;".repeat(60),
        })
        .await
        .unwrap();

    assert_eq!(store.get_author(writer.id).await.unwrap(), Some(writer));
    assert_eq!(store.count_genres().await.unwrap(), 1);

    let missing = author("Nobody");
    assert_eq!(store.update_author(&missing).await.unwrap(), None);
}

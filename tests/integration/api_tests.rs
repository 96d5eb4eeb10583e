//! API integration tests
//!
//! These tests run against a live server on localhost:8080 with a reachable
//! database. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

async fn create_author(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/CreateAuthor", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send CreateAuthor request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse author")
}

async fn create_book(client: &Client, title: &str, pages: i32) -> Value {
    let response = client
        .post(format!("{}/CreateBook", BASE_URL))
        .json(&json!({ "title": title, "pages": pages }))
        .send()
        .await
        .expect("Failed to send CreateBook request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse book")
}

async fn update_book(
    client: &Client,
    book_id: &str,
    title: &str,
    pages: i32,
    author_ids: &[&str],
    genre_id: Option<&str>,
) -> reqwest::Response {
    let mut body = json!({
        "bookIdForLookupReference": book_id,
        "newTitle": title,
        "newPageCount": pages,
        "authorsIds": author_ids,
    });
    if let Some(genre_id) = genre_id {
        body["genreId"] = json!(genre_id);
    }
    client
        .put(format!("{}/UpdateBook", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send UpdateBook request")
}

async fn get_book(client: &Client, book_id: &str) -> Option<Value> {
    let response = client
        .get(format!("{}/GetBooks", BASE_URL))
        .send()
        .await
        .expect("Failed to send GetBooks request");
    assert!(response.status().is_success());
    let books: Vec<Value> = response.json().await.expect("Failed to parse books");
    books.into_iter().find(|b| b["id"] == book_id)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_created_book_starts_without_associations() {
    let client = Client::new();

    let book = create_book(&client, "Fresh book", 10).await;

    assert!(book["id"].is_string());
    assert_eq!(book["title"], "Fresh book");
    assert_eq!(book["pages"], 10);
    assert_eq!(book["authorsIds"], json!([]));
    assert_eq!(book["genre"], Value::Null);
    assert!(book["createdAt"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_invalid_input() {
    let client = Client::new();

    let response = client
        .post(format!("{}/CreateBook", BASE_URL))
        .json(&json!({ "title": "", "pages": 10 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/CreateBook", BASE_URL))
        .json(&json!({ "title": "T", "pages": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_update_book_end_to_end() {
    let client = Client::new();

    let author = create_author(&client, "Bob").await;
    let author_id = author["id"].as_str().unwrap();

    let genres: Vec<Value> = client
        .get(format!("{}/GetGenres", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse genres");
    let genre = genres
        .iter()
        .find(|g| g["name"] == "Fantasy")
        .expect("Fantasy genre not seeded");
    let genre_id = genre["id"].as_str().unwrap();

    let book = create_book(&client, "T", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response = update_book(&client, book_id, "T2", 20, &[author_id], Some(genre_id)).await;
    assert!(response.status().is_success());

    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["title"], "T2");
    assert_eq!(updated["pages"], 20);
    assert_eq!(updated["authorsIds"], json!([author_id]));
    assert_eq!(updated["genre"]["id"], genre_id);
    assert_eq!(updated["genre"]["name"], "Fantasy");
}

#[tokio::test]
#[ignore]
async fn test_update_book_replaces_author_set() {
    let client = Client::new();

    let first = create_author(&client, "First").await;
    let second = create_author(&client, "Second").await;
    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    let book = create_book(&client, "Replaceable", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response = update_book(&client, book_id, "Replaceable", 10, &[first_id], None).await;
    assert!(response.status().is_success());

    let response = update_book(&client, book_id, "Replaceable", 10, &[second_id], None).await;
    assert!(response.status().is_success());

    // Full replacement, not a merge
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["authorsIds"], json!([second_id]));
}

#[tokio::test]
#[ignore]
async fn test_update_book_is_idempotent() {
    let client = Client::new();

    let author = create_author(&client, "Repeat").await;
    let author_id = author["id"].as_str().unwrap();

    let book = create_book(&client, "Idem", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response = update_book(&client, book_id, "Idem2", 20, &[author_id], None).await;
    let first: Value = response.json().await.expect("Failed to parse response");

    let response = update_book(&client, book_id, "Idem2", 20, &[author_id], None).await;
    let second: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(first, second);
}

#[tokio::test]
#[ignore]
async fn test_update_unknown_book_is_not_found() {
    let client = Client::new();

    let response = update_book(&client, "no-such-book", "T", 10, &[], None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_with_unknown_author_commits_nothing() {
    let client = Client::new();

    let book = create_book(&client, "Untouched", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response =
        update_book(&client, book_id, "Changed", 99, &["no-such-author"], None).await;
    assert_eq!(response.status(), 404);

    // The whole update rolled back: no field of the book changed
    let book = get_book(&client, book_id).await.expect("book disappeared");
    assert_eq!(book["title"], "Untouched");
    assert_eq!(book["pages"], 10);
    assert_eq!(book["authorsIds"], json!([]));
    assert_eq!(book["genre"], Value::Null);
}

#[tokio::test]
#[ignore]
async fn test_clearing_genre_by_omission() {
    let client = Client::new();

    let genres: Vec<Value> = client
        .get(format!("{}/GetGenres", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse genres");
    let genre_id = genres[0]["id"].as_str().unwrap();

    let book = create_book(&client, "Genreful", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response = update_book(&client, book_id, "Genreful", 10, &[], Some(genre_id)).await;
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["genre"]["id"], genre_id);

    let response = update_book(&client, book_id, "Genreful", 10, &[], None).await;
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["genre"], Value::Null);
}

#[tokio::test]
#[ignore]
async fn test_delete_book_returns_pre_deletion_state() {
    let client = Client::new();

    let book = create_book(&client, "Doomed", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response = client
        .delete(format!("{}/DeleteBook", BASE_URL))
        .query(&[("bookId", book_id)])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let deleted: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(deleted["id"], book_id);
    assert_eq!(deleted["title"], "Doomed");

    assert!(get_book(&client, book_id).await.is_none());

    // Deleting again is NotFound
    let response = client
        .delete(format!("{}/DeleteBook", BASE_URL))
        .query(&[("bookId", book_id)])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_author_rename_and_noop() {
    let client = Client::new();

    let author = create_author(&client, "Before").await;
    let author_id = author["id"].as_str().unwrap();

    let response = client
        .put(format!("{}/UpdateAuthor", BASE_URL))
        .json(&json!({
            "authorIdForLookupReference": author_id,
            "newName": "After"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let renamed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(renamed["name"], "After");

    // Renaming to the current name is a no-op that still succeeds
    let response = client
        .put(format!("{}/UpdateAuthor", BASE_URL))
        .json(&json!({
            "authorIdForLookupReference": author_id,
            "newName": "After"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_leaves_dangling_reference() {
    let client = Client::new();

    let author = create_author(&client, "Ephemeral").await;
    let author_id = author["id"].as_str().unwrap();

    let book = create_book(&client, "Orphaned", 10).await;
    let book_id = book["id"].as_str().unwrap();

    let response = update_book(&client, book_id, "Orphaned", 10, &[author_id], None).await;
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/DeleteAuthor", BASE_URL))
        .query(&[("authorId", author_id)])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // No cascade: the book still lists the now-dangling author id
    let book = get_book(&client, book_id).await.expect("book disappeared");
    assert_eq!(book["authorsIds"], json!([author_id]));
}

//! Integration tests against a running server
//!
//! Start the server with an empty database, then run with:
//! `cargo test --test api_tests -- --ignored --test-threads=1`

use reqwest::{header::LOCATION, redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

/// Client that keeps cookies and does not follow redirects
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{}{}", prefix, nanos)
}

/// Sign up a fresh user and log in; the client then holds the session cookie
async fn logged_in_client() -> (Client, String) {
    let client = client();
    let username = unique("reader");
    let creds = [("username", username.as_str()), ("password", "hunter22")];

    let response = client
        .post(format!("{}/signup", BASE_URL))
        .form(&creds)
        .send()
        .await
        .expect("Failed to send signup request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&creds)
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    (client, username)
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("No Location header")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
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
async fn test_homepage() {
    let response = client()
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["view"], "home");
    assert!(body["data"]["books"].is_array());
    assert!(body["data"]["users"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password() {
    let (_, username) = logged_in_client().await;

    let response = client()
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", username.as_str()), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["password"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_create_author_requires_login() {
    let response = client()
        .post(format!("{}/create_author", BASE_URL))
        .form(&[("name", "Frank Herbert"), ("biography", "Wrote Dune.")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fcreate_author");
}

#[tokio::test]
#[ignore]
async fn test_short_genre_name_rejected() {
    let (client, _) = logged_in_client().await;

    let response = client
        .post(format!("{}/create_genre", BASE_URL))
        .form(&[("name", "ab")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["errors"]["name"],
        "Your genre name needs to be between 3 and 80 chars."
    );
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let (client, username) = logged_in_client().await;

    let response = client
        .post(format!("{}/create_author", BASE_URL))
        .form(&[("name", "Frank Herbert"), ("biography", "Wrote Dune.")])
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let form: Value = client
        .get(format!("{}/create_book", BASE_URL))
        .send()
        .await
        .expect("Failed to load book form")
        .json()
        .await
        .expect("Failed to parse response");
    let author_id = form["data"]["choices"]["authors"]
        .as_array()
        .and_then(|authors| authors.last())
        .and_then(|a| a["id"].as_i64())
        .expect("No author to choose");

    let response = client
        .post(format!("{}/create_book", BASE_URL))
        .form(&[
            ("title", "Dune"),
            ("publish_date", "1965-08-01"),
            ("author", author_id.to_string().as_str()),
            ("audience", "adult"),
        ])
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let book_path = location(&response);
    assert!(book_path.starts_with("/book/"));

    let book: Value = client
        .get(format!("{}{}", BASE_URL, book_path))
        .send()
        .await
        .expect("Failed to load book")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["data"]["book"]["title"], "Dune");
    assert_eq!(book["flashes"][0], "New book was created successfully.");

    let favorite = book_path.replacen("/book/", "/favorite/", 1);
    for _ in 0..2 {
        let response = client
            .post(format!("{}{}", BASE_URL, favorite))
            .send()
            .await
            .expect("Failed to favorite");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), book_path);
    }

    let profile: Value = client
        .get(format!("{}/profile/{}", BASE_URL, username))
        .send()
        .await
        .expect("Failed to load profile")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(
        profile["data"]["profile"]["favorites"]
            .as_array()
            .map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
#[ignore]
async fn test_unknown_profile_not_found() {
    let response = client()
        .get(format!("{}/profile/{}", BASE_URL, unique("nobody")))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

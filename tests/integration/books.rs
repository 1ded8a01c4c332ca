//! Book catalog page tests

use axum::http::StatusCode;

use crate::common::{assert_redirect, json_body, TestApp};

async fn catalog() -> TestApp {
    let app = TestApp::new();
    app.add_book("War and Peace", "Leo Tolstoy", 1869).await;
    app.add_book("Crime and Punishment", "Fyodor Dostoevsky", 1866).await;
    app.add_book("Warlock", "Oakley Hall", 1958).await;
    app.add_book("The Idiot", "Fyodor Dostoevsky", 1869).await;
    app.add_book("Eugene Onegin", "Alexander Pushkin", 1833).await;
    app
}

#[tokio::test]
async fn test_search_without_query_prompts() {
    let app = catalog().await;

    for uri in ["/books/search", "/books/search?query="] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "book/search_book");
        assert_eq!(body["model"]["message"], "Please enter a search query.");
        assert!(body["model"]["books"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_search_matches_prefix_ignoring_case() {
    let app = catalog().await;

    let (status, body) = app.get("/books/search?query=wAr").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["model"]["message"].is_null());

    let titles: Vec<&str> = body["model"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["War and Peace", "Warlock"]);
}

#[tokio::test]
async fn test_search_without_match_reports_nothing_found() {
    let app = catalog().await;

    let (_, body) = app.get("/books/search?query=Peace").await;
    assert_eq!(body["model"]["message"], "Nothing matched your query.");
    assert!(body["model"]["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_defaults_to_three_per_page() {
    let app = catalog().await;

    let (status, body) = app.get("/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/books");

    let model = &body["model"];
    assert_eq!(model["books"].as_array().unwrap().len(), 3);
    assert_eq!(model["total_pages"], 2);
    assert_eq!(model["current_page"], 0);
    assert_eq!(model["total_books"], 5);
    assert_eq!(model["page_size"], 3);
    assert_eq!(model["sort_by_year"], false);
    assert_eq!(model["books"][0]["title"], "War and Peace");
}

#[tokio::test]
async fn test_list_sorted_by_year() {
    let app = catalog().await;

    let (_, body) = app.get("/books?sort_by_year=TRUE&page=0&size=3").await;
    let books = body["model"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 3);

    let years: Vec<i32> = books
        .iter()
        .map(|b| b["year"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(years.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(years, vec![1833, 1866, 1869]);
    assert_eq!(body["model"]["sort_by_year"], true);
}

#[tokio::test]
async fn test_list_second_page() {
    let app = catalog().await;

    let (_, body) = app.get("/books?page=1&size=3").await;
    let books = body["model"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(body["model"]["current_page"], 1);
}

#[tokio::test]
async fn test_list_rejects_zero_size() {
    let app = catalog().await;

    let (status, body) = app.get("/books?size=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_list_with_huge_page_size() {
    let app = catalog().await;

    let (status, body) = app.get(&format!("/books?size={}", i64::MAX)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["books"].as_array().unwrap().len(), 5);
    assert_eq!(body["model"]["total_pages"], 1);
    assert_eq!(body["model"]["page_size"], i64::MAX);
}

#[tokio::test]
async fn test_book_info_for_unassigned_book() {
    let app = catalog().await;
    app.add_user("Maria Ivanova").await;

    let (status, body) = app.get("/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/book_info");
    assert_eq!(body["model"]["book"]["title"], "War and Peace");
    assert!(body["model"]["holder"].is_null());
    assert_eq!(body["model"]["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_book_info_missing_book() {
    let app = catalog().await;

    let (status, body) = app.get("/books/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_create_form_is_empty() {
    let app = TestApp::new();

    let (status, body) = app.get("/books/new").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/add_book");
    assert!(body["model"]["book"]["title"].is_null());
    assert!(body["model"]["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_book_redirects_to_list() {
    let app = TestApp::new();

    let response = app
        .post_form("/books/new", "title=Fathers+and+Sons&author=Ivan+Turgenev&year=1862")
        .await;
    assert_redirect(&response, "/books");

    let (_, body) = app.get("/books/1").await;
    assert_eq!(body["model"]["book"]["title"], "Fathers and Sons");
    assert_eq!(body["model"]["book"]["year"], "1862");
}

#[tokio::test]
async fn test_create_ignores_posted_id() {
    let app = catalog().await;

    let response = app
        .post_form("/books/new", "id=1&title=Mother&author=Maxim+Gorky&year=1906")
        .await;
    assert_redirect(&response, "/books");

    let (_, body) = app.get("/books/1").await;
    assert_eq!(body["model"]["book"]["title"], "War and Peace");
    assert_eq!(app.repository.books.count().await.unwrap(), 6);
}

#[tokio::test]
async fn test_create_invalid_book_redisplays_form() {
    let app = TestApp::new();

    let response = app.post_form("/books/new", "title=&author=Anon&year=").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["view"], "book/add_book");
    assert_eq!(body["model"]["book"]["author"], "Anon");

    let fields: Vec<&str> = body["model"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "year"]);

    assert_eq!(app.repository.books.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_with_non_numeric_year_redisplays_form() {
    let app = TestApp::new();

    let response = app
        .post_form("/books/new", "title=Mother&author=Maxim+Gorky&year=abc")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["view"], "book/add_book");
    assert_eq!(body["model"]["book"]["year"], "abc");
    assert_eq!(body["model"]["errors"][0]["field"], "year");
    assert_eq!(body["model"]["errors"][0]["message"], "Year must be a number");
    assert_eq!(app.repository.books.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let app = catalog().await;

    let (status, body) = app.get("/books/edit/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/edit_book");
    assert_eq!(body["model"]["book"]["id"], 2);
    assert_eq!(body["model"]["book"]["title"], "Crime and Punishment");
}

#[tokio::test]
async fn test_edit_book_updates_and_keeps_holder() {
    let app = catalog().await;
    let reader = app.add_user("Nikolai Rostov").await;

    let response = app
        .post_form("/books/2/assign", &format!("user.id={}", reader.id))
        .await;
    assert_redirect(&response, "/books");

    let response = app
        .post_form("/books/edit/2", "id=99&title=The+Brothers+Karamazov&author=Fyodor+Dostoevsky&year=1880")
        .await;
    assert_redirect(&response, "/books");

    let (_, body) = app.get("/books/2").await;
    assert_eq!(body["model"]["book"]["id"], 2);
    assert_eq!(body["model"]["book"]["title"], "The Brothers Karamazov");
    assert_eq!(body["model"]["holder"]["full_name"], "Nikolai Rostov");
}

#[tokio::test]
async fn test_edit_invalid_book_redisplays_form() {
    let app = catalog().await;

    let response = app
        .post_form("/books/edit/3", "title=Warlock&author=Oakley+Hall&year=3000")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["view"], "book/edit_book");
    assert_eq!(body["model"]["book"]["id"], 3);
    assert_eq!(body["model"]["errors"][0]["field"], "year");

    let (_, body) = app.get("/books/3").await;
    assert_eq!(body["model"]["book"]["year"], "1958");
}

#[tokio::test]
async fn test_edit_with_non_numeric_year_redisplays_form() {
    let app = catalog().await;

    let response = app
        .post_form("/books/edit/1", "title=War+and+Peace&author=Leo+Tolstoy&year=18xx")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["view"], "book/edit_book");
    assert_eq!(body["model"]["book"]["id"], 1);
    assert_eq!(body["model"]["errors"][0]["field"], "year");

    let (_, body) = app.get("/books/1").await;
    assert_eq!(body["model"]["book"]["year"], "1869");
}

#[tokio::test]
async fn test_edit_missing_book() {
    let app = catalog().await;

    let response = app
        .post_form("/books/edit/77", "title=Ghost&author=Nobody&year=1900")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book() {
    let app = catalog().await;

    let response = app.post_form("/books/1", "").await;
    assert_redirect(&response, "/books");

    let (status, _) = app.get("/books/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.repository.books.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_delete_missing_book_leaves_catalog() {
    let app = catalog().await;

    let response = app.post_form("/books/999", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.repository.books.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_assign_then_release() {
    let app = catalog().await;
    let reader = app.add_user("Pierre Bezukhov").await;

    let response = app
        .post_form("/books/1/assign", &format!("user.id={}", reader.id))
        .await;
    assert_redirect(&response, "/books");

    let (_, body) = app.get("/books/1").await;
    assert_eq!(body["model"]["holder"]["id"], reader.id);
    assert_eq!(body["model"]["book"]["user"]["full_name"], "Pierre Bezukhov");

    let response = app.post_form("/books/1/release", "").await;
    assert_redirect(&response, "/books");

    let (_, body) = app.get("/books/1").await;
    assert!(body["model"]["holder"].is_null());
    assert!(body["model"]["book"]["user"].is_null());
}

#[tokio::test]
async fn test_assign_unknown_user() {
    let app = catalog().await;

    let response = app.post_form("/books/1/assign", "user.id=12").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "NoSuchUser");

    let (_, body) = app.get("/books/1").await;
    assert!(body["model"]["holder"].is_null());
}

#[tokio::test]
async fn test_assign_missing_book() {
    let app = catalog().await;
    let reader = app.add_user("Andrei Bolkonsky").await;

    let response = app
        .post_form("/books/50/assign", &format!("user.id={}", reader.id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_without_user() {
    let app = catalog().await;

    let response = app.post_form("/books/1/assign", "user.id=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_release_missing_book() {
    let app = catalog().await;

    let response = app.post_form("/books/31/release", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

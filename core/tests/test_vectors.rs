//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use pageturner_core::{ApiError, Book, BookQuery, BookstoreClient, HttpResponse, SortKey};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> BookstoreClient {
    BookstoreClient::new(BASE_URL)
}

fn parse_sort(s: &str) -> SortKey {
    match s {
        "popularity" => SortKey::Popularity,
        "newest" => SortKey::Newest,
        "rating" => SortKey::Rating,
        "title" => SortKey::Title,
        other => panic!("unknown sort: {other}"),
    }
}

/// Build a `BookQuery` from a vector's `input` object.
fn book_query(input: &serde_json::Value) -> BookQuery {
    let mut query = BookQuery::new();
    if let Some(categories) = input["categories"].as_array() {
        for category in categories {
            query = query.category(category.as_str().unwrap());
        }
    }
    if let Some(search) = input["search"].as_str() {
        query = query.search(search);
    }
    if let Some(sort) = input["sort"].as_str() {
        query = query.sort(parse_sort(sort));
    }
    if input["featured"].as_bool() == Some(true) {
        query = query.featured();
    }
    if let Some(limit) = input["limit"].as_u64() {
        query = query.limit(limit as u32);
    }
    if let Some(exclude) = input["exclude"].as_str() {
        query = query.exclude(exclude);
    }
    query
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_expected_error(name: &str, expected: &serde_json::Value, err: ApiError) {
    match expected.as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List books
// ---------------------------------------------------------------------------

#[test]
fn list_books_test_vectors() {
    let raw = include_str!("../../test-vectors/list_books.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = book_query(&case["input"]);
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list_books(&query);
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["url"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let result = c.parse_list_books(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error, result.unwrap_err());
        } else {
            let books = result.unwrap();
            let expected: Vec<Book> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(books, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Get book
// ---------------------------------------------------------------------------

#[test]
fn get_book_test_vectors() {
    let raw = include_str!("../../test-vectors/get_book.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_get_book(id);
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["url"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let result = c.parse_get_book(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error, result.unwrap_err());
        } else {
            let book = result.unwrap();
            let expected: Book = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(book, expected, "{name}: parsed result");

            let pages: Vec<&str> = case["expected_pages"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p.as_str().unwrap())
                .collect();
            assert_eq!(book.preview_pages(), pages, "{name}: preview pages");
        }
    }
}

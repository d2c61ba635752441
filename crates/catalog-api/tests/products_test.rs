//! Integration tests for the product endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

// --- GET /products/{id} ---

#[tokio::test]
async fn test_get_product_returns_price_in_major_units() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/products/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "id": 1, "name": "Blue Widget", "price": 19.99 }));
}

#[tokio::test]
async fn test_get_missing_product_returns_404_envelope() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/products/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "product 999999 not found");
}

#[tokio::test]
async fn test_get_product_with_non_numeric_id_returns_400() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/products/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");
}

// --- GET /products/search ---

#[tokio::test]
async fn test_search_wid_finds_blue_widget() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) = common::get_json(app, "/products/search?q=wid&page=1&pageSize=10").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["page"], 1);
    assert_eq!(json["pageSize"], 10);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Blue Widget");
    assert_eq!(items[0]["price"], 19.99);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let (_, lower) = common::get_json(common::build_test_app(), "/products/search?q=wid").await;
    let (_, upper) = common::get_json(common::build_test_app(), "/products/search?q=WID").await;

    assert_eq!(lower["items"], upper["items"]);
    assert_eq!(upper["total"], 1);
}

#[tokio::test]
async fn test_search_rejects_two_character_query() {
    let (status, json) = common::get_json(common::build_test_app(), "/products/search?q=ab").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");
    assert_eq!(json["details"][0]["field"], "q");
}

#[tokio::test]
async fn test_search_accepts_three_character_query() {
    let (status, json) = common::get_json(common::build_test_app(), "/products/search?q=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 0);
    assert_eq!(json["items"], json!([]));
}

#[tokio::test]
async fn test_search_without_query_lists_all_with_defaults() {
    let (status, json) = common::get_json(common::build_test_app(), "/products/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 1);
    assert_eq!(json["pageSize"], 20);
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"][0]["id"], 1);
    assert_eq!(json["items"][1]["id"], 2);
}

#[tokio::test]
async fn test_search_normalizes_non_positive_paging() {
    let (status, json) =
        common::get_json(common::build_test_app(), "/products/search?page=0&pageSize=-3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 1);
    assert_eq!(json["pageSize"], 1);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn test_search_exactly_full_page_returns_all_items() {
    let (status, full) =
        common::get_json(common::build_test_app(), "/products/search?pageSize=2").await;
    let (_, next) =
        common::get_json(common::build_test_app(), "/products/search?page=2&pageSize=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["items"].as_array().unwrap().len(), 2);
    assert_eq!(full["total"], 2);
    assert_eq!(next["items"], json!([]));
    assert_eq!(next["total"], 2);
}

#[tokio::test]
async fn test_search_page_beyond_end_is_empty_with_total() {
    let (status, json) =
        common::get_json(common::build_test_app(), "/products/search?page=3&pageSize=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"], json!([]));
    assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn test_search_with_non_integer_page_returns_400() {
    let (status, json) =
        common::get_json(common::build_test_app(), "/products/search?page=two").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");
}

// --- POST /products ---

#[tokio::test]
async fn test_create_product_returns_201_and_is_fetchable() {
    // Arrange
    let app = common::build_test_app();
    let body = json!({ "name": "  Green Gadget ", "price": 5.5, "tags": ["green", "GREEN"] });

    // Act
    let (status, created) = common::post_json(app.clone(), "/products", &body).await;
    let uri = format!("/products/{}", created["id"]);
    let (_, fetched) = common::get_json(app, &uri).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 3);
    assert_eq!(created["name"], "Green Gadget");
    assert_eq!(created["price"], 5.5);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_product_with_negative_price_returns_400() {
    let body = json!({ "name": "Broken", "price": -1.0 });

    let (status, json) = common::post_json(common::build_test_app(), "/products", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");
}

#[tokio::test]
async fn test_create_product_with_too_many_tags_returns_400() {
    let body = json!({ "name": "Tagged", "price": 1.0, "tags": ["a", "b", "c", "d", "e", "f"] });

    let (status, _) = common::post_json(common::build_test_app(), "/products", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_with_malformed_json_returns_400() {
    let (status, json) =
        common::post_raw(common::build_test_app(), "/products", "{\"name\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");
}

#[tokio::test]
async fn test_create_product_missing_name_returns_400() {
    let (status, _) =
        common::post_json(common::build_test_app(), "/products", &json!({ "price": 1.0 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- PUT /products/{id} ---

#[tokio::test]
async fn test_update_product_returns_committed_state() {
    // Arrange
    let app = common::build_test_app();
    let body = json!({ "name": "Updated Widget", "price": 15.25 });

    // Act
    let (status, json) = common::put_json(app.clone(), "/products/1", &body).await;
    let (_, fetched) = common::get_json(app, "/products/1").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "id": 1, "name": "Updated Widget", "price": 15.25 }));
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let body = json!({ "name": "Ghost", "price": 1.0 });

    let (status, json) =
        common::put_json(common::build_test_app(), "/products/999999", &body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_with_invalid_body_returns_400() {
    let body = json!({ "name": "", "price": 1.0 });

    let (status, _) = common::put_json(common::build_test_app(), "/products/1", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- DELETE /products/{id} ---

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (deleted, body) = common::delete(app.clone(), "/products/2").await;
    let (status, _) = common::get_json(app.clone(), "/products/2").await;
    let (again, _) = common::delete(app, "/products/2").await;

    // Assert
    assert_eq!(deleted, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(again, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_with_invalid_id_returns_400() {
    let (status, _) = common::delete(common::build_test_app(), "/products/0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! a `RecordStore` through full REST round-trips:
//! JSON → HTTP request → handler → RecordStore → backend → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$store_factory` must produce a fresh `RecordStore` over empty backends,
/// using the classic validation profile.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create` — POST 201 + full record with id 1
/// - `test_rest_get` / `test_rest_list`
/// - `test_rest_update_partial` — PUT merges supplied fields
/// - `test_rest_delete` — DELETE 200 + message, then GET 404
///
/// ## Error mapping
/// - `test_rest_create_invalid` — 400 with every failing field
/// - `test_rest_not_found` / `test_rest_non_integer_id`
/// - `test_rest_update_missing_before_validation`
/// - `test_rest_update_missing_with_malformed_body`
/// - `test_rest_update_existing_with_malformed_body`
///
/// ## Credentials
/// - `test_rest_register_and_login`
/// - `test_rest_register_duplicate`
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                let router = storage_harness::integration::build_test_router(store);
                storage_harness::integration::test_server(router)
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server.post("/students").json(&sanjay_payload()).await;
                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert_eq!(body["id"], 1);
                assert_eq!(body["name"], "Sanjay");
                assert_eq!(body["class"], "web-backend-engineering");
                assert_eq!(body["location"], "fullerton");
                assert_eq!(body["semester"], 6);
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                server.post("/students").json(&sanjay_payload()).await;

                let response = server.get("/students/1").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["id"], 1);
                assert_eq!(body["email"], "sanjay@gmail.com");
            }

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;
                server.post("/students").json(&sanjay_payload()).await;
                server.post("/students").json(&kalea_payload()).await;

                let response = server.get("/students").await;
                response.assert_status_ok();

                let body: Value = response.json();
                let students = body.as_array().unwrap();
                assert_eq!(students.len(), 2);
                assert_eq!(students[0]["name"], "Sanjay");
                assert_eq!(students[1]["name"], "Kalea");
                assert_eq!(students[1]["id"], 2);
            }

            #[tokio::test]
            async fn test_rest_update_partial() {
                let server = make_server().await;
                server.post("/students").json(&sanjay_payload()).await;

                let response = server
                    .put("/students/1")
                    .json(&json!({"semester": 7, "id": 40}))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["id"], 1);
                assert_eq!(body["semester"], 7);
                assert_eq!(body["name"], "Sanjay");

                let fetched: Value = server.get("/students/1").await.json();
                assert_eq!(fetched, body);
            }

            #[tokio::test]
            async fn test_rest_update_empty_body_is_noop() {
                let server = make_server().await;
                let created: Value = server.post("/students").json(&sanjay_payload()).await.json();

                let response = server.put("/students/1").json(&json!({})).await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>(), created);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                server.post("/students").json(&sanjay_payload()).await;

                let response = server.delete("/students/1").await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "Student deletion successful");

                server
                    .get("/students/1")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_ids_after_delete() {
                let server = make_server().await;
                server.post("/students").json(&sanjay_payload()).await;
                server.post("/students").json(&kalea_payload()).await;
                server.delete("/students/1").await.assert_status_ok();

                let body: Value = server.post("/students").json(&sanjay_payload()).await.json();
                assert_eq!(body["id"], 3);
            }

            // ==============================================================
            // Error mapping
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create_invalid() {
                let server = make_server().await;

                let response = server
                    .post("/students")
                    .json(&json!({
                        "name": "",
                        "age": 150,
                        "email": "not-an-email",
                        "class": "web",
                        "location": "fullerton",
                        "semester": 6
                    }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                let errors = body["error"].as_object().unwrap();
                assert!(errors.contains_key("name"));
                assert!(errors.contains_key("age"));
                assert_eq!(errors["email"], "Invalid email format");
                assert_eq!(errors.len(), 3);

                let listed: Value = server.get("/students").await.json();
                assert!(listed.as_array().unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_rest_not_found() {
                let server = make_server().await;

                server
                    .get("/students/999")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .delete("/students/999")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_non_integer_id() {
                let server = make_server().await;
                server
                    .get("/students/abc")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_update_missing_before_validation() {
                let server = make_server().await;
                server
                    .put("/students/999")
                    .json(&json!({"age": "old"}))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_update_missing_with_malformed_body() {
                let server = make_server().await;
                let response = server
                    .put("/students/999")
                    .content_type("application/json")
                    .bytes("{oops".into())
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Student not found");

                server
                    .put("/students/999")
                    .text("plain")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_update_existing_with_malformed_body() {
                let server = make_server().await;
                server.post("/students").json(&sanjay_payload()).await;

                let response = server
                    .put("/students/1")
                    .content_type("application/json")
                    .bytes("{oops".into())
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["error"]["request"],
                    "Request body must be JSON"
                );
            }

            // ==============================================================
            // Credentials
            // ==============================================================

            #[tokio::test]
            async fn test_rest_register_and_login() {
                let server = make_server().await;

                let response = server
                    .post("/register")
                    .json(&json!({"username": "alice", "password": "password!"}))
                    .await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "User registered successfully"
                );

                let response = server
                    .post("/login")
                    .json(&json!({"username": "alice", "password": "password!"}))
                    .await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>()["message"], "Login successful");

                server
                    .post("/login")
                    .json(&json!({"username": "alice", "password": "wrong"}))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            }

            #[tokio::test]
            async fn test_rest_register_duplicate() {
                let server = make_server().await;
                let credentials = json!({"username": "alice", "password": "password!"});

                server.post("/register").json(&credentials).await;
                let response = server.post("/register").json(&credentials).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["error"], "User already exists");
            }
        }
    };
}

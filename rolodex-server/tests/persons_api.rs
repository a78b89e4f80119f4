//! End-to-end checks of the person endpoints against an in-memory database

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use rolodex_server::db::{create_pool, schema};
use rolodex_server::{build_router, ServerConfig};

async fn app() -> Router {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    schema::bootstrap(&pool).await.unwrap();
    build_router(pool, &ServerConfig::default())
}

async fn post_person(app: &Router, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/persons/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get_person(app: &Router, id: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .uri(format!("/persons/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn create_person() {
    let app = app().await;
    let person = json!({
        "name": "John Doe",
        "email": "john@example.com",
        "phone_number": "1234567890",
        "educations": [],
        "skills": []
    });

    let (status, data) = post_person(&app, person.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["name"], person["name"]);
    assert_eq!(data["email"], person["email"]);
    assert_eq!(data["phone_number"], person["phone_number"]);
    assert!(data["id"].is_i64());
    assert_eq!(data["educations"], json!([]));
    assert_eq!(data["skills"], json!([]));
}

#[tokio::test]
async fn read_person_after_create() {
    let app = app().await;
    let (_, created) = post_person(
        &app,
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone_number": "9876543210",
            "educations": [],
            "skills": []
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, data) = get_person(&app, &id.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, created);
    assert_eq!(data["id"], id);
}

#[tokio::test]
async fn invalid_email_is_422_and_stores_nothing() {
    let app = app().await;
    let (status, data) = post_person(
        &app,
        json!({
            "name": "Invalid Person",
            "email": "invalid-email",
            "phone_number": "123",
            "educations": [],
            "skills": []
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data["error"], "validation_error");

    // The first id handed out would have been 1
    let (status, _) = get_person(&app, "1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_person_not_found() {
    let app = app().await;
    let (status, data) = get_person(&app, "9999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data["detail"], "Person not found");
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = app().await;
    let (status, _) = get_person(&app, "abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_person_with_education_and_skills() {
    let app = app().await;
    let person = json!({
        "name": "Alice Johnson",
        "email": "alice@example.com",
        "phone_number": "5551234567",
        "educations": [
            {"degree": "Bachelor's", "cgpa": 3.5, "institute": "Example University"}
        ],
        "skills": [
            {"skill_name": "Python", "proficiency": "Advanced"}
        ]
    });

    let (status, data) = post_person(&app, person.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["educations"], person["educations"]);
    assert_eq!(data["skills"], person["skills"]);

    let (_, fetched) = get_person(&app, &data["id"].to_string()).await;
    assert_eq!(fetched, data);
}

#[tokio::test]
async fn create_person_duplicate_email() {
    let app = app().await;
    let (_, first) = post_person(
        &app,
        json!({
            "name": "Bob Smith",
            "email": "bob@example.com",
            "phone_number": "1231231234",
            "educations": [],
            "skills": []
        }),
    )
    .await;

    let (status, data) = post_person(
        &app,
        json!({
            "name": "Another Bob",
            "email": "bob@example.com",
            "phone_number": "4564564567",
            "educations": [],
            "skills": []
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(data["detail"], "Email already registered");

    // First record is unchanged and no second id was handed out
    let (_, still_first) = get_person(&app, &first["id"].to_string()).await;
    assert_eq!(still_first, first);
    let next_id = first["id"].as_i64().unwrap() + 1;
    let (status, _) = get_person(&app, &next_id.to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn omitted_children_default_to_empty() {
    let app = app().await;
    let (status, data) = post_person(
        &app,
        json!({
            "name": "Minimal",
            "email": "minimal@example.com",
            "phone_number": "000"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["educations"], json!([]));
    assert_eq!(data["skills"], json!([]));
}

#[tokio::test]
async fn missing_required_field_is_422() {
    let app = app().await;
    let (status, data) = post_person(
        &app,
        json!({
            "name": "No Phone",
            "email": "nophone@example.com"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data["error"], "validation_error");
}

#[tokio::test]
async fn malformed_json_is_422() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/persons/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let app = app().await;
    let (_, created) = post_person(
        &app,
        json!({
            "name": "Repeat Reader",
            "email": "repeat@example.com",
            "phone_number": "111",
            "skills": [{"skill_name": "Rust", "proficiency": "Expert"}]
        }),
    )
    .await;
    let id = created["id"].to_string();

    let (_, first) = get_person(&app, &id).await;
    let (_, second) = get_person(&app, &id).await;
    assert_eq!(first, second);
    assert_eq!(first, created);
}

#[tokio::test]
async fn internationalised_email_is_accepted() {
    let app = app().await;
    let (status, data) = post_person(
        &app,
        json!({
            "name": "José",
            "email": "josé@example.com",
            "phone_number": "222"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["email"], "josé@example.com");
}

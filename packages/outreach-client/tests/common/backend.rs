//! In-process fake of the Outreach backend, served by axum on a random port.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_EMAIL: &str = "ada@example.com";
pub const TEST_PASSWORD: &str = "correct horse";

/// Requests the fake backend has seen, for assertions.
#[derive(Clone, Default)]
pub struct Recorded {
    pub extract_queries: Arc<Mutex<Vec<String>>>,
    pub feedback: Arc<Mutex<Vec<(i64, Value)>>>,
    pub email_requests: Arc<Mutex<Vec<Value>>>,
}

type ApiResponse = (StatusCode, Json<Value>);

/// Start the fake backend and return its base URL.
pub async fn spawn_backend() -> (String, Recorded) {
    let recorded = Recorded::default();

    let app = Router::new()
        .route("/signin", post(signin))
        .route("/signup", post(signup))
        .route("/extract", post(extract))
        .route("/query/:id/responses", get(query_responses))
        .route("/chat_history", get(chat_history))
        .route("/feedback/:id", post(feedback))
        .route("/generate_email", post(generate_email))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}

/// Three sources, deliberately not in score order.
///
/// Kept as raw JSON: `json!` sorts object keys, and the order of
/// `contacts_found` on the wire is what the client must preserve.
pub const SAMPLE_EXTRACTION: &str = r#"{
    "contacts_found": {
        "https://www.acme.example": {
            "socials": ["https://linkedin.com/company/acme"],
            "summary": "Industrial widgets",
            "contacts": [{"name": "Wile E.", "designation": "CTO", "email": "wile@acme.example"}],
            "fit_score": 42,
            "response_id": 101
        },
        "https://globex.example": {
            "socials": [],
            "summary": "Global exports",
            "contacts": [],
            "fit_score": 91,
            "response_id": 102
        },
        "https://initech.example": {
            "socials": [],
            "summary": "TPS reports as a service",
            "contacts": [{"phone": "+1 555 0100"}],
            "fit_score": 67,
            "response_id": 103
        }
    },
    "errors": {}
}"#;

fn sample_extraction() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        SAMPLE_EXTRACTION,
    )
        .into_response()
}

fn detail(status: StatusCode, message: &str) -> ApiResponse {
    (status, Json(json!({ "detail": message })))
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TEST_TOKEN);
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == expected)
        .unwrap_or(false)
}

async fn signin(Form(form): Form<HashMap<String, String>>) -> ApiResponse {
    let username = form.get("username").map(String::as_str);
    let password = form.get("password").map(String::as_str);

    if username == Some(TEST_EMAIL) && password == Some(TEST_PASSWORD) {
        (
            StatusCode::OK,
            Json(json!({ "access_token": TEST_TOKEN, "token_type": "bearer" })),
        )
    } else {
        detail(StatusCode::UNAUTHORIZED, "Incorrect username or password")
    }
}

async fn signup(Json(body): Json<Value>) -> ApiResponse {
    match body["email"].as_str() {
        Some(TEST_EMAIL) => detail(StatusCode::BAD_REQUEST, "Email already registered"),
        Some(_) if body["password"].is_string() => (
            StatusCode::OK,
            Json(json!({ "access_token": TEST_TOKEN, "token_type": "bearer" })),
        ),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "email"], "msg": "field required" }] })),
        ),
    }
}

async fn extract(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials").into_response();
    }

    let query = body["query"].as_str().unwrap_or_default().to_string();
    recorded.extract_queries.lock().unwrap().push(query.clone());

    if query == "explode" {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate search queries")
            .into_response();
    }
    sample_extraction()
}

async fn query_responses(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials").into_response();
    }

    match id {
        404 => detail(StatusCode::NOT_FOUND, "Query not found").into_response(),
        13 => (
            StatusCode::OK,
            Json(json!({ "contacts_found": { "https://bad.example": { "fit_score": "high" } } })),
        )
            .into_response(),
        _ => sample_extraction(),
    }
}

async fn chat_history(headers: HeaderMap) -> ApiResponse {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }

    (
        StatusCode::OK,
        Json(json!([
            { "id": 1, "query_text": "CRM consultancies in Austin", "created_at": "2025-05-01T09:00:00.000001" },
            { "id": 2, "query_text": "Dental labs in Leeds", "created_at": "2025-05-02T10:30:00Z" }
        ])),
    )
}

async fn feedback(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResponse {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }

    recorded.feedback.lock().unwrap().push((id, body));
    (StatusCode::OK, Json(json!({ "message": "Feedback recorded" })))
}

async fn generate_email(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }

    recorded.email_requests.lock().unwrap().push(body);
    (
        StatusCode::OK,
        Json(json!({ "subject": "Partnering with Acme", "body": "Hi Wile,\n\nLet's talk." })),
    )
}

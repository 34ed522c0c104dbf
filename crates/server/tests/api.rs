use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use server::{Messages, ServerState, fill, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();

    router(ServerState {
        engine: Arc::new(engine),
        messages: Arc::new(Messages::default()),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn establishment(name: &str, kind: &str) -> Value {
    json!({ "name": name, "type": kind })
}

fn release(date: &str, method: &str, name: &str, amount: &str) -> Value {
    json!({
        "date": date,
        "paymentMethod": method,
        "establishmentName": name,
        "amount": amount,
    })
}

#[tokio::test]
async fn establishment_create_returns_201_with_assigned_fields() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/establishments",
        Some(establishment("padaria stn", "Alimentação")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Padaria stn");
    assert_eq!(body["type"], "Alimentação");
    let id = body["id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[tokio::test]
async fn empty_establishment_list_answers_the_404_envelope() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/establishments", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(
        body["message"],
        fill(&Messages::default().not_found, "Estabelecimento")
    );
}

#[tokio::test]
async fn duplicate_establishment_answers_406() {
    let app = app().await;

    send(
        &app,
        "POST",
        "/api/establishments",
        Some(establishment("Padaria Stn", "Alimentação")),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/establishments",
        Some(establishment("Padaria Stn", "Alimentação")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["statusCode"], 406);
}

#[tokio::test]
async fn malformed_ids_are_rejected_before_the_store() {
    let app = app().await;

    for bad_id in ["123456", "5dcaad2526235a471cfcccar"] {
        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/establishments/{bad_id}"),
            Some(establishment("Padaria Stn", "Alimentação")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], Messages::default().incorrect_id_format);
    }
}

#[tokio::test]
async fn update_with_unknown_id_answers_404() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/establishments/5dcaad2526235a471cfcccaf",
        Some(establishment("Padaria Stn", "Alimentação")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        fill(&Messages::default().not_found_given_id, "estabelecimento")
    );
}

#[tokio::test]
async fn establishment_update_and_delete_round_trip() {
    let app = app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/establishments",
        Some(establishment("Padaria Stn", "Alimentação")),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/establishments/{id}"),
        Some(establishment("Padaria Nova Stn", "Alimentação")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Padaria Nova Stn");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, envelope) = send(
        &app,
        "DELETE",
        &format!("/api/establishments/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["statusCode"], 200);
    assert_eq!(
        envelope["message"],
        fill(&Messages::default().deleted_success, "Estabelecimento")
    );

    let (status, _) = send(&app, "GET", "/api/establishments", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn release_against_unknown_establishment_answers_404() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/releases",
        Some(release("2024-01-01", "credit", "Padaria Stn", "10.00")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        fill(
            &Messages::default().cant_found_given_name,
            "estabelecimento"
        )
    );
}

#[tokio::test]
async fn release_amounts_render_with_two_decimals() {
    let app = app().await;

    send(
        &app,
        "POST",
        "/api/establishments",
        Some(establishment("Padaria Stn", "Food")),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/releases",
        Some(release("2024-01-01", "credit", "Padaria Stn", "10.5")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], "10.50");
    assert_eq!(body["paymentMethod"], "credit");
}

#[tokio::test]
async fn statements_group_and_sum_the_ledger() {
    let app = app().await;

    send(
        &app,
        "POST",
        "/api/establishments",
        Some(establishment("Padaria Stn", "Food")),
    )
    .await;
    for (method, amount) in [("credit", "10.00"), ("credit", "5.50"), ("debit", "2.00")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/releases",
            Some(release("2024-01-01", method, "Padaria Stn", amount)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/statements", None).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2024-01-01");
    assert_eq!(rows[0]["type"], "Food");
    assert_eq!(rows[0]["paymentMethod"], "credit");
    assert_eq!(rows[0]["paymentMethodDisplay"], "Crédito");
    assert_eq!(rows[0]["totalAmount"], "15.50");
    assert_eq!(rows[1]["paymentMethod"], "debit");
    assert_eq!(rows[1]["totalAmount"], "2.00");
}

#[tokio::test]
async fn statements_without_releases_answer_404() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/statements", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        fill(&Messages::default().not_found, "Lançamentos")
    );
}

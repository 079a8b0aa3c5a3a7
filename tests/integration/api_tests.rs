//! API integration tests
//!
//! These run against a live server backed by a migrated database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8089/api/v1";

/// Helper to create a participant and return its id
async fn create_participant(client: &Client, nom: &str, prenom: &str, tache: &str) -> i64 {
    let response = client
        .post(format!("{}/participants", BASE_URL))
        .json(&json!({ "nom": nom, "prenom": prenom, "tache": tache }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id_part"].as_i64().expect("No id in response")
}

/// Helper to create an event and return its body
async fn create_event(client: &Client, description: &str, start: &str, end: &str) -> Value {
    let response = client
        .post(format!("{}/events", BASE_URL))
        .json(&json!({ "description": description, "date_debut": start, "date_fin": end }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
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
async fn test_create_participant_rejects_empty_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/participants", BASE_URL))
        .json(&json!({ "nom": "", "prenom": "Ahmed", "tache": "INVITE" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_affect_participant_to_event() {
    let client = Client::new();
    let id = create_participant(&client, "Test", "Participant", "INVITE").await;
    let event = create_event(&client, "Affectation test", "2030-01-10", "2030-01-11").await;

    let response = client
        .put(format!("{}/events/participants/{}", BASE_URL, id))
        .json(&event)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["participants"]
        .as_array()
        .expect("No participants")
        .contains(&json!(id)));

    let participant: Value = client
        .get(format!("{}/participants/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(participant["events"]
        .as_array()
        .expect("No events")
        .contains(&body["id_event"]));
}

#[tokio::test]
#[ignore]
async fn test_affect_unknown_participant() {
    let client = Client::new();
    let event = create_event(&client, "Unknown participant test", "2030-02-01", "2030-02-01").await;

    let response = client
        .put(format!("{}/events/participants/{}", BASE_URL, i32::MAX))
        .json(&event)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_affect_logistics_and_list_by_dates() {
    let client = Client::new();
    create_event(&client, "Logistics window test", "2031-03-05", "2031-03-06").await;

    let response = client
        .put(format!("{}/logistics/Logistics window test", BASE_URL))
        .json(&json!({
            "description": "Sound system",
            "reserve": true,
            "prix_unit": 100.0,
            "quantite": 5
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let logistics: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .get(format!("{}/logistics/dates?start=2031-03-01&end=2031-03-31", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.as_array().expect("Not an array").contains(&logistics));
}

#[tokio::test]
#[ignore]
async fn test_logistics_dates_invalid_date() {
    let client = Client::new();

    let response = client
        .get(format!("{}/logistics/dates?start=yesterday&end=2031-03-31", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_calculate_cost() {
    let client = Client::new();

    let response = client
        .post(format!("{}/events/cost", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["updated"].is_number());
}

//! API handlers for the events server REST endpoints

pub mod events;
pub mod health;
pub mod logistics;
pub mod openapi;
pub mod participants;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::AppState;

/// API v1 routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Participants
        .route("/participants", get(participants::list_participants))
        .route("/participants", post(participants::create_participant))
        .route("/participants/:id", get(participants::get_participant))
        // Events
        .route("/events", get(events::list_events))
        .route("/events", post(events::create_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/participants", put(events::affect_participants))
        .route("/events/participants/:id", put(events::affect_participant))
        .route("/events/cost", post(events::calculate_cost))
        // Logistics
        .route("/logistics", get(logistics::list_logistics))
        .route("/logistics/dates", get(logistics::logistics_dates))
        .route("/logistics/:description", put(logistics::affect_logistics))
        .with_state(state)
}

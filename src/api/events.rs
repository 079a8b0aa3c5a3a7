//! Events API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::event::{CreateEvent, Event},
    services::events::OrganizerFilter,
};

/// Cost recomputation outcome
#[derive(Serialize, ToSchema)]
pub struct CostResponse {
    /// Number of events whose cost was recomputed
    pub updated: usize,
}

fn check_dates(event: &Event) -> AppResult<()> {
    if event.date_fin < event.date_debut {
        return Err(AppError::Validation(
            "date_fin must not precede date_debut".to_string(),
        ));
    }
    Ok(())
}

/// List events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Events list", body = Vec<Event>)
    )
)]
pub async fn list_events(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.events.list_events().await?;
    Ok(Json(events))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.get_event(id).await?;
    Ok(Json(event))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid event", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    data.validate()?;
    let event = state.services.events.create_event(data.into()).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Save an event and affect an existing participant to it
#[utoipa::path(
    put,
    path = "/events/participants/{id}",
    tag = "events",
    params(("id" = i32, Path, description = "Participant ID")),
    request_body = Event,
    responses(
        (status = 200, description = "Event saved with the participant", body = Event),
        (status = 404, description = "Participant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn affect_participant(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(event): Json<Event>,
) -> AppResult<Json<Event>> {
    check_dates(&event)?;
    let event = state.services.events.add_affect_even_participant(event, id).await?;
    Ok(Json(event))
}

/// Save an event with the participants it lists (unknown ones are dropped)
#[utoipa::path(
    put,
    path = "/events/participants",
    tag = "events",
    request_body = Event,
    responses(
        (status = 200, description = "Event saved with its participants", body = Event)
    )
)]
pub async fn affect_participants(
    State(state): State<crate::AppState>,
    Json(event): Json<Event>,
) -> AppResult<Json<Event>> {
    check_dates(&event)?;
    let event = state.services.events.add_affect_even_participant_all(event).await?;
    Ok(Json(event))
}

/// Recompute costs of the configured organizer's events
#[utoipa::path(
    post,
    path = "/events/cost",
    tag = "events",
    responses(
        (status = 200, description = "Costs recomputed", body = CostResponse)
    )
)]
pub async fn calculate_cost(State(state): State<crate::AppState>) -> AppResult<Json<CostResponse>> {
    let filter = OrganizerFilter::from(&state.config.cost);
    let updated = state.services.events.calcul_cout(&filter).await?;
    Ok(Json(CostResponse { updated }))
}

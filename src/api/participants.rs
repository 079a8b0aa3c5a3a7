//! Participants API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::participant::{CreateParticipant, Participant},
};

/// List all participants
#[utoipa::path(
    get,
    path = "/participants",
    tag = "participants",
    responses(
        (status = 200, description = "Participants list", body = Vec<Participant>)
    )
)]
pub async fn list_participants(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Participant>>> {
    let participants = state.services.events.list_participants().await?;
    Ok(Json(participants))
}

/// Get participant by ID
#[utoipa::path(
    get,
    path = "/participants/{id}",
    tag = "participants",
    params(("id" = i32, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant details", body = Participant),
        (status = 404, description = "Participant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_participant(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Participant>> {
    let participant = state.services.events.get_participant(id).await?;
    Ok(Json(participant))
}

/// Create a participant
#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = CreateParticipant,
    responses(
        (status = 201, description = "Participant created", body = Participant),
        (status = 400, description = "Invalid participant", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_participant(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateParticipant>,
) -> AppResult<(StatusCode, Json<Participant>)> {
    data.validate()?;
    let participant = state.services.events.add_participant(data.into()).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

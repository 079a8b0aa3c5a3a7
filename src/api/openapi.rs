//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{events, health, logistics, participants};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events Project API",
        version = "0.1.0",
        description = "Event, participant and logistics management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Participants
        participants::list_participants,
        participants::get_participant,
        participants::create_participant,
        // Events
        events::list_events,
        events::get_event,
        events::create_event,
        events::affect_participant,
        events::affect_participants,
        events::calculate_cost,
        // Logistics
        logistics::list_logistics,
        logistics::affect_logistics,
        logistics::logistics_dates,
    ),
    components(
        schemas(
            // Participants
            crate::models::participant::Participant,
            crate::models::participant::CreateParticipant,
            crate::models::enums::Tache,
            // Events
            crate::models::event::Event,
            crate::models::event::CreateEvent,
            events::CostResponse,
            // Logistics
            crate::models::logistics::Logistics,
            crate::models::logistics::CreateLogistics,
            crate::models::logistics::LogisticsDatesQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "participants", description = "Participant management"),
        (name = "events", description = "Event management and affectations"),
        (name = "logistics", description = "Logistics management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_affectation_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/events/participants/{id}"));
        assert!(doc.paths.paths.contains_key("/logistics/dates"));
    }
}

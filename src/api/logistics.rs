//! Logistics API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::logistics::{CreateLogistics, Logistics, LogisticsDatesQuery},
};

fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", field, value)))
}

/// List all logistics
#[utoipa::path(
    get,
    path = "/logistics",
    tag = "logistics",
    responses(
        (status = 200, description = "Logistics list", body = Vec<Logistics>)
    )
)]
pub async fn list_logistics(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Logistics>>> {
    let logistics = state.services.events.list_logistics().await?;
    Ok(Json(logistics))
}

/// Attach a logistics item to the event with the given description
#[utoipa::path(
    put,
    path = "/logistics/{description}",
    tag = "logistics",
    params(("description" = String, Path, description = "Exact event description")),
    request_body = CreateLogistics,
    responses(
        (status = 200, description = "Logistics saved and attached", body = Logistics),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn affect_logistics(
    State(state): State<crate::AppState>,
    Path(description): Path<String>,
    Json(data): Json<CreateLogistics>,
) -> AppResult<Json<Logistics>> {
    data.validate()?;
    let logistics = state
        .services
        .events
        .add_affect_log(data.into(), &description)
        .await?;
    Ok(Json(logistics))
}

/// Logistics of the events held within a date window
#[utoipa::path(
    get,
    path = "/logistics/dates",
    tag = "logistics",
    params(LogisticsDatesQuery),
    responses(
        (status = 200, description = "Logistics of matching events", body = Vec<Logistics>),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn logistics_dates(
    State(state): State<crate::AppState>,
    Query(query): Query<LogisticsDatesQuery>,
) -> AppResult<Json<Vec<Logistics>>> {
    let start = parse_date(&query.start, "start")?;
    let end = parse_date(&query.end, "end")?;
    let logistics = state.services.events.get_logistics_dates(start, end).await?;
    Ok(Json(logistics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-01", "start").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(matches!(parse_date("01/05/2024", "start"), Err(AppError::BadRequest(_))));
    }
}

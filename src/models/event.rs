//! Event model

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{logistics::Logistics, participant::Participant};

/// Event record with its associations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Assigned by the store on first save
    pub id_event: Option<i32>,
    pub description: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    /// Derived from reserved logistics, see [`Event::recompute_cout`]
    #[serde(default)]
    pub cout: f64,
    /// Identities of the attached participants
    #[serde(default)]
    pub participants: BTreeSet<i32>,
    #[serde(default)]
    pub logistics: Vec<Logistics>,
}

impl Event {
    pub fn new(description: impl Into<String>, date_debut: NaiveDate, date_fin: NaiveDate) -> Self {
        Self {
            id_event: None,
            description: description.into(),
            date_debut,
            date_fin,
            cout: 0.0,
            participants: BTreeSet::new(),
            logistics: Vec::new(),
        }
    }

    /// Record the event/participant association on both sides.
    ///
    /// A participant without identity cannot be linked and is left untouched.
    /// The participant side only receives the event identity once the event
    /// itself has been saved.
    pub fn affect_participant(&mut self, participant: &mut Participant) -> bool {
        let Some(id_part) = participant.id_part else {
            return false;
        };
        self.participants.insert(id_part);
        if let Some(id_event) = self.id_event {
            participant.events.insert(id_event);
        }
        true
    }

    /// Attach a logistics item, replacing any entry with the same identity
    pub fn affect_logistics(&mut self, logistics: Logistics) {
        match logistics.id_log {
            Some(id) => {
                if let Some(existing) = self.logistics.iter_mut().find(|l| l.id_log == Some(id)) {
                    *existing = logistics;
                } else {
                    self.logistics.push(logistics);
                }
            }
            None => self.logistics.push(logistics),
        }
    }

    /// Recompute `cout` from scratch over the reserved logistics
    pub fn recompute_cout(&mut self) -> f64 {
        self.cout = self
            .logistics
            .iter()
            .fold(0.0, |total, item| total + item.cost());
        self.cout
    }
}

/// Raw `events` row (associations are loaded separately)
#[derive(Debug, sqlx::FromRow)]
pub struct EventRow {
    pub id_event: i32,
    pub description: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub cout: f64,
}

impl EventRow {
    pub fn into_event(self, participants: BTreeSet<i32>, logistics: Vec<Logistics>) -> Event {
        Event {
            id_event: Some(self.id_event),
            description: self.description,
            date_debut: self.date_debut,
            date_fin: self.date_fin,
            cout: self.cout,
            participants,
            logistics,
        }
    }
}

/// Create event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_dates"))]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Start date (YYYY-MM-DD)
    pub date_debut: NaiveDate,
    /// End date (YYYY-MM-DD)
    pub date_fin: NaiveDate,
}

fn validate_dates(data: &CreateEvent) -> Result<(), ValidationError> {
    if data.date_fin < data.date_debut {
        return Err(ValidationError::new("date_fin_before_date_debut"));
    }
    Ok(())
}

impl From<CreateEvent> for Event {
    fn from(data: CreateEvent) -> Self {
        Event::new(data.description, data.date_debut, data.date_fin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Tache;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn logistics(id: i32, reserve: bool, prix_unit: f64, quantite: i32) -> Logistics {
        Logistics {
            id_log: Some(id),
            description: format!("Logistics {}", id),
            reserve,
            prix_unit,
            quantite,
        }
    }

    #[test]
    fn test_affect_participant_updates_both_sides() {
        let mut event = Event::new("Gala", date(2024, 5, 1), date(2024, 5, 2));
        event.id_event = Some(7);
        let mut participant = Participant::new("Tounsi", "Ahmed", Tache::Organisateur);
        participant.id_part = Some(3);

        assert!(event.affect_participant(&mut participant));
        assert!(event.participants.contains(&3));
        assert!(participant.events.contains(&7));
    }

    #[test]
    fn test_affect_participant_without_identity() {
        let mut event = Event::new("Gala", date(2024, 5, 1), date(2024, 5, 2));
        let mut participant = Participant::new("Tounsi", "Ahmed", Tache::Invite);

        assert!(!event.affect_participant(&mut participant));
        assert!(event.participants.is_empty());
    }

    #[test]
    fn test_affect_logistics_dedupes_by_identity() {
        let mut event = Event::new("Gala", date(2024, 5, 1), date(2024, 5, 2));
        event.affect_logistics(logistics(1, false, 10.0, 1));
        event.affect_logistics(logistics(1, true, 10.0, 2));
        event.affect_logistics(logistics(2, true, 5.0, 1));

        assert_eq!(event.logistics.len(), 2);
        assert!(event.logistics[0].reserve);
    }

    #[test]
    fn test_recompute_cout_ignores_unreserved() {
        let mut event = Event::new("Gala", date(2024, 5, 1), date(2024, 5, 2));
        event.cout = 999.0;
        event.affect_logistics(logistics(1, true, 100.0, 5));
        event.affect_logistics(logistics(2, false, 40.0, 10));

        assert_eq!(event.recompute_cout(), 500.0);
        assert_eq!(event.cout, 500.0);
    }

    #[test]
    fn test_recompute_cout_without_logistics_is_positive_zero() {
        let mut event = Event::new("Gala", date(2024, 5, 1), date(2024, 5, 2));
        event.cout = 12.0;

        assert_eq!(event.recompute_cout(), 0.0);
        assert!(event.cout.is_sign_positive());
    }

    #[test]
    fn test_create_event_rejects_inverted_dates() {
        let data = CreateEvent {
            description: "Gala".to_string(),
            date_debut: date(2024, 5, 2),
            date_fin: date(2024, 5, 1),
        };
        assert!(data.validate().is_err());
    }
}

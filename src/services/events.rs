//! Event coordination service
//!
//! Links participants and logistics to events, looks logistics up by date
//! window and recomputes event costs from reserved logistics.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{
    config::CostConfig,
    error::{AppError, AppResult},
    models::{Event, Logistics, Participant, Tache},
    repository::Repository,
};

/// Participant attributes selecting the events whose cost is recomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerFilter {
    pub nom: String,
    pub prenom: String,
    pub tache: Tache,
}

impl Default for OrganizerFilter {
    fn default() -> Self {
        Self {
            nom: "Tounsi".to_string(),
            prenom: "Ahmed".to_string(),
            tache: Tache::Organisateur,
        }
    }
}

impl From<&CostConfig> for OrganizerFilter {
    fn from(config: &CostConfig) -> Self {
        Self {
            nom: config.nom.clone(),
            prenom: config.prenom.clone(),
            tache: config.tache,
        }
    }
}

#[derive(Clone)]
pub struct EventServices {
    repository: Repository,
}

impl EventServices {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Persist a new participant
    pub async fn add_participant(&self, participant: Participant) -> AppResult<Participant> {
        self.repository.participants.save(participant).await
    }

    pub async fn list_participants(&self) -> AppResult<Vec<Participant>> {
        self.repository.participants.find_all().await
    }

    pub async fn get_participant(&self, id: i32) -> AppResult<Participant> {
        self.repository
            .participants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::participant_not_found(id))
    }

    pub async fn create_event(&self, event: Event) -> AppResult<Event> {
        self.repository.events.save(event).await
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.repository.events.find_all().await
    }

    pub async fn get_event(&self, id: i32) -> AppResult<Event> {
        self.repository
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::event_not_found(id))
    }

    pub async fn list_logistics(&self) -> AppResult<Vec<Logistics>> {
        self.repository.logistics.find_all().await
    }

    /// Keep the stored logistics and cost of an already saved event.
    ///
    /// Affectation bodies only carry participant changes; logistics are
    /// attached through `add_affect_log` and the cost through `calcul_cout`.
    async fn keep_stored_logistics(&self, mut event: Event) -> AppResult<Event> {
        if let Some(id) = event.id_event {
            let stored = self
                .repository
                .events
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::event_not_found(id))?;
            event.logistics = stored.logistics;
            event.cout = stored.cout;
        }
        Ok(event)
    }

    /// Attach the participant `id_part` to `event` and persist the event
    pub async fn add_affect_even_participant(&self, event: Event, id_part: i32) -> AppResult<Event> {
        let mut participant = self
            .repository
            .participants
            .find_by_id(id_part)
            .await?
            .ok_or_else(|| AppError::participant_not_found(id_part))?;

        let mut event = self.keep_stored_logistics(event).await?;
        event.affect_participant(&mut participant);
        let saved = self.repository.events.save(event).await?;

        tracing::info!(
            "Participant {} affected to event {:?}",
            id_part,
            saved.id_event
        );
        Ok(saved)
    }

    /// Confirm every participant already listed on `event` and persist it.
    ///
    /// Listed participants that do not exist are skipped and dropped from the
    /// event instead of failing the whole affectation.
    pub async fn add_affect_even_participant_all(&self, event: Event) -> AppResult<Event> {
        let mut event = self.keep_stored_logistics(event).await?;
        let listed: Vec<i32> = std::mem::take(&mut event.participants).into_iter().collect();

        for id_part in listed {
            match self.repository.participants.find_by_id(id_part).await? {
                Some(mut participant) => {
                    event.affect_participant(&mut participant);
                }
                None => {
                    tracing::warn!(
                        "Participant {} not found, skipped for event {:?}",
                        id_part,
                        event.description
                    );
                }
            }
        }

        self.repository.events.save(event).await
    }

    /// Attach `logistics` to the event described by `description`
    pub async fn add_affect_log(&self, logistics: Logistics, description: &str) -> AppResult<Logistics> {
        let mut event = self
            .repository
            .events
            .find_by_description(description)
            .await?
            .ok_or_else(|| AppError::event_not_found(format!("{:?}", description)))?;

        let saved = self.repository.logistics.save(logistics).await?;
        event.affect_logistics(saved.clone());
        self.repository.events.save(event).await?;

        Ok(saved)
    }

    /// Logistics of all events lying within `[start, end]`, deduplicated
    pub async fn get_logistics_dates(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Logistics>> {
        let events = self.repository.events.find_by_date_range(start, end).await?;

        let mut seen = HashSet::new();
        let logistics = events
            .into_iter()
            .flat_map(|event| event.logistics)
            .filter(|item| match item.id_log {
                Some(id) => seen.insert(id),
                None => true,
            })
            .collect();

        Ok(logistics)
    }

    /// Recompute and persist the cost of every event the organizer takes part
    /// in. Returns the number of events updated.
    pub async fn calcul_cout(&self, filter: &OrganizerFilter) -> AppResult<usize> {
        let events = self
            .repository
            .events
            .find_by_participant_attributes(&filter.nom, &filter.prenom, filter.tache)
            .await?;

        let count = events.len();
        for mut event in events {
            let cout = event.recompute_cout();
            tracing::info!("Cost of event {:?} is {}", event.description, cout);
            self.repository.events.save(event).await?;
        }

        Ok(count)
    }
}

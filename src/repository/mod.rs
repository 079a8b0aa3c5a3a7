//! Repository layer for database operations
//!
//! Each store is an async trait so the services can run against PostgreSQL
//! in production and against mocks in unit tests.

pub mod events;
pub mod logistics;
pub mod participants;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Event, Logistics, Participant, Tache},
};

/// Event store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert or update the event together with its associations.
    /// Assigns an identity when the event is new.
    async fn save(&self, event: Event) -> AppResult<Event>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Event>>;
    /// Exact description match; `None` when absent or ambiguous
    async fn find_by_description(&self, description: &str) -> AppResult<Option<Event>>;
    /// Events lying entirely inside `[start, end]`
    async fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Event>>;
    /// Events having a participant with the given attributes
    async fn find_by_participant_attributes(
        &self,
        nom: &str,
        prenom: &str,
        tache: Tache,
    ) -> AppResult<Vec<Event>>;
    async fn find_all(&self) -> AppResult<Vec<Event>>;
}

/// Participant store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn save(&self, participant: Participant) -> AppResult<Participant>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Participant>>;
    async fn find_all(&self) -> AppResult<Vec<Participant>>;
}

/// Logistics store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogisticsRepository: Send + Sync {
    async fn save(&self, logistics: Logistics) -> AppResult<Logistics>;
    async fn find_all(&self) -> AppResult<Vec<Logistics>>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub events: Arc<dyn EventRepository>,
    pub participants: Arc<dyn ParticipantRepository>,
    pub logistics: Arc<dyn LogisticsRepository>,
}

impl Repository {
    /// Create PostgreSQL-backed stores sharing the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            events: Arc::new(events::PgEventRepository::new(pool.clone())),
            participants: Arc::new(participants::PgParticipantRepository::new(pool.clone())),
            logistics: Arc::new(logistics::PgLogisticsRepository::new(pool)),
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn from_parts(
        events: Arc<dyn EventRepository>,
        participants: Arc<dyn ParticipantRepository>,
        logistics: Arc<dyn LogisticsRepository>,
    ) -> Self {
        Self {
            events,
            participants,
            logistics,
        }
    }
}

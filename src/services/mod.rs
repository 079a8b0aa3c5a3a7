//! Business logic services

pub mod cost_job;
pub mod events;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub events: events::EventServices,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            events: events::EventServices::new(repository),
        }
    }
}

//! Periodic event cost recomputation
//!
//! Runs `calcul_cout` for the configured organizer on a fixed period until
//! shutdown is signalled.

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle};

use super::events::{EventServices, OrganizerFilter};

pub struct CostJob {
    service: EventServices,
    filter: OrganizerFilter,
    period: Duration,
}

impl CostJob {
    pub fn new(service: EventServices, filter: OrganizerFilter, period: Duration) -> Self {
        Self {
            service,
            filter,
            period,
        }
    }

    /// Spawn the job; a zero period disables it
    pub fn start(self, mut shutdown: watch::Receiver<bool>) -> Option<JoinHandle<()>> {
        if self.period.is_zero() {
            tracing::info!("Cost recomputation job disabled");
            return None;
        }

        Some(tokio::spawn(async move {
            tracing::info!(
                "Cost recomputation job started (every {}s for {} {} / {})",
                self.period.as_secs(),
                self.filter.prenom,
                self.filter.nom,
                self.filter.tache
            );

            let mut interval = tokio::time::interval(self.period);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match self.service.calcul_cout(&self.filter).await {
                            Ok(count) => tracing::debug!("Recomputed cost of {} events", count),
                            Err(e) => tracing::warn!("Cost recomputation failed: {}", e),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Cost recomputation job stopped");
        }))
    }
}

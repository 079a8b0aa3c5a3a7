//! Participant model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::Tache;

/// Participant record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    /// Assigned by the store on first save
    pub id_part: Option<i32>,
    pub nom: String,
    pub prenom: String,
    pub tache: Tache,
    /// Identities of the events this participant takes part in
    #[serde(default)]
    pub events: BTreeSet<i32>,
}

impl Participant {
    pub fn new(nom: impl Into<String>, prenom: impl Into<String>, tache: Tache) -> Self {
        Self {
            id_part: None,
            nom: nom.into(),
            prenom: prenom.into(),
            tache,
            events: BTreeSet::new(),
        }
    }
}

/// Raw `participants` row
#[derive(Debug, sqlx::FromRow)]
pub struct ParticipantRow {
    pub id_part: i32,
    pub nom: String,
    pub prenom: String,
    pub tache: i16,
}

impl ParticipantRow {
    pub fn into_participant(self, events: BTreeSet<i32>) -> Participant {
        Participant {
            id_part: Some(self.id_part),
            nom: self.nom,
            prenom: self.prenom,
            tache: Tache::from(self.tache),
            events,
        }
    }
}

/// Create participant request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateParticipant {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    #[validate(length(min = 1, max = 255))]
    pub prenom: String,
    pub tache: Tache,
}

impl From<CreateParticipant> for Participant {
    fn from(data: CreateParticipant) -> Self {
        Participant::new(data.nom, data.prenom, data.tache)
    }
}

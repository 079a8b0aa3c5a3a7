//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Tache
// ---------------------------------------------------------------------------

/// Role held by a participant within an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum Tache {
    Invite = 0,
    Organisateur = 1,
    Serveur = 2,
    Animateur = 3,
    Acteur = 4,
}

impl From<i16> for Tache {
    fn from(v: i16) -> Self {
        match v {
            1 => Tache::Organisateur,
            2 => Tache::Serveur,
            3 => Tache::Animateur,
            4 => Tache::Acteur,
            _ => Tache::Invite,
        }
    }
}

impl From<Tache> for i16 {
    fn from(t: Tache) -> Self {
        t as i16
    }
}

impl std::str::FromStr for Tache {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INVITE" => Ok(Tache::Invite),
            "ORGANISATEUR" => Ok(Tache::Organisateur),
            "SERVEUR" => Ok(Tache::Serveur),
            "ANIMATEUR" => Ok(Tache::Animateur),
            "ACTEUR" => Ok(Tache::Acteur),
            other => Err(format!("unknown tache: {}", other)),
        }
    }
}

impl std::fmt::Display for Tache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tache::Invite => "INVITE",
            Tache::Organisateur => "ORGANISATEUR",
            Tache::Serveur => "SERVEUR",
            Tache::Animateur => "ANIMATEUR",
            Tache::Acteur => "ACTEUR",
        };
        write!(f, "{}", label)
    }
}

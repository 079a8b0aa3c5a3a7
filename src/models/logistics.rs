//! Logistics model (procured items attached to an event)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Logistics record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Logistics {
    /// Assigned by the store on first save
    pub id_log: Option<i32>,
    pub description: String,
    /// Procurement confirmed; only reserved items count toward the event cost
    pub reserve: bool,
    pub prix_unit: f64,
    pub quantite: i32,
}

impl Logistics {
    /// Cost contribution to the owning event
    pub fn cost(&self) -> f64 {
        if self.reserve {
            self.prix_unit * f64::from(self.quantite)
        } else {
            0.0
        }
    }
}

/// Create logistics request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLogistics {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    #[serde(default)]
    pub reserve: bool,
    #[validate(range(min = 0.0))]
    pub prix_unit: f64,
    #[validate(range(min = 0))]
    pub quantite: i32,
}

impl From<CreateLogistics> for Logistics {
    fn from(data: CreateLogistics) -> Self {
        Logistics {
            id_log: None,
            description: data.description,
            reserve: data.reserve,
            prix_unit: data.prix_unit,
            quantite: data.quantite,
        }
    }
}

/// Date window for logistics lookup
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LogisticsDatesQuery {
    /// Window start (YYYY-MM-DD, inclusive)
    pub start: String,
    /// Window end (YYYY-MM-DD, inclusive)
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(reserve: bool) -> Logistics {
        Logistics {
            id_log: Some(1),
            description: "Chairs".to_string(),
            reserve,
            prix_unit: 100.0,
            quantite: 5,
        }
    }

    #[test]
    fn test_reserved_item_counts() {
        assert_eq!(item(true).cost(), 500.0);
    }

    #[test]
    fn test_unreserved_item_is_free() {
        assert_eq!(item(false).cost(), 0.0);
    }
}

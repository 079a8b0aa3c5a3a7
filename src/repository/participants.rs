//! Participants repository

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use super::ParticipantRepository;
use crate::{
    error::{AppError, AppResult},
    models::participant::{Participant, ParticipantRow},
};

#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: Pool<Postgres>,
}

impl PgParticipantRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Attach event identities from the association table
    async fn hydrate(&self, rows: Vec<ParticipantRow>) -> AppResult<Vec<Participant>> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id_part).collect();

        let links = sqlx::query(
            "SELECT participant_id, event_id FROM event_participants WHERE participant_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut events: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for link in links {
            events
                .entry(link.get("participant_id"))
                .or_default()
                .insert(link.get("event_id"));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let linked = events.remove(&row.id_part).unwrap_or_default();
                row.into_participant(linked)
            })
            .collect())
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    /// Insert a new participant or update an existing one. The association
    /// with events is owned by the event side and is not written here.
    async fn save(&self, participant: Participant) -> AppResult<Participant> {
        let row = match participant.id_part {
            Some(id) => {
                sqlx::query_as::<_, ParticipantRow>(
                    r#"
                    UPDATE participants SET nom = $2, prenom = $3, tache = $4
                    WHERE id_part = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(&participant.nom)
                .bind(&participant.prenom)
                .bind(i16::from(participant.tache))
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::participant_not_found(id))?
            }
            None => {
                sqlx::query_as::<_, ParticipantRow>(
                    "INSERT INTO participants (nom, prenom, tache) VALUES ($1, $2, $3) RETURNING *",
                )
                .bind(&participant.nom)
                .bind(&participant.prenom)
                .bind(i16::from(participant.tache))
                .fetch_one(&self.pool)
                .await?
            }
        };

        let mut saved = self.hydrate(vec![row]).await?;
        Ok(saved.remove(0))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>("SELECT * FROM participants WHERE id_part = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Participant>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT * FROM participants ORDER BY nom, prenom",
        )
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }
}

//! Events repository

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row, Transaction};

use super::EventRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        event::{Event, EventRow},
        logistics::Logistics,
        Tache,
    },
};

#[derive(Clone)]
pub struct PgEventRepository {
    pool: Pool<Postgres>,
}

impl PgEventRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load participants and logistics for a batch of event rows
    async fn hydrate(&self, rows: Vec<EventRow>) -> AppResult<Vec<Event>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = rows.iter().map(|r| r.id_event).collect();

        let participant_links = sqlx::query(
            "SELECT event_id, participant_id FROM event_participants WHERE event_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut participants: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for link in participant_links {
            participants
                .entry(link.get("event_id"))
                .or_default()
                .insert(link.get("participant_id"));
        }

        let logistics_rows = sqlx::query(
            r#"
            SELECT el.event_id, l.id_log, l.description, l.reserve, l.prix_unit, l.quantite
            FROM event_logistics el
            JOIN logistics l ON l.id_log = el.logistics_id
            WHERE el.event_id = ANY($1)
            ORDER BY l.id_log
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut logistics: HashMap<i32, Vec<Logistics>> = HashMap::new();
        for row in logistics_rows {
            logistics.entry(row.get("event_id")).or_default().push(Logistics {
                id_log: row.get("id_log"),
                description: row.get("description"),
                reserve: row.get("reserve"),
                prix_unit: row.get("prix_unit"),
                quantite: row.get("quantite"),
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id_event;
                row.into_event(
                    participants.remove(&id).unwrap_or_default(),
                    logistics.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// First of `ids` with no row in `table`
    async fn first_missing(
        tx: &mut Transaction<'_, Postgres>,
        table: &str,
        key: &str,
        ids: &[i32],
    ) -> AppResult<Option<i32>> {
        if ids.is_empty() {
            return Ok(None);
        }
        let query = format!(
            "SELECT MIN(wanted) FROM UNNEST($1::int[]) AS wanted \
             WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE {key} = wanted)"
        );
        let missing: Option<i32> = sqlx::query_scalar(&query)
            .bind(ids)
            .fetch_one(&mut **tx)
            .await?;
        Ok(missing)
    }

    /// Replace the association rows of an event inside a transaction
    async fn sync_associations(
        tx: &mut Transaction<'_, Postgres>,
        event_id: i32,
        event: &Event,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM event_participants WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut **tx)
            .await?;

        let participant_ids: Vec<i32> = event.participants.iter().copied().collect();
        if let Some(missing) =
            Self::first_missing(tx, "participants", "id_part", &participant_ids).await?
        {
            return Err(AppError::participant_not_found(missing));
        }
        if !participant_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO event_participants (event_id, participant_id)
                SELECT $1, UNNEST($2::int[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(event_id)
            .bind(&participant_ids)
            .execute(&mut **tx)
            .await?;
        }

        let known: Vec<i32> = event.logistics.iter().filter_map(|l| l.id_log).collect();
        if let Some(missing) = Self::first_missing(tx, "logistics", "id_log", &known).await? {
            return Err(AppError::logistics_not_found(missing));
        }

        // Unsaved logistics are inserted here so the event can own them
        let mut logistics_ids = Vec::with_capacity(event.logistics.len());
        for item in &event.logistics {
            let id = match item.id_log {
                Some(id) => id,
                None => {
                    sqlx::query_scalar::<_, i32>(
                        r#"
                        INSERT INTO logistics (description, reserve, prix_unit, quantite)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id_log
                        "#,
                    )
                    .bind(&item.description)
                    .bind(item.reserve)
                    .bind(item.prix_unit)
                    .bind(item.quantite)
                    .fetch_one(&mut **tx)
                    .await?
                }
            };
            logistics_ids.push(id);
        }
        logistics_ids.sort_unstable();
        logistics_ids.dedup();

        sqlx::query("DELETE FROM event_logistics WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut **tx)
            .await?;

        if !logistics_ids.is_empty() {
            // A logistics item has a single owner: attaching it moves it
            sqlx::query(
                r#"
                INSERT INTO event_logistics (event_id, logistics_id)
                SELECT $1, UNNEST($2::int[])
                ON CONFLICT (logistics_id) DO UPDATE SET event_id = EXCLUDED.event_id
                "#,
            )
            .bind(event_id)
            .bind(&logistics_ids)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    /// Insert a new event or update an existing one; an identity the store
    /// never assigned is rejected as not found.
    async fn save(&self, event: Event) -> AppResult<Event> {
        let mut tx = self.pool.begin().await?;

        let event_id: i32 = match event.id_event {
            Some(id) => {
                sqlx::query_scalar(
                    r#"
                    UPDATE events
                    SET description = $2, date_debut = $3, date_fin = $4, cout = $5
                    WHERE id_event = $1
                    RETURNING id_event
                    "#,
                )
                .bind(id)
                .bind(&event.description)
                .bind(event.date_debut)
                .bind(event.date_fin)
                .bind(event.cout)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::event_not_found(id))?
            }
            None => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO events (description, date_debut, date_fin, cout)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id_event
                    "#,
                )
                .bind(&event.description)
                .bind(event.date_debut)
                .bind(event.date_fin)
                .bind(event.cout)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        Self::sync_associations(&mut tx, event_id, &event).await?;
        tx.commit().await?;

        tracing::debug!("Saved event {} ({})", event_id, event.description);

        self.find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Event {} vanished after save", event_id)))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE id_event = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_description(&self, description: &str) -> AppResult<Option<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT * FROM events WHERE description = $1 ORDER BY id_event LIMIT 2",
        )
        .bind(description)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            tracing::warn!("Description {:?} matches several events", description);
            return Ok(None);
        }
        Ok(self.hydrate(rows).await?.pop())
    }

    async fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT * FROM events
            WHERE date_debut >= $1 AND date_fin <= $2
            ORDER BY date_debut, id_event
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    async fn find_by_participant_attributes(
        &self,
        nom: &str,
        prenom: &str,
        tache: Tache,
    ) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT DISTINCT e.*
            FROM events e
            JOIN event_participants ep ON ep.event_id = e.id_event
            JOIN participants p ON p.id_part = ep.participant_id
            WHERE p.nom = $1 AND p.prenom = $2 AND p.tache = $3
            ORDER BY e.id_event
            "#,
        )
        .bind(nom)
        .bind(prenom)
        .bind(i16::from(tache))
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>("SELECT * FROM events ORDER BY date_debut DESC")
            .fetch_all(&self.pool)
            .await?;
        self.hydrate(rows).await
    }
}

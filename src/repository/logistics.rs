//! Logistics repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LogisticsRepository;
use crate::{
    error::{AppError, AppResult},
    models::logistics::Logistics,
};

#[derive(Clone)]
pub struct PgLogisticsRepository {
    pool: Pool<Postgres>,
}

impl PgLogisticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogisticsRepository for PgLogisticsRepository {
    async fn save(&self, logistics: Logistics) -> AppResult<Logistics> {
        let row = match logistics.id_log {
            Some(id) => {
                sqlx::query_as::<_, Logistics>(
                    r#"
                    UPDATE logistics
                    SET description = $2, reserve = $3, prix_unit = $4, quantite = $5
                    WHERE id_log = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(&logistics.description)
                .bind(logistics.reserve)
                .bind(logistics.prix_unit)
                .bind(logistics.quantite)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::logistics_not_found(id))?
            }
            None => {
                sqlx::query_as::<_, Logistics>(
                    r#"
                    INSERT INTO logistics (description, reserve, prix_unit, quantite)
                    VALUES ($1, $2, $3, $4)
                    RETURNING *
                    "#,
                )
                .bind(&logistics.description)
                .bind(logistics.reserve)
                .bind(logistics.prix_unit)
                .bind(logistics.quantite)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<Logistics>> {
        let rows = sqlx::query_as::<_, Logistics>("SELECT * FROM logistics ORDER BY id_log")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

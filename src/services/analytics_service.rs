//! services/analytics_service.rs
//! Eventos de uso del frontend guardados en SQLite.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use crate::error::TuxError;
use crate::models::analytics_model::AnalyticsEvent;

pub const DEFAULT_EVENTS_LIMIT: i64 = 100;
const MAX_EVENTS_LIMIT: i64 = 1000;

#[derive(Clone, Debug)]
pub struct AnalyticsService {
    db_pool: Pool<Sqlite>,
}

impl AnalyticsService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        AnalyticsService { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.db_pool).await?;
        Ok(())
    }

    /// Inserta el evento y devuelve su id.
    pub async fn track_event(
        &self,
        event: &str,
        user_id: Option<&str>,
        metadata: Option<&Value>,
    ) -> Result<String> {
        let event = event.trim();
        if event.is_empty() {
            return Err(TuxError::Validation("Event name cannot be empty".to_string()).into());
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let metadata_json = metadata.map(Value::to_string);

        sqlx::query(
            r#"
            INSERT INTO analytics_events (id, event, user_id, metadata, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&id)
        .bind(event)
        .bind(user_id)
        .bind(metadata_json)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar analytics_event")?;

        log::info!("Analytics event '{}' registrado ({})", event, id);
        Ok(id)
    }

    /// Eventos más recientes primero; `limit` se acota a 1..=1000.
    pub async fn recent_events(&self, limit: i64) -> Result<Vec<AnalyticsEvent>> {
        let limit = limit.clamp(1, MAX_EVENTS_LIMIT);
        let rows = sqlx::query(
            r#"
            SELECT id, event, user_id, metadata, created_at
            FROM analytics_events
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar analytics_events")?;

        rows.into_iter()
            .map(|row| -> Result<AnalyticsEvent> {
                let metadata: Option<String> = row.try_get("metadata")?;
                Ok(AnalyticsEvent {
                    id: row.try_get("id")?,
                    event: row.try_get("event")?,
                    user_id: row.try_get("user_id")?,
                    // Metadata que no parsea se devuelve como string
                    metadata: metadata.map(|m| {
                        serde_json::from_str(&m).unwrap_or(Value::String(m))
                    }),
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }
}

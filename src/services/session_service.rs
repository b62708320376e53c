//! services/session_service.rs
//! Sesiones guardadas como JSON en disco, con un índice común.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::TuxError;
use crate::models::session_model::{
    SessionExport, SessionIndex, SessionIndexEntry, SessionRecord, SessionSummary,
    UpdateSessionRequest,
};

const INDEX_FILE: &str = "sessions_metadata.json";
const UNTITLED: &str = "Untitled Project";
pub const DEFAULT_LIST_LIMIT: usize = 10;

#[derive(Clone, Debug)]
pub struct SessionService {
    dir: PathBuf,
    // índice y archivos se modifican bajo este lock
    lock: Arc<Mutex<()>>,
}

impl SessionService {
    /// Crea el directorio y el índice vacío si no existen.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("No se pudo crear el directorio de sesiones {:?}", dir))?;
        let index_path = dir.join(INDEX_FILE);
        if !index_path.exists() {
            std::fs::write(&index_path, r#"{"sessions": {}}"#)
                .with_context(|| format!("No se pudo crear {:?}", index_path))?;
        }
        log::info!("Sesiones en {:?}", dir);
        Ok(SessionService {
            dir,
            lock: Arc::new(Mutex::new(())),
        })
    }

    pub async fn create(&self, data: Value) -> Result<String> {
        let _guard = self.lock.lock().await;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let app_idea = purpose_of(&data).unwrap_or(UNTITLED).to_string();

        let record = SessionRecord {
            id: id.clone(),
            created_at: now.clone(),
            updated_at: now.clone(),
            data,
        };
        self.write_record(&record).await?;

        let mut index = self.read_index().await?;
        index.sessions.insert(
            id.clone(),
            SessionIndexEntry {
                created_at: now.clone(),
                updated_at: now,
                app_idea,
            },
        );
        self.write_index(&index).await?;

        log::info!("Sesión creada: {}", id);
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> Result<Option<SessionRecord>> {
        let Some(id) = canonical_id(id) else {
            return Ok(None);
        };
        let _guard = self.lock.lock().await;
        self.read_record(&id).await
    }

    /// Sustituye solo los campos presentes en `changes`.
    pub async fn update_fields(&self, id: &str, changes: UpdateSessionRequest) -> Result<bool> {
        let Some(id) = canonical_id(id) else {
            return Ok(false);
        };
        let _guard = self.lock.lock().await;
        self.replace_data(&id, |previous| {
            let mut data = match previous {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            if let Some(requirements) = changes.requirements {
                data.insert("requirements".to_string(), Value::Object(requirements));
            }
            if let Some(ux_specs) = changes.ux_specs {
                data.insert("ux_specs".to_string(), ux_specs);
            }
            if let Some(screens) = changes.screens {
                data.insert("screens".to_string(), Value::Array(screens));
            }
            Value::Object(data)
        })
        .await
    }

    /// Más recientes primero según `updated_at`.
    pub async fn list(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        let _guard = self.lock.lock().await;
        let index = self.read_index().await?;
        let mut sessions: Vec<SessionSummary> = index
            .sessions
            .into_iter()
            .map(|(id, entry)| SessionSummary {
                id,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
                app_idea: entry.app_idea,
            })
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions.truncate(limit);
        Ok(sessions)
    }

    /// `true` si existía el archivo o la entrada del índice.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let Some(id) = canonical_id(id) else {
            return Ok(false);
        };
        let _guard = self.lock.lock().await;
        let path = self.record_path(&id);

        let mut existed = false;
        if fs::try_exists(&path).await.unwrap_or(false) {
            fs::remove_file(&path)
                .await
                .with_context(|| format!("No se pudo borrar {:?}", path))?;
            existed = true;
        }

        let mut index = self.read_index().await?;
        if index.sessions.remove(&id).is_some() {
            self.write_index(&index).await?;
            existed = true;
        }

        if existed {
            log::info!("Sesión eliminada: {}", id);
        }
        Ok(existed)
    }

    pub async fn export(&self, id: &str) -> Result<Option<SessionExport>> {
        Ok(self.get(id).await?.map(|session| SessionExport {
            export_version: "1.0".to_string(),
            exported_at: Utc::now().to_rfc3339(),
            session,
        }))
    }

    /// Crea una sesión nueva con `session.data`; `None` si el documento no sirve.
    pub async fn import(&self, export: &Value) -> Result<Option<String>> {
        match export.get("session").and_then(|s| s.get("data")) {
            Some(data) => Ok(Some(self.create(data.clone()).await?)),
            None => {
                log::error!("Export inválido: falta session.data");
                Ok(None)
            }
        }
    }

    /// `id` ya canónico (ver `canonical_id`).
    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    async fn replace_data<F>(&self, id: &str, build: F) -> Result<bool>
    where
        F: FnOnce(Value) -> Value,
    {
        let Some(mut record) = self.read_record(id).await? else {
            log::warn!("Sesión no encontrada para actualizar: {}", id);
            return Ok(false);
        };

        let previous_idea = purpose_of(&record.data).map(str::to_string);
        record.data = build(record.data);
        record.updated_at = Utc::now().to_rfc3339();
        self.write_record(&record).await?;

        let app_idea = purpose_of(&record.data)
            .map(str::to_string)
            .or(previous_idea)
            .unwrap_or_else(|| UNTITLED.to_string());
        let mut index = self.read_index().await?;
        let created_at = index
            .sessions
            .get(&record.id)
            .map(|e| e.created_at.clone())
            .unwrap_or_else(|| record.created_at.clone());
        index.sessions.insert(
            record.id.clone(),
            SessionIndexEntry {
                created_at,
                updated_at: record.updated_at.clone(),
                app_idea,
            },
        );
        self.write_index(&index).await?;

        log::info!("Sesión actualizada: {}", record.id);
        Ok(true)
    }

    async fn read_record(&self, id: &str) -> Result<Option<SessionRecord>> {
        let path = self.record_path(id);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            log::warn!("Sesión no encontrada: {}", id);
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .await
            .with_context(|| format!("No se pudo leer {:?}", path))?;
        let record = serde_json::from_str(&raw)
            .map_err(|e| TuxError::Storage(format!("Sesión corrupta en {:?}: {}", path, e)))?;
        Ok(Some(record))
    }

    async fn write_record(&self, record: &SessionRecord) -> Result<()> {
        let id = canonical_id(&record.id)
            .with_context(|| format!("Id de sesión inválido: {}", record.id))?;
        let path = self.record_path(&id);
        let body = serde_json::to_string_pretty(record)?;
        write_atomic(&path, body.as_bytes()).await
    }

    async fn read_index(&self) -> Result<SessionIndex> {
        let path = self.index_path();
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(SessionIndex::default());
        }
        let raw = fs::read_to_string(&path)
            .await
            .with_context(|| format!("No se pudo leer {:?}", path))?;
        let index = serde_json::from_str(&raw)
            .map_err(|e| TuxError::Storage(format!("Índice corrupto en {:?}: {}", path, e)))?;
        Ok(index)
    }

    async fn write_index(&self, index: &SessionIndex) -> Result<()> {
        let body = serde_json::to_string_pretty(index)?;
        write_atomic(&self.index_path(), body.as_bytes()).await
    }
}

/// UUID en forma guionada y minúscula; ids que no son UUID no existen.
pub fn canonical_id(id: &str) -> Option<String> {
    Uuid::parse_str(id.trim())
        .ok()
        .map(|id| id.hyphenated().to_string())
}

fn purpose_of(data: &Value) -> Option<&str> {
    data.get("requirements")
        .and_then(|r| r.get("purpose"))
        .and_then(Value::as_str)
        .filter(|p| !p.trim().is_empty())
}

/// Escribe en un temporal y renombra.
async fn write_atomic(path: &Path, body: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body)
        .await
        .with_context(|| format!("No se pudo escribir {:?}", tmp))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("No se pudo renombrar {:?}", tmp))?;
    Ok(())
}

/// `data` de una sesión nueva a partir del cuerpo de creación.
pub fn session_data(requirements: Map<String, Value>, ux_specs: Option<Value>, screens: Option<Vec<Value>>) -> Value {
    json!({
        "requirements": requirements,
        "ux_specs": ux_specs,
        "screens": screens,
    })
}

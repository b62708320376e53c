//! tests/session_tests.rs
//! Pruebas de `SessionService` contra un directorio temporal.

use serde_json::{json, Map, Value};
use tempfile::TempDir;

use crate::models::session_model::UpdateSessionRequest;
use crate::services::session_service::{canonical_id, session_data, SessionService};

fn requirements(purpose: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("purpose".to_string(), Value::from(purpose));
    map
}

fn service() -> (SessionService, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let sessions = SessionService::new(dir.path().join("sessions")).expect("session service");
    (sessions, dir)
}

#[test]
fn new_creates_directory_and_index() {
    let (_service, dir) = service();
    let index = std::fs::read_to_string(dir.path().join("sessions/sessions_metadata.json"))
        .expect("index");
    let parsed: Value = serde_json::from_str(&index).expect("json");
    assert_eq!(parsed, json!({ "sessions": {} }));
}

#[actix_rt::test]
async fn create_then_get_round_trips_data() {
    let (service, dir) = service();
    let data = session_data(requirements("Plant care reminders"), None, Some(vec![json!({ "name": "Home" })]));
    let id = service.create(data.clone()).await.expect("create");

    assert!(dir.path().join("sessions").join(format!("{}.json", id)).exists());
    let record = service.get(&id).await.expect("get").expect("record");
    assert_eq!(record.id, id);
    assert_eq!(record.data, data);
    assert_eq!(record.created_at, record.updated_at);
}

#[actix_rt::test]
async fn untitled_sessions_keep_a_placeholder_name() {
    let (service, _dir) = service();
    service
        .create(session_data(Map::new(), None, None))
        .await
        .expect("create");
    let list = service.list(10).await.expect("list");
    assert_eq!(list[0].app_idea, "Untitled Project");
}

#[actix_rt::test]
async fn update_fields_merges_and_refreshes_index() {
    let (service, _dir) = service();
    let id = service
        .create(session_data(requirements("Book club"), None, None))
        .await
        .expect("create");

    let updated = service
        .update_fields(
            &id,
            UpdateSessionRequest {
                ux_specs: Some(json!({ "screens": [] })),
                ..UpdateSessionRequest::default()
            },
        )
        .await
        .expect("update");
    assert!(updated);

    let record = service.get(&id).await.expect("get").expect("record");
    assert_eq!(record.data["requirements"]["purpose"], "Book club");
    assert_eq!(record.data["ux_specs"], json!({ "screens": [] }));
    assert!(record.updated_at >= record.created_at);

    // sin propósito nuevo se conserva el anterior
    service
        .update_fields(
            &id,
            UpdateSessionRequest {
                requirements: Some(Map::new()),
                ..UpdateSessionRequest::default()
            },
        )
        .await
        .expect("replace");
    let list = service.list(10).await.expect("list");
    assert_eq!(list[0].app_idea, "Book club");
}

#[actix_rt::test]
async fn list_is_newest_first_and_limited() {
    let (service, _dir) = service();
    let first = service
        .create(session_data(requirements("First"), None, None))
        .await
        .expect("create");
    let second = service
        .create(session_data(requirements("Second"), None, None))
        .await
        .expect("create");
    service
        .update_fields(
            &first,
            UpdateSessionRequest {
                requirements: Some(requirements("First, revisited")),
                ..UpdateSessionRequest::default()
            },
        )
        .await
        .expect("update");

    let list = service.list(10).await.expect("list");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, first);
    assert_eq!(list[0].app_idea, "First, revisited");
    assert_eq!(list[1].id, second);

    assert_eq!(service.list(1).await.expect("list").len(), 1);
}

#[actix_rt::test]
async fn unknown_and_malformed_ids_are_missing() {
    let (service, _dir) = service();
    assert!(service.get("../../etc/passwd").await.expect("get").is_none());
    assert!(service
        .get("6f1c2a9e-1b7d-4c3e-9a55-0d2f3b4c5d6e")
        .await
        .expect("get")
        .is_none());
    assert!(!service
        .update_fields("nope", UpdateSessionRequest::default())
        .await
        .expect("update"));
    assert!(!service.delete("nope").await.expect("delete"));
}

#[actix_rt::test]
async fn delete_removes_file_and_index_entry() {
    let (service, dir) = service();
    let id = service
        .create(session_data(requirements("Temp"), None, None))
        .await
        .expect("create");

    assert!(service.delete(&id).await.expect("delete"));
    assert!(!dir.path().join("sessions").join(format!("{}.json", id)).exists());
    assert!(service.list(10).await.expect("list").is_empty());
    assert!(!service.delete(&id).await.expect("second delete"));
}

#[actix_rt::test]
async fn export_then_import_creates_a_copy() {
    let (service, _dir) = service();
    let id = service
        .create(session_data(requirements("Travel planner"), None, None))
        .await
        .expect("create");

    let export = service.export(&id).await.expect("export").expect("doc");
    assert_eq!(export.export_version, "1.0");
    let doc = serde_json::to_value(&export).expect("json");

    let new_id = service.import(&doc).await.expect("import").expect("id");
    assert_ne!(new_id, id);
    let copy = service.get(&new_id).await.expect("get").expect("record");
    assert_eq!(copy.data["requirements"]["purpose"], "Travel planner");

    assert!(service
        .import(&json!({ "session": { "id": "x" } }))
        .await
        .expect("import")
        .is_none());
}

#[actix_rt::test]
async fn corrupt_record_is_a_storage_error() {
    let (service, dir) = service();
    let id = service
        .create(session_data(requirements("Broken"), None, None))
        .await
        .expect("create");
    std::fs::write(dir.path().join("sessions").join(format!("{}.json", id)), "{oops")
        .expect("write");

    let err = service.get(&id).await.unwrap_err();
    assert!(err.to_string().starts_with("storage error: Sesión corrupta"));
}

#[test]
fn ids_are_canonicalized() {
    assert_eq!(
        canonical_id("3CFD1AA1-5B2E-4C7D-9F10-2A3B4C5D6E7F").as_deref(),
        Some("3cfd1aa1-5b2e-4c7d-9f10-2a3b4c5d6e7f")
    );
    assert_eq!(
        canonical_id("3cfd1aa15b2e4c7d9f102a3b4c5d6e7f").as_deref(),
        Some("3cfd1aa1-5b2e-4c7d-9f10-2a3b4c5d6e7f")
    );
    assert_eq!(canonical_id("../3cfd1aa1"), None);
}

#[actix_rt::test]
async fn uppercase_ids_reach_the_same_session() {
    let (service, _dir) = service();
    let id = service
        .create(session_data(requirements("Recipes"), None, None))
        .await
        .expect("create");
    let upper = id.to_uppercase();
    let simple = id.replace('-', "");

    let record = service.get(&upper).await.expect("get").expect("record");
    assert_eq!(record.id, id);
    assert!(service
        .update_fields(
            &simple,
            UpdateSessionRequest {
                requirements: Some(requirements("Recipes v2")),
                ..UpdateSessionRequest::default()
            },
        )
        .await
        .expect("update"));
    let list = service.list(10).await.expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].app_idea, "Recipes v2");

    assert!(service.delete(&upper).await.expect("delete"));
    assert!(service.list(10).await.expect("list").is_empty());
    assert!(service.get(&id).await.expect("get").is_none());
}

//! File-backed state store tests: round-trips, missing-file defaults, and
//! the corrupt-file deletion policy, against a real temporary directory.

use analytics_client_core::{AppError, SessionState, StateStore};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn sample_state() -> SessionState {
    SessionState {
        client_id: Uuid::new_v4(),
        first_visit_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        session_count: 7,
    }
}

#[tokio::test]
async fn save_then_restore_returns_equal_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let state = sample_state();
    store.save(&state, None).await.unwrap();
    let restored: SessionState = store.restore(None, false).await.unwrap();
    assert_eq!(restored, state);
}

#[tokio::test]
async fn restore_of_missing_file_yields_default_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let restored: SessionState = store.restore(None, false).await.unwrap();
    assert_eq!(restored.session_count, 0);
}

#[tokio::test]
async fn restore_of_empty_file_yields_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let folder = dir.path().join("analytics_local");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("SessionState"), b"").unwrap();

    let restored: SessionState = store.restore(None, false).await.unwrap();
    assert_eq!(restored.session_count, 0);
}

#[tokio::test]
async fn explicit_filename_overrides_the_type_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let state = sample_state();
    store.save(&state, Some("session.json")).await.unwrap();
    assert!(dir.path().join("analytics_local").join("session.json").exists());

    let restored: SessionState = store.restore(Some("session.json"), false).await.unwrap();
    assert_eq!(restored, state);
}

#[tokio::test]
async fn corrupt_file_surfaces_serde_error_and_is_kept_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let folder = dir.path().join("analytics_local");
    std::fs::create_dir_all(&folder).unwrap();
    let file = folder.join("SessionState");
    std::fs::write(&file, b"{ not json").unwrap();

    let result: Result<SessionState, AppError> = store.restore(None, false).await;
    assert!(matches!(result, Err(AppError::SerializationJson(_))));
    assert!(file.exists());
}

#[tokio::test]
async fn corrupt_file_is_deleted_when_requested_before_error_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let folder = dir.path().join("analytics_local");
    std::fs::create_dir_all(&folder).unwrap();
    let file = folder.join("SessionState");
    std::fs::write(&file, b"{ not json").unwrap();

    let result: Result<SessionState, AppError> = store.restore(None, true).await;
    assert!(matches!(result, Err(AppError::SerializationJson(_))));
    assert!(!file.exists());

    // The next restore starts clean.
    let restored: SessionState = store.restore(None, true).await.unwrap();
    assert_eq!(restored.session_count, 0);
}

#[tokio::test]
async fn save_replaces_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let mut state = sample_state();
    store.save(&state, None).await.unwrap();
    state.start_new_session();
    store.save(&state, None).await.unwrap();

    let restored: SessionState = store.restore(None, false).await.unwrap();
    assert_eq!(restored.session_count, 8);
}

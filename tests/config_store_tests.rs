//! Config store integration tests

use tempfile::TempDir;

use face_recorder::application::ports::ConfigStore;
use face_recorder::domain::config::AppConfig;
use face_recorder::domain::error::ConfigError;
use face_recorder::domain::FaceFilter;
use face_recorder::infrastructure::XdgConfigStore;

fn store_in(dir: &TempDir) -> XdgConfigStore {
    XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"))
}

#[tokio::test]
async fn missing_file_loads_empty_config() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(!store.exists());
    assert_eq!(store.load().await.unwrap(), AppConfig::empty());
}

#[tokio::test]
async fn init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.init().await.unwrap();
    assert!(store.exists());
    assert_eq!(store.load().await.unwrap(), AppConfig::defaults());

    let err = store.init().await.unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyExists(_)));
}

#[tokio::test]
async fn saved_values_override_defaults_when_merged() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let partial = AppConfig {
        face_filter: Some("intersect".into()),
        faces: Some(3),
        ..Default::default()
    };

    store.save(&partial).await.unwrap();
    let merged = AppConfig::defaults().merge(store.load().await.unwrap());

    assert_eq!(merged.face_filter_or_default(), FaceFilter::Intersect);
    assert_eq!(merged.faces_or_default(), 3);
    assert_eq!(merged.fps_or_default(), 15);
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "fps = [").unwrap();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[tokio::test]
async fn unknown_key_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "face_filtre = \"intersect\"\n").unwrap();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { key, .. } if key == "face_filtre"));
}

#[tokio::test]
async fn invalid_save_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.init().await.unwrap();

    let bad = AppConfig {
        fps: Some(10_000),
        ..Default::default()
    };
    assert!(store.save(&bad).await.is_err());

    assert_eq!(store.load().await.unwrap(), AppConfig::defaults());
    let leftovers: Vec<_> = std::fs::read_dir(store.path().parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path() != store.path())
        .collect();
    assert!(leftovers.is_empty());
}

use crate::errors::AppError;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

// The validated settings used throughout the crate.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory the state store places its subfolder under.
    pub storage_dir: PathBuf,
    /// Override for the session state filename; the type name when absent.
    pub state_filename: Option<String>,
    /// Delete a corrupt state file before surfacing the restore error.
    pub delete_corrupt_state: bool,
    /// Fixed client id; when absent one is restored from or generated into
    /// the persisted session state.
    pub client_id: Option<Uuid>,

    pub internal_log_level: String,
    pub internal_log_file_dir: PathBuf,
    pub internal_log_file_name: String,
}

// Shape of analytics_settings.toml before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    storage_dir: String,
    state_filename: Option<String>,
    delete_corrupt_state: Option<bool>,
    client_id: Option<String>,

    internal_log_level: Option<String>,
    internal_log_file_dir: Option<String>,
    internal_log_file_name: Option<String>,
}

const SETTINGS_FILE_NAME: &str = "analytics_settings.toml";

impl Settings {
    /// Load settings from `analytics_settings.toml`, searched for next to the
    /// executable and in the current directory, with `ANALYTICS_CLIENT__*`
    /// environment variables layered on top.
    pub fn new() -> Result<Arc<Self>, AppError> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        let mut candidates = Vec::new();
        if let Some(dir) = &exe_dir {
            candidates.push(dir.join("config").join(SETTINGS_FILE_NAME));
            candidates.push(dir.join(SETTINGS_FILE_NAME));
        }
        candidates.push(PathBuf::from("config").join(SETTINGS_FILE_NAME));
        candidates.push(PathBuf::from(SETTINGS_FILE_NAME));

        let mut builder = Config::builder();
        for candidate in &candidates {
            if candidate.exists() {
                builder = builder.add_source(ConfigFile::from(candidate.clone()).required(true));
                break;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ANALYTICS_CLIENT")
                .separator("__")
                .try_parsing(true),
        );

        let raw: RawSettings = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        Self::from_raw(raw, exe_dir.as_deref())
    }

    fn from_raw(raw: RawSettings, exe_dir: Option<&std::path::Path>) -> Result<Arc<Self>, AppError> {
        let client_id = raw
            .client_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| AppError::Config(format!("Invalid client_id: {}", e)))?;

        // Relative paths resolve against the executable's directory when known.
        let resolve = |p: String| -> PathBuf {
            let path = PathBuf::from(p);
            match (path.is_absolute(), exe_dir) {
                (false, Some(dir)) => dir.join(path),
                _ => path,
            }
        };

        Ok(Arc::new(Settings {
            storage_dir: resolve(raw.storage_dir),
            state_filename: raw.state_filename,
            delete_corrupt_state: raw.delete_corrupt_state.unwrap_or(false),
            client_id,
            internal_log_level: raw.internal_log_level.unwrap_or_else(|| "info".to_string()),
            internal_log_file_dir: resolve(
                raw.internal_log_file_dir
                    .unwrap_or_else(|| "logs".to_string()),
            ),
            internal_log_file_name: raw
                .internal_log_file_name
                .unwrap_or_else(|| "analytics_client.log".to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in_optional_fields() {
        let raw = RawSettings {
            storage_dir: "/tmp/analytics".to_string(),
            state_filename: None,
            delete_corrupt_state: None,
            client_id: None,
            internal_log_level: None,
            internal_log_file_dir: None,
            internal_log_file_name: None,
        };
        let settings = Settings::from_raw(raw, None).unwrap();
        assert_eq!(settings.storage_dir, PathBuf::from("/tmp/analytics"));
        assert!(!settings.delete_corrupt_state);
        assert_eq!(settings.internal_log_level, "info");
        assert_eq!(settings.internal_log_file_name, "analytics_client.log");
    }

    #[test]
    fn bad_client_id_is_a_config_error() {
        let raw = RawSettings {
            storage_dir: "state".to_string(),
            state_filename: None,
            delete_corrupt_state: Some(true),
            client_id: Some("not-a-uuid".to_string()),
            internal_log_level: None,
            internal_log_file_dir: None,
            internal_log_file_name: None,
        };
        assert!(matches!(
            Settings::from_raw(raw, None),
            Err(AppError::Config(_))
        ));
    }
}

use crate::errors::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const STATE_SUBFOLDER: &str = "analytics_local";

/// Typed save/restore of small state objects to a dedicated subfolder of the
/// configured storage root. One file per persisted type, named after the type
/// unless a filename is given.
#[derive(Debug, Clone)]
pub struct StateStore {
    folder: PathBuf,
}

impl StateStore {
    pub fn new(storage_root: impl AsRef<Path>) -> Self {
        StateStore {
            folder: storage_root.as_ref().join(STATE_SUBFOLDER),
        }
    }

    /// Restore a value of type `T` from its state file.
    ///
    /// A missing or empty file yields `T::default()` rather than an error.
    /// Content that fails to deserialize surfaces the serde error; when
    /// `delete_bad_data` is set the corrupt file is removed first so the next
    /// restore starts clean. All other I/O errors propagate unchanged.
    pub async fn restore<T>(
        &self,
        filename: Option<&str>,
        delete_bad_data: bool,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.file_path::<T>(filename);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("StateStore: no state file at {:?}, using default", path);
                return Ok(T::default());
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        if bytes.is_empty() {
            return Ok(T::default());
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                if delete_bad_data {
                    match fs::remove_file(&path).await {
                        Ok(()) => tracing::warn!("StateStore: deleted corrupt state file {:?}", path),
                        Err(del_err) => tracing::error!(
                            "StateStore: failed to delete corrupt state file {:?}: {}",
                            path,
                            del_err
                        ),
                    }
                }
                Err(AppError::SerializationJson(e))
            }
        }
    }

    /// Save a value of type `T` to its state file, replacing any existing
    /// content. The value is serialized to memory first so a serialization
    /// failure never leaves a partial file behind.
    pub async fn save<T>(&self, value: &T, filename: Option<&str>) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let buffer = serde_json::to_vec(value)?;
        fs::create_dir_all(&self.folder).await?;
        let path = self.file_path::<T>(filename);
        fs::write(&path, buffer).await?;
        tracing::trace!("StateStore: saved state to {:?}", path);
        Ok(())
    }

    fn file_path<T>(&self, filename: Option<&str>) -> PathBuf {
        match filename {
            Some(name) => self.folder.join(name),
            None => self.folder.join(short_type_name::<T>()),
        }
    }
}

// "my_crate::services::session::SessionState" -> "SessionState"
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

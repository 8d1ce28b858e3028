use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::StorageError;

/// Result of a GET operation.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
}

/// Resolve `key` to a path directly under `root`.
///
/// Keys are flat file names; anything that could escape `root` is rejected.
fn object_path(root: &Path, key: &str) -> Result<PathBuf, StorageError> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\'])
        || key.starts_with('.');
    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(root.join(key))
}

/// Read an object.
pub async fn get_object(root: &Path, key: &str) -> Result<GetObjectOutput, StorageError> {
    let path = object_path(root, key)?;

    let body = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StorageError::NotFound {
                key: key.to_string(),
            }
        } else {
            StorageError::Read {
                key: key.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    Ok(GetObjectOutput { body })
}

/// Write an object, replacing any existing content.
///
/// `root` is created on first write. The body goes to a temp file that is
/// then renamed over the target, so readers never see a partial object.
pub async fn put_object(root: &Path, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
    let path = object_path(root, key)?;
    let write_err = |e: std::io::Error| StorageError::Write {
        key: key.to_string(),
        message: e.to_string(),
    };

    tokio::fs::create_dir_all(root).await.map_err(write_err)?;

    let tmp_path = root.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
    tokio::fs::write(&tmp_path, &body).await.map_err(write_err)?;

    if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }

    tracing::debug!(key, bytes = body.len(), "object written");
    Ok(())
}

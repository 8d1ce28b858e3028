use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

/// Load a JSON state file. `None` if it does not exist yet.
pub async fn load_state<T: DeserializeOwned>(
    root: &Path,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match objects::get_object(root, key).await {
        Ok(output) => Ok(Some(serde_json::from_slice(&output.body)?)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a JSON state file, overwriting previous content.
pub async fn save_state<T: Serialize>(
    root: &Path,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(root, key, body).await
}

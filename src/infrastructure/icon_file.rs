//! Icon file loading

use std::path::Path;

use tokio::fs;

use crate::domain::error::IconError;
use crate::domain::notification::Icon;

/// Read an image file into an [`Icon`]
pub async fn load_icon(path: impl AsRef<Path>) -> Result<Icon, IconError> {
    let path = path.as_ref();
    let data = fs::read(path).await.map_err(|e| IconError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    if data.is_empty() {
        return Err(IconError::Empty(path.display().to_string()));
    }
    Ok(Icon::new(data))
}

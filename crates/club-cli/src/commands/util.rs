//! Shared utilities for CLI commands.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Result, bail};

/// Reads a whole log file, with distinct messages for the usual failures.
pub async fn read_log(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok(source),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            bail!("file does not exist: {}", path.display())
        }
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            bail!("not enough permissions to open file: {}", path.display())
        }
        Err(err) => bail!("could not open file: {err}"),
    }
}

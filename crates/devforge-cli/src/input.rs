//! Input text resolution for `run`.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tracing::debug;

/// A `--file` / `--secondary-file` path that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("failed to read '{}': {source}", .path.display())]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Pick the input text: a file wins over literal text.
pub async fn resolve(
    text: Option<String>,
    file: Option<&Path>,
) -> Result<Option<String>, UnreadableFile> {
    match file {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| UnreadableFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(path = %path.display(), bytes = content.len(), "Read input file");
            Ok(Some(content))
        }
        None => Ok(text),
    }
}

/// Read all of stdin when it is piped rather than a terminal.
pub async fn piped_stdin() -> std::io::Result<Option<String>> {
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    debug!(bytes = buf.len(), "Read input from stdin");
    Ok(Some(buf))
}

// file: src/search/audit.rs
// description: append-only audit log of every search result discovered
// reference: one JSON object per line, truncated at process start

use crate::config::AuditFormat;
use crate::error::{PipelineError, Result};
use crate::models::SearchResult;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    logged_at: String,
    #[serde(flatten)]
    result: &'a SearchResult,
}

pub struct AuditLog {
    path: PathBuf,
    format: AuditFormat,
    file: Mutex<File>,
}

impl AuditLog {
    /// Truncates any previous log, then keeps the file open in append mode.
    pub async fn create(path: impl AsRef<Path>, format: AuditFormat) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| PipelineError::AuditLog {
                    path: path.clone(),
                    source,
                })?;
        }

        tokio::fs::write(&path, b"")
            .await
            .map_err(|source| PipelineError::AuditLog {
                path: path.clone(),
                source,
            })?;

        let file = OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .map_err(|source| PipelineError::AuditLog {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), ?format, "Audit log ready");

        Ok(Self {
            path,
            format,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record(&self, result: &SearchResult) -> Result<()> {
        let line = match self.format {
            AuditFormat::Jsonl => {
                let entry = AuditEntry {
                    logged_at: Utc::now().to_rfc3339(),
                    result,
                };
                let mut line = serde_json::to_string(&entry)?;
                line.push('\n');
                line
            }
            AuditFormat::Text => format!("{}\n", result.format_block()),
        };

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| PipelineError::AuditLog {
                path: self.path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| PipelineError::AuditLog {
            path: self.path.clone(),
            source,
        })?;

        debug!(url = %result.url, "Recorded search result");
        Ok(())
    }
}

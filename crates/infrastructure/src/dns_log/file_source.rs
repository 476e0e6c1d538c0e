use super::entry::RawLogEntry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use route_sync_application::ports::DnsLogSource;
use route_sync_domain::{DnsLogEntry, DomainError};
use std::io::SeekFrom;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

const DEFAULT_MAX_READ_BYTES: u64 = 4 * 1024 * 1024;

/// Tails an append-only JSON-lines query log by byte offset.
///
/// A file shorter than the saved offset has been rotated; reading restarts
/// from the top. A trailing partial line is left for the next poll. Each
/// poll reads at most `max_read_bytes`, so a large backlog drains over
/// several cycles.
pub struct FileDnsLogSource {
    path: PathBuf,
    offset: Mutex<u64>,
    max_read_bytes: u64,
}

impl FileDnsLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: Mutex::new(0),
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
        }
    }

    pub fn with_max_read_bytes(mut self, max_read_bytes: u64) -> Self {
        self.max_read_bytes = max_read_bytes.max(1);
        self
    }

    fn io_error(&self, e: std::io::Error) -> DomainError {
        DomainError::IoError(format!("{}: {}", self.path.display(), e))
    }
}

#[async_trait]
impl DnsLogSource for FileDnsLogSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<DnsLogEntry>, DomainError> {
        let mut offset = self.offset.lock().await;

        let mut file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let len = file.metadata().await.map_err(|e| self.io_error(e))?.len();

        if len < *offset {
            info!(previous = *offset, len, "Query log shrank, reading from start");
            *offset = 0;
        }
        if len == *offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(*offset))
            .await
            .map_err(|e| self.io_error(e))?;
        let available = len - *offset;
        let chunk = available.min(self.max_read_bytes);
        let mut buf = Vec::with_capacity(chunk as usize);
        file.take(chunk)
            .read_to_end(&mut buf)
            .await
            .map_err(|e| self.io_error(e))?;

        let Some(last_newline) = buf.iter().rposition(|b| *b == b'\n') else {
            if chunk < available {
                // A single line longer than the read window can never complete.
                warn!(offset = *offset, bytes = buf.len(), "Skipping oversized query log line");
                *offset += buf.len() as u64;
            }
            return Ok(Vec::new());
        };
        let complete = &buf[..=last_newline];

        let mut entries = Vec::new();
        for line in String::from_utf8_lossy(complete).lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawLogEntry>(line) {
                Ok(raw) if raw.logged_before(since) => {}
                Ok(raw) => entries.push(raw.into_entry()),
                Err(e) => warn!(error = %e, "Skipping malformed query log line"),
            }
        }

        *offset += complete.len() as u64;
        debug!(offset = *offset, entries = entries.len(), "Read query log");
        Ok(entries)
    }
}

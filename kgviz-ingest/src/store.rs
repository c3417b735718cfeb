//! Processed-file log: which source documents were already converted
//!
//! The log is an append-only, ordered set of filenames. [`FileLog`] keeps it
//! as a newline-delimited text file, [`MemoryLog`] in memory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kgviz_core::KgvizError;
use tokio::io::AsyncWriteExt;

#[async_trait]
pub trait ProcessedLog: Send {
    /// Exact-match lookup.
    async fn has(&self, name: &str) -> Result<bool, KgvizError>;

    /// Append `name`. Recording a name twice is a no-op.
    async fn record(&mut self, name: &str) -> Result<(), KgvizError>;

    /// Recorded names in insertion order.
    fn entries(&self) -> &[String];
}

/// In-memory backing, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    entries: Vec<String>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut log = Self::new();
        for name in names {
            let name = name.into();
            if !log.entries.contains(&name) {
                log.entries.push(name);
            }
        }
        log
    }
}

#[async_trait]
impl ProcessedLog for MemoryLog {
    async fn has(&self, name: &str) -> Result<bool, KgvizError> {
        Ok(self.entries.iter().any(|e| e == name))
    }

    async fn record(&mut self, name: &str) -> Result<(), KgvizError> {
        if !self.entries.iter().any(|e| e == name) {
            self.entries.push(name.to_string());
        }
        Ok(())
    }

    fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Newline-delimited log file, read in full on open.
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    entries: Vec<String>,
    /// False when the file's last line is unterminated.
    ends_with_newline: bool,
}

impl FileLog {
    /// Open the log at `path`. A missing file means nothing was processed yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, KgvizError> {
        let path = path.as_ref().to_path_buf();

        let (entries, ends_with_newline) = match tokio::fs::read_to_string(&path).await {
            Ok(data) => (
                parse_entries(&data),
                data.is_empty() || data.ends_with('\n'),
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No processed log at {:?}, starting empty", path);
                (Vec::new(), true)
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Loaded processed log with {} entries", entries.len());
        Ok(Self {
            path,
            entries,
            ends_with_newline,
        })
    }
}

fn parse_entries(data: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for line in data.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !entries.iter().any(|e| e == line) {
            entries.push(line.to_string());
        }
    }
    entries
}

#[async_trait]
impl ProcessedLog for FileLog {
    async fn has(&self, name: &str) -> Result<bool, KgvizError> {
        Ok(self.entries.iter().any(|e| e == name))
    }

    async fn record(&mut self, name: &str) -> Result<(), KgvizError> {
        if self.entries.iter().any(|e| e == name) {
            return Ok(());
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let line = if self.ends_with_newline {
            format!("{}\n", name)
        } else {
            format!("\n{}\n", name)
        };
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        self.ends_with_newline = true;
        self.entries.push(name.to_string());
        Ok(())
    }

    fn entries(&self) -> &[String] {
        &self.entries
    }
}

/*
[INPUT]:  Task collections to persist, storage directory and key
[OUTPUT]: Versioned JSON envelope on disk, loaded task collections
[POS]:    Persistence layer behind TaskStore
[UPDATE]: When bumping STORAGE_VERSION, add the upgrade path in decode_envelope
*/

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::task::Task;

/// Envelope version written by this build.
pub const STORAGE_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Temporary file error: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Unsupported storage version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Backend that holds the whole task collection under one key.
pub trait TaskRepository: Send {
    /// Read the full collection. A missing value is an empty collection.
    fn load(&self) -> Result<Vec<Task>>;

    /// Overwrite the full collection.
    fn save(&self, tasks: &[Task]) -> Result<()>;

    /// Move an unreadable stored value out of the way so the next save does
    /// not destroy it. Returns where it went, if anywhere.
    fn quarantine(&self) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Debug, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Stored layouts this build understands.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Stored {
    Envelope(Envelope),
    /// Bare array written before the envelope existed (version 0).
    Legacy(Vec<Task>),
}

pub(crate) fn encode_envelope(tasks: &[Task]) -> Result<String> {
    let envelope = EnvelopeRef {
        version: STORAGE_VERSION,
        tasks,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub(crate) fn decode_envelope(contents: &str) -> Result<Vec<Task>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Stored>(contents)? {
        Stored::Legacy(tasks) => Ok(tasks),
        Stored::Envelope(envelope) if envelope.version <= STORAGE_VERSION => Ok(envelope.tasks),
        Stored::Envelope(envelope) => Err(StorageError::UnsupportedVersion {
            found: envelope.version,
            supported: STORAGE_VERSION,
        }),
    }
}

/// JSON file at `<dir>/<key>.json`, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository for `key` inside `dir`, creating the directory if needed.
    pub fn in_dir(dir: impl AsRef<Path>, key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(StorageError::InvalidPath(format!(
                "storage key must be a plain file stem, got {key:?}"
            )));
        }
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self::new(dir.join(format!("{key}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First free name among `<file>.bak`, `<file>.1.bak`, `<file>.2.bak`, ...
    fn backup_path(&self) -> PathBuf {
        let mut attempt: u32 = 0;
        loop {
            let mut name = self.path.as_os_str().to_owned();
            if attempt > 0 {
                name.push(format!(".{attempt}"));
            }
            name.push(".bak");
            let candidate = PathBuf::from(name);
            if !candidate.exists() {
                return candidate;
            }
            attempt += 1;
        }
    }
}

impl TaskRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        decode_envelope(&contents)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let parent_dir = self.path.parent().ok_or_else(|| {
            StorageError::InvalidPath(format!("{} has no parent directory", self.path.display()))
        })?;

        let json_str = encode_envelope(tasks)?;
        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(json_str.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path)?;
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path();
        fs::rename(&self.path, &backup)?;
        Ok(Some(backup))
    }
}

/// In-memory backend holding the encoded envelope, shareable between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text, as if read from disk.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Raw stored text, if anything has been stored.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl TaskRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<Task>> {
        match self.contents() {
            Some(contents) => decode_envelope(&contents),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let encoded = encode_envelope(tasks)?;
        if let Ok(mut guard) = self.contents.lock() {
            *guard = Some(encoded);
        }
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        if let Ok(mut guard) = self.contents.lock() {
            guard.take();
        }
        Ok(None)
    }
}

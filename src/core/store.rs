use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::Result;

/// Single key-value slot holding the player's display name.
///
/// A missing name is not an error: `load` returns `Ok(None)`.
pub trait NameSlot {
    fn load(&self) -> Result<Option<String>>;
    fn save(&mut self, name: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredName {
    display_name: String,
    updated_at: DateTime<Utc>,
}

/// JSON-file backed name slot.
pub struct FileNameSlot {
    path: PathBuf,
}

impl FileNameSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl NameSlot for FileNameSlot {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(None);
        }
        let stored: StoredName = serde_json::from_str(&json)?;
        Ok(Some(stored.display_name).filter(|name| !name.trim().is_empty()))
    }

    fn save(&mut self, name: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredName {
            display_name: name.to_string(),
            updated_at: Utc::now(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory slot, for sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryNameSlot {
    name: Option<String>,
}

impl MemoryNameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }
}

impl NameSlot for MemoryNameSlot {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.name.clone())
    }

    fn save(&mut self, name: &str) -> Result<()> {
        self.name = Some(name.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.name = None;
        Ok(())
    }
}

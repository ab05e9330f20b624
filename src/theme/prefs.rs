use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::foundation::error::{FolioError, FolioResult};

/// Key/value preference storage, the analogue of browser local storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> FolioResult<()>;
}

/// Volatile store for tests and hosts without a writable profile.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut prefs = Self::default();
        prefs.values.insert(key.to_string(), value.to_string());
        prefs
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> FolioResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON string map persisted to a single file.
///
/// A missing file reads as empty; the file and its parent directory are created on first write.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/folio/preferences.json`, falling back to the working directory.
    pub fn default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("folio").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> FolioResult<BTreeMap<String, String>> {
        let f = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(FolioError::preferences(format!(
                    "open '{}': {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            FolioError::preferences(format!("parse '{}': {e}", self.path.display()))
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> FolioResult<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                FolioError::preferences(format!("create dir '{}': {e}", parent.display()))
            })?;
        }
        let f = File::create(&self.path).map_err(|e| {
            FolioError::preferences(format!("create '{}': {e}", self.path.display()))
        })?;
        serde_json::to_writer_pretty(BufWriter::new(f), &values)?;
        Ok(())
    }
}

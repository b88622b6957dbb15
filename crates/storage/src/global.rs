//! Global managed files.
//!
//! Stores one JSON record per managed file in a directory owned by the
//! host instance. These are shared by every run and consulted last.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mbdefaults_core::{BranchRun, ConfigOrigin, NamedConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{validate_id, ConfigStore, Result};

/// A managed file registered with the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedConfig {
    /// Identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Free-form comment
    #[serde(default)]
    pub comment: String,

    /// File content
    pub content: String,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl ManagedConfig {
    /// Create a managed file named after its identifier.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            comment: String::new(),
            content: content.into(),
            updated_at: Utc::now(),
        }
    }

    /// Set name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// File-based store of managed files.
#[derive(Debug, Clone)]
pub struct GlobalConfigFiles {
    root: PathBuf,
}

impl GlobalConfigFiles {
    /// Open the store, creating its directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Save a managed file (create or replace).
    #[instrument(skip(self, config), fields(id = %config.id))]
    pub fn save(&self, config: &ManagedConfig) -> Result<()> {
        validate_id(&config.id)?;
        let json = serde_json::to_string_pretty(config)?;
        fs::write(self.config_path(&config.id), json.as_bytes())?;
        info!("Saved managed file");
        Ok(())
    }

    /// Load a managed file by ID.
    ///
    /// A record whose stored ID differs from its file name is ignored.
    pub fn get(&self, id: &str) -> Result<Option<ManagedConfig>> {
        validate_id(id)?;
        let path = self.config_path(id);
        Ok(read_json(&path)?.filter(|record| matches_file(&path, record)))
    }

    /// List all managed files, sorted by ID.
    ///
    /// Fails on the first record that cannot be read or parsed.
    pub fn list(&self) -> Result<Vec<ManagedConfig>> {
        let mut items = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(record) = read_json(&path)? {
                if matches_file(&path, &record) {
                    items.push(record);
                }
            }
        }
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    /// Remove a managed file. Returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        validate_id(id)?;
        match fs::remove_file(self.config_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl ConfigStore for GlobalConfigFiles {
    fn lookup(&self, _run: &BranchRun, id: &str) -> Result<Option<NamedConfig>> {
        let found = self.get(id)?;
        if found.is_none() {
            debug!(id, "Not present in global managed files");
        }
        Ok(found.map(|c| NamedConfig::new(c.id, c.content, ConfigOrigin::Global)))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn matches_file(path: &Path, record: &ManagedConfig) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str());
    if stem == Some(record.id.as_str()) {
        return true;
    }
    warn!(path = %path.display(), id = %record.id, "Managed file ID does not match its file name");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    #[test]
    fn test_save_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlobalConfigFiles::open(dir.path()).unwrap();

        let config = ManagedConfig::new("Jenkinsfile", "pipeline {}").with_comment("org default");
        store.save(&config).unwrap();

        let loaded = store.get("Jenkinsfile").unwrap().unwrap();
        assert_eq!(loaded, config);

        assert!(store.remove("Jenkinsfile").unwrap());
        assert!(!store.remove("Jenkinsfile").unwrap());
        assert!(store.get("Jenkinsfile").unwrap().is_none());
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        GlobalConfigFiles::open(dir.path())
            .unwrap()
            .save(&ManagedConfig::new("Jenkinsfile", "pipeline {}"))
            .unwrap();

        let reopened = GlobalConfigFiles::open(dir.path()).unwrap();
        assert_eq!(reopened.get("Jenkinsfile").unwrap().unwrap().content, "pipeline {}");
    }

    #[test]
    fn test_list_is_sorted_and_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlobalConfigFiles::open(dir.path()).unwrap();
        store.save(&ManagedConfig::new("zeta", "z")).unwrap();
        store.save(&ManagedConfig::new("alpha", "a")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_corrupt_record_fails_list_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlobalConfigFiles::open(dir.path()).unwrap();
        store.save(&ManagedConfig::new("alpha", "a")).unwrap();
        fs::write(dir.path().join("Jenkinsfile.json"), "{ corrupt").unwrap();

        assert!(matches!(store.list(), Err(StoreError::Json(_))));

        let run = BranchRun::new("app/main", "main", 1);
        assert!(matches!(store.lookup(&run, "Jenkinsfile"), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_record_under_wrong_file_name_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlobalConfigFiles::open(dir.path()).unwrap();
        store.save(&ManagedConfig::new("alpha", "a")).unwrap();
        let stray = serde_json::to_string(&ManagedConfig::new("beta", "b")).unwrap();
        fs::write(dir.path().join("gamma.json"), stray).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["alpha".to_string()]);
        assert!(store.get("gamma").unwrap().is_none());
        assert!(store.get("beta").unwrap().is_none());
    }

    #[test]
    fn test_lookup_ignores_run_and_tags_origin() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlobalConfigFiles::open(dir.path()).unwrap();
        store.save(&ManagedConfig::new("Jenkinsfile", "pipeline {}")).unwrap();

        let run = BranchRun::new("app/any", "any", 9);
        let config = store.lookup(&run, "Jenkinsfile").unwrap().unwrap();
        assert_eq!(config.origin, ConfigOrigin::Global);
        assert_eq!(config.content, "pipeline {}");
    }

    #[test]
    fn test_save_rejects_invalid_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlobalConfigFiles::open(dir.path()).unwrap();
        let result = store.save(&ManagedConfig::new("../escape", "x"));
        assert!(matches!(result, Err(StoreError::InvalidId(_))));
    }
}

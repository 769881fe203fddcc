//! File-backed registry store

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::Registry;
use crate::common::write_atomic;
use crate::error::{Result, TerraworkError};

/// Persists a [`Registry`] as a JSON object in a single file.
///
/// Every operation reads the whole file and rewrites it in full. There is
/// no cross-process lock: two concurrent writers race and the last rename
/// wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the registry, or an empty one if the file does not exist yet
    pub fn load(&self) -> Result<Registry> {
        if !self.path.exists() {
            return Ok(Registry::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| TerraworkError::ParseError {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Serialize the full registry and atomically replace the file
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        registry
            .serialize(&mut ser)
            .map_err(|e| TerraworkError::ParseError {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        buf.push(b'\n');

        write_atomic(&self.path, &buf)
    }

    /// Load, mutate, and save if `f` reports a change.
    ///
    /// `f` returns `(changed, value)`; `value` is handed back to the caller.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Registry) -> (bool, T),
    {
        let mut registry = self.load()?;
        let (changed, value) = f(&mut registry);
        if changed {
            self.save(&registry)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("workspaces.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut registry = Registry::new();
        registry.record("dev", "web");
        registry.record("dev", "db");
        registry.ensure("staging");

        store.save(&registry).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, registry);

        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), registry);
    }

    #[test]
    fn test_saved_file_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut registry = Registry::new();
        registry.record("dev", "web");
        store.save(&registry).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "{\n    \"dev\": [\n        \"web\"\n    ]\n}\n");
    }

    #[test]
    fn test_reads_file_written_by_other_tools() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"dev": ["web", "api"], "qa": []}"#).unwrap();

        let registry = store.load().unwrap();
        assert_eq!(
            registry.containers("dev").unwrap(),
            ["web".to_string(), "api".to_string()]
        );
        assert!(registry.containers("qa").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(TerraworkError::ParseError { .. })));

        fs::write(store.path(), "").unwrap();
        assert!(matches!(store.load(), Err(TerraworkError::ParseError { .. })));

        fs::write(store.path(), r#"{"dev": "web"}"#).unwrap();
        assert!(matches!(store.load(), Err(TerraworkError::ParseError { .. })));
    }

    #[test]
    fn test_update_skips_save_when_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let created = store.update(|r| (false, r.ensure("dev"))).unwrap();
        assert!(created);
        assert!(!store.path().exists());

        store
            .update(|r| {
                let added = r.ensure("dev");
                (added, added)
            })
            .unwrap();
        assert!(store.load().unwrap().contains_workspace("dev"));
    }
}

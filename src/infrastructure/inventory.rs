//! Inventory files
//!
//! An inventory is the output of whatever enumerated the cloud account: a
//! YAML or JSON document listing raw resource records. A directory of
//! inventories is read in sorted path order.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::discovery::{RawResource, ResourceEnumerator};
use super::error::{ImportError, ImportResult};
use crate::traits::FileSystem;

/// A parsed inventory document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub resources: Vec<RawResource>,
}

impl Inventory {
    /// Parse an inventory, choosing JSON or YAML by file extension
    pub fn parse(path: &Path, contents: &str) -> ImportResult<Self> {
        if is_json(path) {
            serde_json::from_str(contents).map_err(|e| {
                ImportError::ConfigParse(format!("{}: {}", path.display(), e))
            })
        } else {
            serde_yaml::from_str(contents).map_err(|e| {
                ImportError::ConfigParse(format!("{}: {}", path.display(), e))
            })
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_inventory_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml" | "json"))
}

/// Enumerates records from inventory files on disk
pub struct InventoryEnumerator<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
    source: String,
}

impl<'a> InventoryEnumerator<'a> {
    pub fn new(fs: &'a dyn FileSystem, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source = path.display().to_string();
        Self { fs, path, source }
    }

    /// The inventory files this enumerator will read, in order
    pub fn files(&self) -> ImportResult<Vec<PathBuf>> {
        if !self.fs.exists(&self.path) {
            return Err(ImportError::InvalidInput(format!(
                "Inventory not found: {}",
                self.path.display()
            )));
        }

        if !self.fs.is_dir(&self.path) {
            return Ok(vec![self.path.clone()]);
        }

        let mut files: Vec<PathBuf> = self
            .fs
            .walk_dir(&self.path, 1)
            .map_err(|e| ImportError::FileSystem(format!("{:#}", e)))?
            .into_iter()
            .filter(|p| self.fs.is_file(p) && is_inventory_file(p))
            .collect();
        files.sort();

        Ok(files)
    }
}

impl ResourceEnumerator for InventoryEnumerator<'_> {
    fn source(&self) -> &str {
        &self.source
    }

    fn enumerate(&self) -> ImportResult<Vec<RawResource>> {
        let mut records = Vec::new();

        for file in self.files()? {
            let contents = self
                .fs
                .read_to_string(&file)
                .map_err(|e| ImportError::FileSystem(format!("{:#}", e)))?;
            let inventory = Inventory::parse(&file, &contents)?;

            debug!(
                file = %file.display(),
                records = inventory.resources.len(),
                "loaded inventory"
            );
            records.extend(inventory.resources);
        }

        Ok(records)
    }
}

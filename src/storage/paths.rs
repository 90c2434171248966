// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the JSON file storage layout.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Default data directory when `DATA_DIR` names none explicitly.
pub const DATA_ROOT: &str = "./data";

#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every document of one collection.
    pub fn collection_dir(&self, kind: &str) -> PathBuf {
        self.root.join(kind)
    }

    /// Path to a single resource document.
    pub fn document(&self, kind: &str, id: Uuid) -> PathBuf {
        self.collection_dir(kind).join(format!("{id}.json"))
    }
}

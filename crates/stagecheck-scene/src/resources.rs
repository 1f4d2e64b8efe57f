//! Companion resource bundle.
//!
//! glTF files may reference external buffers and images by URI. The caller
//! supplies those payloads up front, keyed by filename; the importer
//! substitutes them for matching references. The same filename always
//! resolves to the same bytes, independent of request order.

use std::collections::HashMap;

/// In-memory companion resources, keyed by filename.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    entries: HashMap<String, Vec<u8>>,
}

impl ResourceBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource under the given filename, replacing any previous
    /// entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }

    /// Resolves a reference URI: exact match first, then the URI's final
    /// path segment. Returns `None` when nothing matches.
    pub fn resolve(&self, uri: &str) -> Option<&[u8]> {
        if let Some(bytes) = self.entries.get(uri) {
            return Some(bytes);
        }
        let trimmed = uri.split(['?', '#']).next().unwrap_or(uri);
        let file_name = trimmed.rsplit('/').next()?;
        self.entries.get(file_name).map(Vec::as_slice)
    }

    /// Number of held resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bundle holds no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

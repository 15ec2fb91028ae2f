use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::store::PointId;

/// Display names keyed by point identifier.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashMap<PointId, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label used for points that were never given a name.
    pub fn default_name(id: PointId) -> String {
        format!("Node {}", id + 1)
    }

    /// Stored name for `id`, or the default label.
    pub fn get(&self, id: PointId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Self::default_name(id))
    }

    /// Overwrite the name for `id`. Blank names are rejected.
    pub fn set(&mut self, id: PointId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName { id });
        }
        self.names.insert(id, name);
        Ok(())
    }

    /// Insert without validation; the store only passes non-blank names here.
    pub(crate) fn assign(&mut self, id: PointId, name: String) {
        self.names.insert(id, name);
    }

    pub fn remove(&mut self, id: PointId) -> Option<String> {
        self.names.remove(&id)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

//! Old-id → new-id mapping threaded through the passes

use std::collections::BTreeMap;

/// Partial function from original node ids to the ids of the nodes that
/// replace them. An old id, once mapped, keeps its first mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMapping {
    entries: BTreeMap<String, String>,
}

impl IdMapping {
    pub fn new() -> Self {
        IdMapping::default()
    }

    pub fn get(&self, old_id: &str) -> Option<&str> {
        self.entries.get(old_id).map(String::as_str)
    }

    pub fn contains(&self, old_id: &str) -> bool {
        self.entries.contains_key(old_id)
    }

    /// Record `old_id → new_id` unless `old_id` is already mapped.
    /// Returns whether the entry was recorded.
    pub fn insert(&mut self, old_id: impl Into<String>, new_id: impl Into<String>) -> bool {
        use std::collections::btree_map::Entry;
        match self.entries.entry(old_id.into()) {
            Entry::Vacant(slot) => {
                slot.insert(new_id.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Absorb another mapping without overwriting existing entries. Returns
    /// the number of entries that were ignored because they were already mapped.
    pub fn extend(&mut self, other: IdMapping) -> usize {
        let mut conflicts = 0;
        for (old_id, new_id) in other.entries {
            if let Some(existing) = self.entries.get(&old_id) {
                if *existing != new_id {
                    tracing::debug!(
                        "Keeping mapping {} -> {}, ignoring later {}",
                        old_id,
                        existing,
                        new_id
                    );
                }
                conflicts += 1;
                continue;
            }
            self.entries.insert(old_id, new_id);
        }
        conflicts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

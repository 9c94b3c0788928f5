//! Insertion-ordered string interning for task ids.
//!
//! Node ids are assigned in first-seen order and never reused, so iterating
//! `0..len()` walks tasks in the order the caller supplied them. Critical
//! path tie-breaking depends on that order.

use rustc_hash::FxHashMap;

/// Interned node id (u32 for compact storage and fast hashing).
pub type NodeId = u32;

#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner {
    to_int: FxHashMap<String, NodeId>,
    from_int: Vec<String>,
}

impl TaskIdInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its id and whether it was newly added.
    /// A repeated string keeps the id (and position) of its first occurrence.
    pub fn intern(&mut self, s: &str) -> (NodeId, bool) {
        if let Some(&id) = self.to_int.get(s) {
            return (id, false);
        }
        let id = self.from_int.len() as NodeId;
        self.from_int.push(s.to_string());
        self.to_int.insert(s.to_string(), id);
        (id, true)
    }

    #[inline]
    pub fn get(&self, s: &str) -> Option<NodeId> {
        self.to_int.get(s).copied()
    }

    #[inline]
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.from_int.len() as NodeId
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let mut interner = TaskIdInterner::with_capacity(10);

        let (id1, new1) = interner.intern("task_a");
        let (id2, new2) = interner.intern("task_b");
        let (id3, new3) = interner.intern("task_a");

        assert!(new1 && new2 && !new3);
        assert_eq!(id1, id3);
        assert_ne!(id1, id2);

        assert_eq!(interner.resolve(id1), Some("task_a"));
        assert_eq!(interner.resolve(id2), Some("task_b"));
        assert_eq!(interner.get("task_a"), Some(id1));
        assert_eq!(interner.get("nonexistent"), None);
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut interner = TaskIdInterner::default();
        for name in ["zeta", "alpha", "mid", "alpha"] {
            interner.intern(name);
        }
        let names: Vec<&str> = interner
            .ids()
            .filter_map(|id| interner.resolve(id))
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}

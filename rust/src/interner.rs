//! Title interning for dependency resolution.
//!
//! Each task title in a run gets a dense integer id equal to its position in
//! the input, so completion tracking is a bit vector instead of string sets.

use rustc_hash::FxHashMap;

/// Interned task id (index into the input list).
pub type TaskIdx = u32;

/// Maps task titles to their input positions.
#[derive(Debug, Clone, Default)]
pub struct TitleInterner {
    to_idx: FxHashMap<String, TaskIdx>,
}

impl TitleInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Register a new title and return its id.
    ///
    /// Returns `Err` with the existing id if the title was already registered.
    pub fn insert(&mut self, title: &str) -> Result<TaskIdx, TaskIdx> {
        if let Some(&idx) = self.to_idx.get(title) {
            return Err(idx);
        }
        let idx = self.to_idx.len() as TaskIdx;
        self.to_idx.insert(title.to_string(), idx);
        Ok(idx)
    }

    #[inline]
    pub fn get(&self, title: &str) -> Option<TaskIdx> {
        self.to_idx.get(title).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut interner = TitleInterner::with_capacity(4);

        let a = interner.insert("Design").unwrap();
        let b = interner.insert("Build").unwrap();

        assert_eq!((a, b), (0, 1));
        assert_eq!(interner.get("Build"), Some(1));
        assert_eq!(interner.get("Ghost"), None);
        assert_eq!(interner.get("Design"), Some(0));
    }

    #[test]
    fn test_duplicate_reports_existing_id() {
        let mut interner = TitleInterner::default();
        interner.insert("A").unwrap();
        interner.insert("B").unwrap();

        assert_eq!(interner.insert("A"), Err(0));
        assert_eq!(interner.insert("C"), Ok(2));
    }

    #[test]
    fn test_titles_are_case_sensitive() {
        let mut interner = TitleInterner::default();
        interner.insert("deploy").unwrap();
        assert!(interner.insert("Deploy").is_ok());
        assert_eq!(interner.get("DEPLOY"), None);
    }
}

//! Interactive column-selector state
//!
//! Archetypes with a user-adjustable dimension (color grouping for the
//! selectable stacked bar, x-axis and color for the ranked bar) remember
//! the user's choice per table shape. The storage itself belongs to the
//! host session; this module only defines the store interface and the
//! init/reset rules, so the reset logic is testable without a live UI.
//!
//! Rules: an unseen key initializes to the first valid option; a stored
//! value that is no longer among the valid options (the table changed
//! under a reused key) resets to the first valid option; host-made
//! selection changes are written through immediately via [`SelectorStore::set`].

use std::collections::HashMap;

/// Key-value store for interactive column selections, implemented by the
/// host session.
pub trait SelectorStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store backed by a `HashMap`. Suitable for tests, the CLI,
/// and hosts without their own session state.
#[derive(Debug, Default, Clone)]
pub struct MemorySelectorStore {
    entries: HashMap<String, String>,
}

impl MemorySelectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SelectorStore for MemorySelectorStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Resolve the current selection for `key` against the valid options.
///
/// Initializes unseen keys to `valid_options[0]` and resets stale values
/// (not in `valid_options`) the same way. Returns `None` only when there
/// are no valid options at all.
pub fn get_or_init(
    store: &mut dyn SelectorStore,
    key: &str,
    valid_options: &[String],
) -> Option<String> {
    let first = valid_options.first()?;

    match store.get(key) {
        Some(current) if valid_options.contains(&current) => Some(current),
        _ => {
            store.set(key, first.clone());
            Some(first.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unseen_key_initializes_to_first_option() {
        let mut store = MemorySelectorStore::new();
        let opts = options(&["region", "segment"]);
        let selected = get_or_init(&mut store, "k1", &opts);
        assert_eq!(selected.as_deref(), Some("region"));
        // The initialization is persisted
        assert_eq!(store.get("k1").as_deref(), Some("region"));
    }

    #[test]
    fn test_valid_stored_value_is_kept() {
        let mut store = MemorySelectorStore::new();
        store.set("k1", "segment".to_string());
        let opts = options(&["region", "segment"]);
        let selected = get_or_init(&mut store, "k1", &opts);
        assert_eq!(selected.as_deref(), Some("segment"));
    }

    #[test]
    fn test_stale_value_resets_to_first_option() {
        let mut store = MemorySelectorStore::new();
        // Selection made against a previous table shape
        store.set("k1", "A".to_string());
        // The table changed; "A" is no longer a valid option
        let opts = options(&["B", "C"]);
        let selected = get_or_init(&mut store, "k1", &opts);
        assert_eq!(selected.as_deref(), Some("B"));
        assert_eq!(store.get("k1").as_deref(), Some("B"));
    }

    #[test]
    fn test_different_keys_hold_independent_state() {
        let mut store = MemorySelectorStore::new();
        let opts = options(&["x", "y"]);
        get_or_init(&mut store, "f1", &opts);
        store.set("f1", "y".to_string());
        // A second fingerprint starts fresh
        let selected = get_or_init(&mut store, "f2", &opts);
        assert_eq!(selected.as_deref(), Some("x"));
        assert_eq!(store.get("f1").as_deref(), Some("y"));
    }

    #[test]
    fn test_empty_options_yield_none() {
        let mut store = MemorySelectorStore::new();
        assert_eq!(get_or_init(&mut store, "k1", &[]), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_writes_through() {
        let mut store = MemorySelectorStore::new();
        let opts = options(&["a", "b"]);
        get_or_init(&mut store, "k", &opts);
        store.set("k", "b".to_string());
        // Re-resolution after a host-made change reflects the new choice
        assert_eq!(get_or_init(&mut store, "k", &opts).as_deref(), Some("b"));
    }
}

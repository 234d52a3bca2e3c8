use std::collections::BTreeMap;

pub const SCROLL_KEY: &str = "homeScrollPosition";
pub const BACKGROUND_KEY: &str = "backgroundIndex";

/// Transient key/value state the presentation layer injects: the
/// index-view scroll offset and the display-variant rotation. The render
/// pipeline takes no dependency on this store.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64);
}

/// In-memory store, enough for one session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

/// Scroll offset saved when leaving the index view; read once on return.
pub fn saved_scroll(store: &dyn StateStore) -> Option<i64> {
    store.get(SCROLL_KEY)
}

pub fn save_scroll(store: &mut dyn StateStore, offset: i64) {
    store.set(SCROLL_KEY, offset);
}

/// Advance the display-variant rotation, wrapping at `variant_count`.
/// The first call of a session lands on variant 0.
pub fn next_background(store: &mut dyn StateStore, variant_count: i64) -> i64 {
    if variant_count <= 0 {
        return 0;
    }
    let next = (store.get(BACKGROUND_KEY).unwrap_or(-1) + 1).rem_euclid(variant_count);
    store.set(BACKGROUND_KEY, next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(saved_scroll(&store), None);
        save_scroll(&mut store, 480);
        assert_eq!(saved_scroll(&store), Some(480));
    }

    #[test]
    fn background_rotation_wraps() {
        let mut store = MemoryStore::default();
        assert_eq!(next_background(&mut store, 3), 0);
        assert_eq!(next_background(&mut store, 3), 1);
        assert_eq!(next_background(&mut store, 3), 2);
        assert_eq!(next_background(&mut store, 3), 0);
    }

    #[test]
    fn zero_variants_stay_at_zero() {
        let mut store = MemoryStore::default();
        assert_eq!(next_background(&mut store, 0), 0);
    }
}

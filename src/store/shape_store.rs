use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::geofile::feature::Feature;

/// In-memory collection of the shapes drawn during this session.
///
/// Holds exactly the features appended since the last clear, in insertion order. All access
/// goes through one lock so that handlers on different runtime workers see a consistent
/// sequence of mutations.
#[derive(Debug, Default)]
pub struct ShapeStore {
    features: Mutex<Vec<Feature>>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents.
    pub fn list(&self) -> Vec<Feature> {
        self.lock().clone()
    }

    /// Append a feature to the end and return the new total count.
    pub fn append(&self, feature: Feature) -> usize {
        let mut features = self.lock();
        features.push(feature);
        features.len()
    }

    /// Remove all features.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave the Vec half-mutated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<Feature>> {
        self.features.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;
    use serde_json::json;

    use super::ShapeStore;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn test_list_returns_appended_in_order(#[case] count: usize) {
        let store = ShapeStore::new();
        let features: Vec<_> = (0..count)
            .map(|idx| json!({"type": "Feature", "properties": {"idx": idx}}))
            .collect();
        for feature in &features {
            store.append(feature.clone());
        }
        assert_eq!(store.list(), features);
    }

    #[test]
    fn test_append_count_is_monotonic() {
        let store = ShapeStore::new();
        for expected in 1..=4 {
            assert_eq!(store.append(json!({"type": "Feature"})), expected);
        }
    }

    #[test]
    fn test_append_stores_without_deduplication() {
        let store = ShapeStore::new();
        let feature = json!({"type": "Feature"});
        store.append(feature.clone());
        store.append(feature.clone());
        assert_eq!(store.list(), vec![feature.clone(), feature]);
    }

    #[test]
    fn test_clear_empties_and_is_idempotent() {
        let store = ShapeStore::new();
        store.clear();
        assert!(store.list().is_empty());

        store.append(json!({"type": "Feature"}));
        store.append(json!({"type": "Feature"}));
        store.clear();
        store.clear();
        assert!(store.list().is_empty());
        assert_eq!(store.append(json!({"type": "Feature"})), 1);
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        let store = Arc::new(ShapeStore::new());
        let handles: Vec<_> = (0..8)
            .map(|thread_idx| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for idx in 0..50 {
                        store.append(json!({"thread": thread_idx, "idx": idx}));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.list().len(), 400);
    }
}

//! FILENAME: core/pivot-engine/src/cache.rs
//! Pivot Cache - memoizes the last build.
//!
//! Building is pure, so a result can be reused for as long as the inputs
//! are unchanged. The key is (dataset identity, value descriptor, column
//! dimension, row dimension); dataset identity is the `Arc` of the loaded
//! records, so a fresh fetch always rebuilds even if it is structurally equal.
//! Failed builds are never cached.

use std::sync::Arc;

use engine::Dataset;

use crate::aggregation::AggregationRegistry;
use crate::definition::{FieldRef, ValueDescriptor};
use crate::engine::{PivotBuilder, PivotResult};
use crate::error::PivotError;

struct CacheEntry {
    dataset: Dataset,
    value: ValueDescriptor,
    column: Option<FieldRef>,
    row: Option<FieldRef>,
    result: Arc<PivotResult>,
}

impl CacheEntry {
    fn matches(
        &self,
        dataset: &Dataset,
        value: &ValueDescriptor,
        column: Option<&FieldRef>,
        row: Option<&FieldRef>,
    ) -> bool {
        self.dataset.same_identity(dataset)
            && &self.value == value
            && self.column.as_ref() == column
            && self.row.as_ref() == row
    }
}

/// Holds a registry and the most recent pivot built with it.
pub struct PivotCache {
    registry: AggregationRegistry,
    entry: Option<CacheEntry>,
    build_count: u64,
}

impl PivotCache {
    pub fn new(registry: AggregationRegistry) -> Self {
        PivotCache {
            registry,
            entry: None,
            build_count: 0,
        }
    }

    pub fn registry(&self) -> &AggregationRegistry {
        &self.registry
    }

    /// Mutable access to the registry. Drops the memoized result, since a
    /// re-registered kind may produce different cells.
    pub fn registry_mut(&mut self) -> &mut AggregationRegistry {
        self.entry = None;
        &mut self.registry
    }

    /// How many times a pivot was actually built (cache misses).
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    /// Drops the memoized result.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Returns the memoized result when the inputs are unchanged, otherwise
    /// builds, stores and returns a new one.
    pub fn get_or_build(
        &mut self,
        dataset: &Dataset,
        value: &ValueDescriptor,
        column: Option<&FieldRef>,
        row: Option<&FieldRef>,
    ) -> Result<Arc<PivotResult>, PivotError> {
        if let Some(entry) = &self.entry {
            if entry.matches(dataset, value, column, row) {
                log::trace!(target: "PIVOT", "cache hit for '{}'", value.property());
                return Ok(Arc::clone(&entry.result));
            }
        }

        let result = Arc::new(PivotBuilder::new(&self.registry).build(dataset, value, column, row)?);
        self.build_count += 1;
        self.entry = Some(CacheEntry {
            dataset: dataset.clone(),
            value: value.clone(),
            column: column.cloned(),
            row: row.cloned(),
            result: Arc::clone(&result),
        });
        Ok(result)
    }
}

impl Default for PivotCache {
    fn default() -> Self {
        PivotCache::new(AggregationRegistry::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Record;

    fn dataset() -> Dataset {
        Dataset::loaded(vec![
            Record::from_pairs([("t.s", "A")]),
            Record::from_pairs([("t.s", "B")]),
        ])
    }

    #[test]
    fn test_unchanged_inputs_hit_the_cache() {
        let mut cache = PivotCache::default();
        let data = dataset();
        let field = FieldRef::qualified("t", "s");
        let value = field.count();

        let first = cache.get_or_build(&data, &value, Some(&field), None).unwrap();
        let second = cache.get_or_build(&data.clone(), &value, Some(&field), None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.build_count(), 1);
    }

    #[test]
    fn test_changed_inputs_rebuild() {
        let mut cache = PivotCache::default();
        let data = dataset();
        let field = FieldRef::qualified("t", "s");
        let value = field.count();

        cache.get_or_build(&data, &value, Some(&field), None).unwrap();
        cache.get_or_build(&data, &value, None, Some(&field)).unwrap();
        // Structurally equal but a different fetch.
        cache.get_or_build(&dataset(), &value, None, Some(&field)).unwrap();
        assert_eq!(cache.build_count(), 3);

        cache.invalidate();
        cache.get_or_build(&dataset(), &value, None, Some(&field)).unwrap();
        assert_eq!(cache.build_count(), 4);
    }

    #[test]
    fn test_pending_to_loaded_rebuilds() {
        let mut cache = PivotCache::default();
        let field = FieldRef::qualified("t", "s");
        let value = field.count();

        let pending = cache.get_or_build(&Dataset::Pending, &value, None, None).unwrap();
        assert!(pending.is_pending());
        let loaded = cache.get_or_build(&dataset(), &value, None, None).unwrap();
        assert!(!loaded.is_pending());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = PivotCache::default();
        let field = FieldRef::qualified("t", "s");
        let median = field.aggregate("median");
        assert!(cache.get_or_build(&dataset(), &median, None, None).is_err());
        assert_eq!(cache.build_count(), 0);
    }
}

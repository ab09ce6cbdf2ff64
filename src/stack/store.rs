use super::snapshot::ContentSnapshot;
use super::wire;
use crate::storage::{Defaults, MAX_STACK_SIZE_KEY};
use thiserror::Error;
use tracing::{debug, error, warn};

pub const DEFAULT_CAPACITY: usize = 10;
pub const MIN_CAPACITY: usize = 5;
pub const MAX_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack is full ({capacity} items)")]
    CapacityExceeded { capacity: usize },

    #[error("index {index} is out of range for a stack of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("capacity {requested} is outside {min}..={max}", min = MIN_CAPACITY, max = MAX_CAPACITY)]
    CapacityOutOfRange { requested: usize },

    #[error("capacity {requested} is smaller than the {len} items already stacked")]
    CapacityBelowLength { requested: usize, len: usize },
}

/// Ordered, capacity-gated stack of snapshots, newest first.
///
/// Every successful mutation is written through to the backing [`Defaults`]
/// before the call returns. Write failures are logged and the in-memory
/// list stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct StackStore<D: Defaults> {
    items: Vec<ContentSnapshot>,
    capacity: usize,
    defaults: D,
}

impl<D: Defaults> StackStore<D> {
    /// Loads the stack and capacity preference from `defaults`.
    pub fn open(defaults: D) -> Self {
        let capacity = load_capacity(&defaults);
        let items = wire::load(&defaults);

        if items.len() > capacity {
            warn!(
                items = items.len(),
                capacity, "Saved stack holds more items than the capacity allows"
            );
        }
        debug!(items = items.len(), capacity, "Opened clipboard stack");

        Self {
            items,
            capacity,
            defaults,
        }
    }

    pub fn items(&self) -> &[ContentSnapshot] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ContentSnapshot> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn defaults(&self) -> &D {
        &self.defaults
    }

    pub fn push(&mut self, snapshot: ContentSnapshot) -> Result<(), StackError> {
        if self.is_full() {
            return Err(StackError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.insert(0, snapshot);
        self.save();
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<ContentSnapshot, StackError> {
        if index >= self.items.len() {
            return Err(StackError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.save();
        Ok(removed)
    }

    pub fn remove_all(&mut self) {
        self.items.clear();
        self.save();
    }

    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), StackError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
            return Err(StackError::CapacityOutOfRange {
                requested: capacity,
            });
        }
        if capacity < self.items.len() {
            return Err(StackError::CapacityBelowLength {
                requested: capacity,
                len: self.items.len(),
            });
        }

        self.capacity = capacity;
        if let Err(e) = self
            .defaults
            .set(MAX_STACK_SIZE_KEY, capacity.to_string().as_bytes())
        {
            error!("Failed to save stack capacity: {e:#}");
        }
        Ok(())
    }

    fn save(&mut self) {
        if let Err(e) = wire::save(&mut self.defaults, &self.items) {
            error!("Failed to save clipboard stack: {e:#}");
        }
    }
}

fn load_capacity<D: Defaults>(defaults: &D) -> usize {
    let raw = match defaults.get(MAX_STACK_SIZE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return DEFAULT_CAPACITY,
        Err(e) => {
            warn!("Failed to read stack capacity: {e:#}");
            return DEFAULT_CAPACITY;
        }
    };

    match std::str::from_utf8(&raw)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
    {
        Some(0) | None => {
            warn!("Ignoring invalid stack capacity preference");
            DEFAULT_CAPACITY
        }
        Some(capacity) if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) => {
            let clamped = capacity.clamp(MIN_CAPACITY, MAX_CAPACITY);
            warn!(capacity, clamped, "Stack capacity preference is out of range");
            clamped
        }
        Some(capacity) => capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Content;
    use crate::storage::{MemoryDefaults, CLIPBOARD_STACK_KEY};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> ContentSnapshot {
        ContentSnapshot::new(Content::Text(s.to_string()))
    }

    fn store_with_capacity(capacity: usize) -> StackStore<MemoryDefaults> {
        let mut defaults = MemoryDefaults::new();
        defaults
            .set(MAX_STACK_SIZE_KEY, capacity.to_string().as_bytes())
            .unwrap();
        StackStore::open(defaults)
    }

    fn labels<D: Defaults>(store: &StackStore<D>) -> Vec<String> {
        store.items().iter().map(|s| s.preview_label()).collect()
    }

    #[test]
    fn test_open_empty_uses_default_capacity() {
        let store = StackStore::open(MemoryDefaults::new());
        assert!(store.is_empty());
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_push_inserts_at_front() {
        let mut store = store_with_capacity(10);
        for label in ["A", "B", "C"] {
            store.push(text(label)).unwrap();
            assert_eq!(store.get(0).unwrap().preview_label(), label);
        }
        assert_eq!(store.len(), 3);
        assert_eq!(labels(&store), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_push_when_full_is_rejected() {
        let mut store = store_with_capacity(2);
        store.push(text("A")).unwrap();
        store.push(text("B")).unwrap();
        assert_eq!(labels(&store), vec!["B", "A"]);

        let err = store.push(text("C")).unwrap_err();
        assert_eq!(err, StackError::CapacityExceeded { capacity: 2 });
        assert_eq!(labels(&store), vec!["B", "A"]);
    }

    #[test]
    fn test_remove_at_shifts_following_items() {
        let mut store = store_with_capacity(10);
        for label in ["C", "B", "A"] {
            store.push(text(label)).unwrap();
        }

        let removed = store.remove_at(0).unwrap();
        assert_eq!(removed.preview_label(), "A");
        assert_eq!(labels(&store), vec!["B", "C"]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = store_with_capacity(10);
        store.push(text("A")).unwrap();

        let err = store.remove_at(1).unwrap_err();
        assert_eq!(err, StackError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_all() {
        let mut store = store_with_capacity(10);
        store.remove_all();
        assert!(store.is_empty());

        for label in ["A", "B", "C"] {
            store.push(text(label)).unwrap();
        }
        store.remove_all();
        assert!(store.is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = StackStore::open(MemoryDefaults::new());
        store.push(text("A")).unwrap();
        store.push(text("B")).unwrap();
        assert_eq!(wire::load(store.defaults()).len(), 2);

        store.remove_at(1).unwrap();
        let saved = wire::load(store.defaults());
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].preview_label(), "B");

        store.remove_all();
        assert!(wire::load(store.defaults()).is_empty());
        assert_eq!(store.defaults().write_count(), 4);
    }

    #[test]
    fn test_failed_mutations_do_not_write() {
        let mut store = store_with_capacity(5);
        let writes = store.defaults().write_count();

        assert!(store.remove_at(0).is_err());
        assert_eq!(store.defaults().write_count(), writes);
    }

    #[test]
    fn test_reopen_restores_items() {
        let mut store = StackStore::open(MemoryDefaults::new());
        store.push(text("A")).unwrap();
        store.push(text("B")).unwrap();
        let before = store.items().to_vec();

        let reopened = StackStore::open(store.defaults().clone());
        assert_eq!(reopened.items(), before.as_slice());
    }

    #[test]
    fn test_corrupt_stack_opens_empty() {
        let mut defaults = MemoryDefaults::new();
        defaults.set(CLIPBOARD_STACK_KEY, b"{broken").unwrap();
        let store = StackStore::open(defaults);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_capacity_preference_falls_back() {
        let mut defaults = MemoryDefaults::new();
        defaults.set(MAX_STACK_SIZE_KEY, b"lots").unwrap();
        assert_eq!(StackStore::open(defaults).capacity(), DEFAULT_CAPACITY);

        let mut defaults = MemoryDefaults::new();
        defaults.set(MAX_STACK_SIZE_KEY, b"0").unwrap();
        assert_eq!(StackStore::open(defaults).capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_out_of_range_capacity_preference_is_clamped() {
        let mut defaults = MemoryDefaults::new();
        defaults.set(MAX_STACK_SIZE_KEY, b"3").unwrap();
        assert_eq!(StackStore::open(defaults).capacity(), MIN_CAPACITY);

        let mut defaults = MemoryDefaults::new();
        defaults.set(MAX_STACK_SIZE_KEY, b"500").unwrap();
        let mut store = StackStore::open(defaults);
        assert_eq!(store.capacity(), MAX_CAPACITY);

        for n in 0..MAX_CAPACITY {
            store
                .push(ContentSnapshot::new(Content::Text(n.to_string())))
                .unwrap();
        }
        assert!(matches!(
            store.push(ContentSnapshot::new(Content::Text("over".to_string()))),
            Err(StackError::CapacityExceeded { capacity: MAX_CAPACITY })
        ));
    }

    #[test]
    fn test_set_capacity() {
        let mut store = StackStore::open(MemoryDefaults::new());
        store.set_capacity(15).unwrap();
        assert_eq!(store.capacity(), 15);
        assert_eq!(
            store.defaults().get(MAX_STACK_SIZE_KEY).unwrap(),
            Some(b"15".to_vec())
        );

        assert_eq!(
            store.set_capacity(4),
            Err(StackError::CapacityOutOfRange { requested: 4 })
        );
        assert_eq!(
            store.set_capacity(21),
            Err(StackError::CapacityOutOfRange { requested: 21 })
        );
        assert_eq!(store.capacity(), 15);
    }

    #[test]
    fn test_set_capacity_below_length_is_rejected() {
        let mut store = store_with_capacity(10);
        for label in ["A", "B", "C", "D", "E", "F"] {
            store.push(text(label)).unwrap();
        }
        assert_eq!(
            store.set_capacity(5),
            Err(StackError::CapacityBelowLength { requested: 5, len: 6 })
        );
        store.set_capacity(6).unwrap();
        assert!(store.is_full());
    }
}

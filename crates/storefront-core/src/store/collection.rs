// ── Generic concurrent entity collection ──
//
// Lock-free reads with O(1) lookups and an insertion-ordered snapshot
// that is rebuilt on every mutation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use dashmap::DashMap;

use crate::model::EntityId;

struct Slot<T> {
    /// Position in insertion order. Updates keep the original position.
    seq: u64,
    entity: Arc<T>,
}

/// A concurrent collection for a single entity type.
///
/// `DashMap` holds the entities keyed by id; an `ArcSwap` holds the
/// full snapshot in insertion order so readers never take a lock.
/// Writers are serialized so a rebuilt snapshot always matches the map.
pub(crate) struct EntityCollection<T: Send + Sync + 'static> {
    by_id: DashMap<EntityId, Slot<T>>,
    snapshot: ArcSwap<Vec<Arc<T>>>,
    next_seq: AtomicU64,
    write_guard: Mutex<()>,
}

impl<T: Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        Self {
            by_id: DashMap::new(),
            snapshot: ArcSwap::from_pointee(Vec::new()),
            next_seq: AtomicU64::new(0),
            write_guard: Mutex::new(()),
        }
    }

    /// Insert or replace an entity. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, id: EntityId, entity: T) -> bool {
        let _guard = self.lock();
        let is_new = self.put(id, entity);
        self.rebuild_snapshot();
        is_new
    }

    /// Replace an existing entity through `f`. Returns the new value, or
    /// `None` when the id is unknown or `f` declines the change.
    pub(crate) fn update<F>(&self, id: &EntityId, f: F) -> Option<Arc<T>>
    where
        F: FnOnce(&T) -> Option<T>,
    {
        let _guard = self.lock();
        let updated = {
            let mut slot = self.by_id.get_mut(id)?;
            let next = Arc::new(f(&slot.entity)?);
            slot.entity = Arc::clone(&next);
            next
        };
        self.rebuild_snapshot();
        Some(updated)
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &EntityId) -> Option<Arc<T>> {
        let _guard = self.lock();
        let removed = self.by_id.remove(id).map(|(_, slot)| slot.entity);
        if removed.is_some() {
            self.rebuild_snapshot();
        }
        removed
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.by_id.get(id).map(|slot| Arc::clone(&slot.entity))
    }

    /// Current snapshot in insertion order (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.load_full()
    }

    /// Upsert all incoming entities, then prune ids not in the incoming
    /// set. Readers never observe a transient empty collection.
    pub(crate) fn replace_all(&self, items: impl IntoIterator<Item = (EntityId, T)>) {
        let _guard = self.lock();
        let mut incoming = std::collections::HashSet::new();
        for (id, entity) in items {
            incoming.insert(id.clone());
            self.put(id, entity);
        }
        self.by_id.retain(|id, _| incoming.contains(id));
        self.rebuild_snapshot();
    }

    #[cfg(test)]
    pub(crate) fn clear(&self) {
        let _guard = self.lock();
        self.by_id.clear();
        self.rebuild_snapshot();
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn put(&self, id: EntityId, entity: T) -> bool {
        let entity = Arc::new(entity);
        if let Some(mut slot) = self.by_id.get_mut(&id) {
            slot.entity = entity;
            return false;
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.by_id.insert(id, Slot { seq, entity });
        true
    }

    fn rebuild_snapshot(&self) {
        let mut slots: Vec<(u64, Arc<T>)> = self
            .by_id
            .iter()
            .map(|r| (r.seq, Arc::clone(&r.entity)))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        self.snapshot
            .store(Arc::new(slots.into_iter().map(|(_, e)| e).collect()));
    }
}

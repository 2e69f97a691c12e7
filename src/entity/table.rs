//! The entity table: per-ID records, the free list and the component lookup index.

use std::collections::{HashMap, VecDeque};

use xias::Xias;

use super::{Entity, Generation};
use crate::handle::Handle;
use crate::types::TypeTag;

/// The bookkeeping of one entity ID.
#[derive(Debug, Default)]
pub(crate) struct Record {
    /// The current generation of the ID.
    pub(crate) generation: Generation,
    /// Whether the ID is handed out to a live entity.
    pub(crate) live:       bool,
    /// The attached components in attachment order, with their store indices.
    pub(crate) attached:   Vec<(TypeTag, u32)>,
}

/// Owns the entity records, the free list and the `(entity, type) -> store index` lookup.
///
/// The table does not know about component stores;
/// the world keeps both sides consistent.
#[derive(Debug)]
pub(crate) struct Table {
    /// Indexed by entity ID. Slot 0 is the null entity and is never handed out.
    records:    Vec<Record>,
    /// IDs available for reuse, oldest release first.
    free:       VecDeque<u32>,
    /// Keyed by `Handle::pack(id, tag, Generation::ZERO)`.
    lookup:     HashMap<u64, u32>,
    /// The number of IDs added by each [`grow`](Self::grow).
    chunk_size: usize,
    /// The largest ID that may be handed out.
    id_limit:   u32,
}

fn lookup_key(id: u32, tag: TypeTag) -> u64 { Handle::pack(id, tag, Generation::ZERO).raw() }

impl Table {
    /// Creates a table containing only the null entity.
    pub(crate) fn new(chunk_size: usize, id_limit: u32) -> Self {
        assert!(chunk_size > 0, "The entity chunk size must be nonzero");

        Self {
            records: vec![Record::default()],
            free: VecDeque::new(),
            lookup: HashMap::new(),
            chunk_size,
            id_limit,
        }
    }

    /// The number of slots in the table, including the null entity.
    pub(crate) fn len(&self) -> usize { self.records.len() }

    /// The number of IDs waiting in the free list.
    pub(crate) fn free_len(&self) -> usize { self.free.len() }

    /// The number of live entities.
    pub(crate) fn live_len(&self) -> usize { self.records.len() - 1 - self.free.len() }

    /// Whether the next allocation should grow the table first.
    ///
    /// One spare ID is always kept so that a just-released ID is not handed out immediately.
    pub(crate) fn needs_growth(&self) -> bool { self.free.len() <= 1 }

    /// Appends up to one chunk of fresh IDs to the table and the free list.
    ///
    /// Returns the number of IDs added, which is less than the chunk size
    /// only when the ID ceiling is reached.
    pub(crate) fn grow(&mut self) -> usize {
        let start = self.records.len();
        let end = start.saturating_add(self.chunk_size).min(self.id_limit.small_int::<usize>().saturating_add(1));
        if end <= start {
            return 0;
        }

        log::debug!("Growing entity table from {start} to {end} slots");

        self.records.resize_with(end, Record::default);
        self.free.extend((start..end).map(|id| id.small_int::<u32>()));
        end - start
    }

    /// Takes the oldest ID from the free list and marks it live.
    pub(crate) fn allocate(&mut self) -> Option<Entity> {
        let id = self.free.pop_front()?;
        debug_assert_ne!(id, 0, "The null entity must never be in the free list");

        let record = self.records.get_mut(id.small_int::<usize>()).expect("free IDs are in the table");
        debug_assert!(!record.live, "ID {id} was in the free list while live");
        debug_assert!(record.attached.is_empty(), "ID {id} was released with attached components");
        record.live = true;

        Some(Entity::new(id, record.generation))
    }

    /// Marks a live entity as dead, bumps its generation and queues its ID for reuse.
    ///
    /// All components must have been detached already.
    pub(crate) fn release(&mut self, entity: Entity) {
        let record = self.record_mut(entity).expect("only live entities can be released");
        debug_assert!(record.attached.is_empty(), "{entity:?} still has attached components");

        record.attached.clear();
        record.generation = record.generation.next();
        record.live = false;
        self.free.push_back(entity.id());
    }

    /// Drops every record except the null entity and clears the free list and the lookup.
    pub(crate) fn reset(&mut self) {
        self.free.clear();
        self.lookup.clear();
        self.records.truncate(1);
    }

    /// Returns the record of `entity` if the handle refers to a live entity.
    pub(crate) fn record(&self, entity: Entity) -> Option<&Record> {
        if entity.is_null() {
            return None;
        }

        let record = self.records.get(entity.id().small_int::<usize>())?;
        (record.live && record.generation == entity.generation()).then_some(record)
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut Record> {
        if entity.is_null() {
            return None;
        }

        let record = self.records.get_mut(entity.id().small_int::<usize>())?;
        (record.live && record.generation == entity.generation()).then_some(record)
    }

    /// Whether `entity` is a live, current-generation handle.
    pub(crate) fn is_alive(&self, entity: Entity) -> bool { self.record(entity).is_some() }

    /// Finds the store index of the `tag` component of `entity`.
    ///
    /// Returns `None` if the handle is stale or the component is absent.
    pub(crate) fn lookup(&self, entity: Entity, tag: TypeTag) -> Option<u32> {
        if !self.is_alive(entity) {
            return None;
        }

        self.lookup.get(&lookup_key(entity.id(), tag)).copied()
    }

    /// Records that `entity` now owns the `tag` component at `index`.
    pub(crate) fn attach(&mut self, entity: Entity, tag: TypeTag, index: u32) {
        let record = self.record_mut(entity).expect("components are only attached to live entities");
        record.attached.push((tag, index));

        let old = self.lookup.insert(lookup_key(entity.id(), tag), index);
        debug_assert!(old.is_none(), "{entity:?} already had component type {tag:?}");
    }

    /// Forgets the `tag` component of `entity`, returning its former store index.
    pub(crate) fn detach(&mut self, entity: Entity, tag: TypeTag) -> Option<u32> {
        let record = self.record_mut(entity)?;
        let position = record.attached.iter().position(|&(attached, _)| attached == tag);
        debug_assert!(position.is_some(), "{entity:?} is not attached to component type {tag:?}");
        if let Some(position) = position {
            record.attached.remove(position);
        }

        self.lookup.remove(&lookup_key(entity.id(), tag))
    }

    /// Moves the `tag` component of `owner` to `index` after a swap-remove in its store.
    pub(crate) fn repoint(&mut self, owner: Entity, tag: TypeTag, index: u32) {
        let record = self.record_mut(owner).expect("displaced components belong to live entities");
        let entry = record.attached.iter_mut().find(|(attached, _)| *attached == tag);
        debug_assert!(entry.is_some(), "{owner:?} does not list displaced component type {tag:?}");
        if let Some(entry) = entry {
            entry.1 = index;
        }

        let slot = self.lookup.get_mut(&lookup_key(owner.id(), tag));
        debug_assert!(slot.is_some(), "{owner:?} has no lookup entry for displaced type {tag:?}");
        if let Some(slot) = slot {
            *slot = index;
        }
    }

    /// The number of `(entity, type)` pairs in the lookup index.
    #[cfg(test)]
    pub(crate) fn lookup_len(&self) -> usize { self.lookup.len() }
}

use parking_lot::Mutex;

use crate::tracer::{Capacity, Tracer};
use crate::{Entity, Handle, TypeTag};

/// A tracer event, with the arguments it was called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    CreateEntity(Entity),
    GrowEntities(usize, usize),
    DestroyEntity(Entity),
    Attach(Entity, TypeTag, u32),
    Detach(Entity, TypeTag, u32),
    Displace(Entity, TypeTag, u32, u32),
    Refresh(Entity, TypeTag),
    RejectStale(Handle),
    RejectDuplicate(Entity, TypeTag),
    CapacityExhausted(Capacity),
    DestroyAll,
    Shutdown,
}

/// Records every event it receives, in order.
///
/// Share it with a world through an `Arc`.
#[derive(Default)]
pub struct EventTracer {
    seen: Mutex<Vec<Event>>,
}

impl EventTracer {
    /// Returns the events observed so far and clears the record.
    pub fn take(&self) -> Vec<Event> { std::mem::take(&mut *self.seen.lock()) }

    /// Returns a copy of the events observed so far.
    pub fn get_events(&self) -> Vec<Event> { self.seen.lock().clone() }

    /// Counts the observed events matching `filter`.
    pub fn count(&self, filter: impl Fn(&Event) -> bool) -> usize {
        self.seen.lock().iter().filter(|event| filter(event)).count()
    }

    fn trace(&self, event: Event) { self.seen.lock().push(event); }
}

impl Tracer for EventTracer {
    fn create_entity(&self, entity: Entity) { self.trace(Event::CreateEntity(entity)) }

    fn grow_entities(&self, old_len: usize, new_len: usize) {
        self.trace(Event::GrowEntities(old_len, new_len))
    }

    fn destroy_entity(&self, entity: Entity) { self.trace(Event::DestroyEntity(entity)) }

    fn attach(&self, entity: Entity, tag: TypeTag, index: u32) {
        self.trace(Event::Attach(entity, tag, index))
    }

    fn detach(&self, entity: Entity, tag: TypeTag, index: u32) {
        self.trace(Event::Detach(entity, tag, index))
    }

    fn displace(&self, owner: Entity, tag: TypeTag, from: u32, to: u32) {
        self.trace(Event::Displace(owner, tag, from, to))
    }

    fn refresh(&self, entity: Entity, tag: TypeTag) { self.trace(Event::Refresh(entity, tag)) }

    fn reject_stale(&self, handle: Handle) { self.trace(Event::RejectStale(handle)) }

    fn reject_duplicate(&self, entity: Entity, tag: TypeTag) {
        self.trace(Event::RejectDuplicate(entity, tag))
    }

    fn capacity_exhausted(&self, capacity: Capacity) { self.trace(Event::CapacityExhausted(capacity)) }

    fn destroy_all(&self) { self.trace(Event::DestroyAll) }

    fn shutdown(&self) { self.trace(Event::Shutdown) }
}

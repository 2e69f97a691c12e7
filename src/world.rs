//! The world owns every entity and component.
//!
//! All structural changes go through a [`World`]:
//! it validates entity handles, delegates storage to the per-type stores,
//! keeps the entity table in sync with the stores,
//! and calls [`Component::refresh`] on every component affected by a change.
//!
//! Invalid handles are treated as absence:
//! reads return the sentinel component and writes do nothing.
//! Such soft failures are reported to the world's [`Tracer`](crate::Tracer).

use std::any::Any;

use xias::Xias;

use crate::comp::{CompRef, Component, Refresh};
use crate::entity::{self, Entity};
use crate::store::View;
use crate::tracer::{Capacity, Tracer};
use crate::types::{self, TypeTag};

mod builder;
pub use builder::{Builder, DEFAULT_CHUNK_SIZE};

mod context;
pub use context::Context;

/// The data structure that stores all entities and components.
pub struct World {
    pub(crate) types:       types::Registry,
    pub(crate) table:       entity::Table,
    pub(crate) tracer:      Box<dyn Tracer>,
    pub(crate) in_shutdown: bool,
}

impl Default for World {
    fn default() -> Self { Self::new() }
}

impl World {
    /// Creates a world with the default configuration.
    pub fn new() -> Self { Builder::default().build() }

    /// Starts configuring a world.
    pub fn builder() -> Builder { Builder::default() }

    /// Grows the entity table by one chunk, tracing the growth.
    fn grow_entities(&mut self) {
        let old_len = self.table.len();
        if self.table.grow() > 0 {
            self.tracer.grow_entities(old_len, self.table.len());
        }
    }

    /// Creates a new entity without components.
    ///
    /// Returns [`Entity::NULL`] if the entity ID ceiling is reached.
    pub fn create_entity(&mut self) -> Entity {
        if self.table.needs_growth() {
            self.grow_entities();
        }

        match self.table.allocate() {
            Some(entity) => {
                self.tracer.create_entity(entity);
                entity
            }
            None => {
                log::warn!("Cannot create entity: all {} entity IDs are in use", self.table.live_len());
                self.tracer.capacity_exhausted(Capacity::Entities);
                Entity::NULL
            }
        }
    }

    /// Destroys an entity, detaching all its components in reverse attachment order.
    ///
    /// Null and stale handles are ignored.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if !self.table.is_alive(entity) {
            self.tracer.reject_stale(entity.handle());
            return;
        }

        while let Some(&(tag, _)) = self.table.record(entity).and_then(|record| record.attached.last()) {
            self.remove_component_by_tag(entity, tag, Refresh::Skip);
        }

        self.table.release(entity);
        self.tracer.destroy_entity(entity);
    }

    /// Attaches a default `T` to `entity` and refreshes its components.
    ///
    /// See [`add_component_with`](Self::add_component_with).
    pub fn add_component<T: Component>(&mut self, entity: Entity) -> CompRef<T> {
        self.add_component_with(entity, T::default(), Refresh::Siblings)
    }

    /// Attaches `value` to `entity`.
    ///
    /// - If `entity` is null or stale, `value` is dropped and the null `CompRef` is returned.
    /// - If `entity` already has a `T`, `value` is dropped and the existing component is returned.
    /// - If the store of `T` is full, `value` is dropped and the null `CompRef` is returned.
    ///
    /// Otherwise, unless `refresh` is [`Refresh::Skip`],
    /// every component of `entity` (including the new one) is refreshed once in attachment order.
    pub fn add_component_with<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
        refresh: Refresh,
    ) -> CompRef<T> {
        let tag = self.types.register::<T>();

        if !self.table.is_alive(entity) {
            self.tracer.reject_stale(entity.handle());
            return CompRef::NULL;
        }

        if let Some(index) = self.table.lookup(entity, tag) {
            self.tracer.reject_duplicate(entity, tag);
            return CompRef::new(index);
        }

        let index = self.types.store_mut::<T>(tag).add(entity, value);
        if index == 0 {
            self.tracer.capacity_exhausted(Capacity::Components(tag));
            return CompRef::NULL;
        }

        self.table.attach(entity, tag, index);
        self.tracer.attach(entity, tag, index);

        if refresh == Refresh::Siblings {
            self.refresh_entity(entity);
        }

        CompRef::new(index)
    }

    /// Detaches the `T` component of `entity` and refreshes its remaining components.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        self.remove_component_with::<T>(entity, Refresh::Siblings);
    }

    /// Detaches the `T` component of `entity`.
    ///
    /// See [`remove_component_by_tag`](Self::remove_component_by_tag).
    pub fn remove_component_with<T: Component>(&mut self, entity: Entity, refresh: Refresh) {
        match self.types.tags.get::<T>() {
            Some(tag) => self.remove_component_by_tag(entity, tag, refresh),
            None => {
                if !self.table.is_alive(entity) {
                    self.tracer.reject_stale(entity.handle());
                }
            }
        }
    }

    /// Detaches the component with type `tag` from `entity`.
    ///
    /// Does nothing if `entity` is stale or has no such component.
    /// The component receives [`Component::on_destroy`] before it is removed.
    /// If the swap-remove moves another entity's component,
    /// every component of that entity is refreshed regardless of `refresh`.
    /// The remaining components of `entity` are refreshed unless `refresh` is [`Refresh::Skip`].
    pub fn remove_component_by_tag(&mut self, entity: Entity, tag: TypeTag, refresh: Refresh) {
        if !self.table.is_alive(entity) {
            self.tracer.reject_stale(entity.handle());
            return;
        }

        let index = match self.table.lookup(entity, tag) {
            Some(index) => index,
            None => return,
        };

        let store = &mut self.types.stores[tag.index()];
        {
            let ctx = Context::new(entity, &self.table, &self.types.tags, self.in_shutdown);
            store.on_destroy(index, &ctx);
        }

        let last: u32 = store.len().small_int();
        let displaced = store.delete(index);

        let detached = self.table.detach(entity, tag);
        debug_assert_eq!(detached, Some(index));
        self.tracer.detach(entity, tag, index);

        if let Some(owner) = displaced {
            self.table.repoint(owner, tag, index);
            self.tracer.displace(owner, tag, last, index);
            self.refresh_entity(owner);
        }

        if refresh == Refresh::Siblings {
            self.refresh_entity(entity);
        }
    }

    /// Calls [`Component::refresh`] on every component of `entity` in attachment order.
    fn refresh_entity(&mut self, entity: Entity) {
        let record = match self.table.record(entity) {
            Some(record) => record,
            None => return,
        };

        let ctx = Context::new(entity, &self.table, &self.types.tags, self.in_shutdown);
        for &(tag, index) in &record.attached {
            self.tracer.refresh(entity, tag);
            self.types.stores[tag.index()].refresh(index, &ctx);
        }
    }

    /// Gets the `T` component of `entity`, or the sentinel if it is absent or `entity` is stale.
    ///
    /// # Panics
    /// Panics if `T` was never registered in this world.
    pub fn get_component<T: Component>(&self, entity: Entity) -> &T {
        let tag = self.types.tags.expect::<T>();
        let index = self.table.lookup(entity, tag).unwrap_or(0);
        self.types.store::<T>(tag).get(index)
    }

    /// Gets the `T` component of `entity` mutably.
    ///
    /// Returns `None` if it is absent, `entity` is stale or `T` was never registered.
    /// The sentinel is never handed out mutably.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let tag = self.types.tags.get::<T>()?;
        let index = self.table.lookup(entity, tag)?;
        self.types.store_mut::<T>(tag).get_mut(index)
    }

    /// Whether `entity` is alive and has a `T` component.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        match self.types.tags.get::<T>() {
            Some(tag) => self.has_component_by_tag(entity, tag),
            None => false,
        }
    }

    /// Whether `entity` is alive and has a component with type `tag`.
    pub fn has_component_by_tag(&self, entity: Entity, tag: TypeTag) -> bool {
        self.table.lookup(entity, tag).is_some()
    }

    /// Gets the component of `entity` with type `tag`, type-erased.
    ///
    /// Returns `None` if it is absent, `entity` is stale or `tag` is unknown.
    /// Downcast the result to the concrete component type to read it.
    pub fn get_component_by_tag(&self, entity: Entity, tag: TypeTag) -> Option<&dyn Any> {
        let index = self.table.lookup(entity, tag)?;
        self.types.stores.get(tag.index())?.get_any(index)
    }

    /// Finds the `T` component of `entity`.
    ///
    /// Returns the null `CompRef` if it is absent, `entity` is stale or `T` was never registered.
    pub fn locate<T: Component>(&self, entity: Entity) -> CompRef<T> {
        self.types
            .tags
            .get::<T>()
            .and_then(|tag| self.table.lookup(entity, tag))
            .map_or(CompRef::NULL, CompRef::new)
    }

    /// Dereferences a component location, returning the sentinel for the null `CompRef`.
    ///
    /// # Panics
    /// Panics if `T` was never registered in this world.
    pub fn resolve<T: Component>(&self, comp: CompRef<T>) -> &T {
        let tag = self.types.tags.expect::<T>();
        self.types.store::<T>(tag).get(comp.index())
    }

    /// Dereferences a component location mutably.
    ///
    /// Returns `None` for the null `CompRef` and out-of-range locations.
    pub fn resolve_mut<T: Component>(&mut self, comp: CompRef<T>) -> Option<&mut T> {
        let tag = self.types.tags.get::<T>()?;
        self.types.store_mut::<T>(tag).get_mut(comp.index())
    }

    /// The entity owning the component at `comp`, or null for the sentinel.
    pub fn owner<T: Component>(&self, comp: CompRef<T>) -> Entity {
        match self.types.tags.get::<T>() {
            Some(tag) => self.types.stores[tag.index()].owner(comp.index()),
            None => Entity::NULL,
        }
    }

    /// A read-only view over all `T` components.
    ///
    /// # Panics
    /// Panics if `T` was never registered in this world.
    pub fn get_all<T: Component>(&self) -> View<'_, T> {
        let tag = self.types.tags.expect::<T>();
        self.types.store::<T>(tag).view()
    }

    /// Whether `entity` is a live, current-generation handle.
    pub fn is_alive(&self, entity: Entity) -> bool { self.table.is_alive(entity) }

    /// The number of live entities.
    pub fn entity_count(&self) -> usize { self.table.live_len() }

    /// The number of slots in the entity table, including the null entity.
    pub fn table_len(&self) -> usize { self.table.len() }

    /// The number of entity IDs waiting for reuse.
    pub fn free_len(&self) -> usize { self.table.free_len() }

    /// The tag of `T`, if it is registered.
    pub fn tag_of<T: Component>(&self) -> Option<TypeTag> { self.types.tags.get::<T>() }

    /// The number of registered component types.
    pub fn type_count(&self) -> usize { self.types.tags.len() }

    /// The type name of a registered component type.
    pub fn type_name(&self, tag: TypeTag) -> Option<&'static str> { self.types.tags.name(tag) }

    /// The number of live components with type `tag`.
    pub fn component_count(&self, tag: TypeTag) -> usize {
        self.types.stores.get(tag.index()).map_or(0, |store| store.len())
    }

    /// Whether the world is shutting down.
    pub fn in_shutdown(&self) -> bool { self.in_shutdown }

    /// Removes every entity and component.
    ///
    /// Every component receives [`Component::on_destroy`],
    /// store by store in registration order and last component first within each store.
    /// No refresh is performed.
    /// The entity table is reset to its initial state,
    /// so generations start from zero again.
    pub fn destroy_all(&mut self) {
        self.tracer.destroy_all();

        let mut ctx = Context::new(Entity::NULL, &self.table, &self.types.tags, self.in_shutdown);
        for store in &mut self.types.stores {
            log::debug!("Destroying {} {} components", store.len(), store.type_name());
            store.delete_all(&mut ctx);
        }

        self.table.reset();
    }

    /// Destroys everything and drops the world.
    ///
    /// [`Component::on_destroy`] hooks observe [`Context::in_shutdown`] as `true`.
    pub fn shutdown(mut self) {
        self.in_shutdown = true;
        self.tracer.shutdown();
        self.destroy_all();
        log::debug!("World shut down with {} component types", self.types.tags.len());
    }
}

//! Dense per-type component storage.
//!
//! A store keeps its components in a `Vec` with a parallel `Vec` of owners.
//! Index 0 is a permanent sentinel owned by the null entity.
//! Deletion is a swap-remove, so deleting one component may move another;
//! the store reports the owner of the moved component to the caller,
//! which is responsible for updating its lookups.

use std::any;

use xias::Xias;

use crate::comp::{CompRef, Component};
use crate::world::Context;
use crate::Entity;

mod any_store;
pub(crate) use any_store::AnyStore;

/// Stores all components of type `T` in a world.
pub(crate) struct Store<T> {
    values:   Vec<T>,
    owners:   Vec<Entity>,
    /// The largest index that can be handed out.
    id_limit: u32,
}

impl<T: Component> Store<T> {
    /// Creates a store that only contains the sentinel.
    pub(crate) fn new(id_limit: u32) -> Self {
        Self { values: vec![T::default()], owners: vec![Entity::NULL], id_limit }
    }

    /// Appends a component owned by `owner` and returns its index.
    ///
    /// Returns 0 and drops `value` if the index ceiling is reached.
    pub(crate) fn add(&mut self, owner: Entity, value: T) -> u32 {
        let index = self.values.len();
        if index > self.id_limit.small_int::<usize>() {
            log::warn!(
                "Cannot add {} to {owner:?}: the store is full ({} components)",
                any::type_name::<T>(),
                self.len(),
            );
            return 0;
        }

        self.values.push(value);
        self.owners.push(owner);
        index.small_int()
    }

    /// Swap-removes the component at `index`.
    ///
    /// Returns the owner of the component moved into `index`,
    /// or `None` if `index` was the last element or out of range.
    pub(crate) fn delete(&mut self, index: u32) -> Option<Entity> {
        debug_assert_ne!(index, 0, "The sentinel of {} cannot be deleted", any::type_name::<T>());

        let index = index.small_int::<usize>();
        if index == 0 || index >= self.values.len() {
            return None;
        }

        let last = self.values.len() - 1;
        self.values.swap_remove(index);
        self.owners.swap_remove(index);

        (index != last).then(|| self.owners[index])
    }

    /// Gets the component at `index`, or the sentinel if out of range.
    pub(crate) fn get(&self, index: u32) -> &T {
        match self.values.get(index.small_int::<usize>()) {
            Some(value) => value,
            None => &self.values[0],
        }
    }

    /// Gets the component at `index` mutably.
    ///
    /// Returns `None` for the sentinel and out-of-range indices.
    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        match index {
            0 => None,
            _ => self.values.get_mut(index.small_int::<usize>()),
        }
    }

    /// The owner of the component at `index`; null for the sentinel and out of range.
    pub(crate) fn owner(&self, index: u32) -> Entity {
        self.owners.get(index.small_int::<usize>()).copied().unwrap_or(Entity::NULL)
    }

    /// Removes every component except the sentinel, last first,
    /// calling [`Component::on_destroy`] on each.
    pub(crate) fn delete_all(&mut self, ctx: &mut Context<'_>) {
        for index in (1..self.values.len()).rev() {
            ctx.rebind(self.owners[index]);
            self.values[index].on_destroy(ctx);
        }

        self.values.truncate(1);
        self.owners.truncate(1);
    }

    /// The number of live components, excluding the sentinel.
    pub(crate) fn len(&self) -> usize { self.values.len() - 1 }

    /// Whether the store only contains the sentinel.
    pub(crate) fn is_empty(&self) -> bool { self.len() == 0 }

    /// A read-only view of the whole store.
    pub(crate) fn view(&self) -> View<'_, T> { View { store: self } }
}

/// A read-only view over all components of one type.
///
/// Obtained from [`World::get_all`](crate::World::get_all).
pub struct View<'t, T> {
    store: &'t Store<T>,
}

impl<'t, T> Clone for View<'t, T> {
    fn clone(&self) -> Self { *self }
}

impl<'t, T> Copy for View<'t, T> {}

impl<'t, T: Component> View<'t, T> {
    /// The raw component array, with the sentinel at index 0.
    pub fn as_slice(self) -> &'t [T] { &self.store.values }

    /// The owners parallel to [`as_slice`](Self::as_slice), with the null entity at index 0.
    pub fn owners(self) -> &'t [Entity] { &self.store.owners }

    /// Iterates over the live components with their locations and owners.
    pub fn iter(self) -> impl Iterator<Item = (CompRef<T>, Entity, &'t T)> + 't {
        let store = self.store;
        store
            .values
            .iter()
            .zip(store.owners.iter())
            .enumerate()
            .skip(1)
            .map(|(index, (value, &owner))| (CompRef::new(index.small_int()), owner, value))
    }

    /// The number of live components.
    pub fn len(self) -> usize { self.store.len() }

    /// Whether there are no live components.
    pub fn is_empty(self) -> bool { self.store.is_empty() }

    /// Gets the component at `index`, or the sentinel if out of range.
    pub fn get(self, index: u32) -> &'t T { self.store.get(index) }

    /// The sentinel component.
    pub fn sentinel(self) -> &'t T { &self.store.values[0] }
}

#[cfg(test)]
mod tests;

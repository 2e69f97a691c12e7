//! A component is a typed block of data attached to an entity.
//!
//! Each entity has at most one component of each type.
//! Components of the same type are stored densely in one store,
//! so a component's index changes whenever another component of the same type
//! is swap-removed into its slot.
//!
//! # Sibling references
//! A component may cache the locations of other components on the same entity
//! as [`CompRef`] values.
//! Whenever the set of components on an entity changes,
//! or one of its components is moved by a swap-remove,
//! every component of that entity receives a [`Component::refresh`] call
//! so that it can fetch the new locations through the [`Context`].
//!
//! # Sentinels
//! Index 0 of every store holds a `Default` instance owned by the null entity.
//! Lookups of absent components return this sentinel instead of failing,
//! so [`Default`] is required for all component types.

use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use crate::world::Context;

/// A type that can be attached to entities.
///
/// The default methods do nothing.
pub trait Component: Default + 'static {
    /// Called after the set of components on the owning entity changed,
    /// or after this component or a sibling was moved within its store.
    ///
    /// Implementations should re-fetch every cached [`CompRef`].
    fn refresh(&mut self, ctx: &Context<'_>) { let _ = ctx; }

    /// Called just before the component is removed from its store,
    /// either by an explicit detach, by entity destruction or by world shutdown.
    ///
    /// The component is still attached when this is called.
    fn on_destroy(&mut self, ctx: &Context<'_>) { let _ = ctx; }
}

/// Whether an attach or detach refreshes the remaining components of the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refresh {
    /// Refresh every component of the entity after the change.
    #[default]
    Siblings,
    /// Do not refresh the entity the caller is changing.
    ///
    /// Entities whose components were displaced by the change are still refreshed.
    Skip,
}

/// The location of a `T` component within its store.
///
/// A `CompRef` is only valid until the next structural change on its store.
/// Components obtain fresh ones in [`Component::refresh`].
/// The null `CompRef` points at the sentinel.
pub struct CompRef<T> {
    index: u32,
    _ph:   PhantomData<fn() -> T>,
}

impl<T> CompRef<T> {
    /// Points at the sentinel of the store.
    pub const NULL: Self = Self::new(0);

    pub(crate) const fn new(index: u32) -> Self { Self { index, _ph: PhantomData } }

    /// The index in the store.
    pub const fn index(self) -> u32 { self.index }

    /// Whether this points at the sentinel.
    pub const fn is_null(self) -> bool { self.index == 0 }
}

impl<T> Clone for CompRef<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for CompRef<T> {}

impl<T> Default for CompRef<T> {
    fn default() -> Self { Self::NULL }
}

impl<T> PartialEq for CompRef<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T> Eq for CompRef<T> {}

impl<T> Hash for CompRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.index.hash(state) }
}

impl<T> fmt::Debug for CompRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompRef<{}>({})", type_name::<T>(), self.index)
    }
}

static_assertions::assert_eq_size!(CompRef<()>, u32);

//! A generational entity registry with dense per-type component stores.
//!
//! # Entities and components
//! An [`Entity`] is an identity without data.
//! Data are attached to entities as components:
//! values of types implementing [`Component`],
//! at most one of each type per entity.
//!
//! Components of the same type are stored contiguously in one store,
//! so iterating over all components of a type is a slice iteration.
//! Removing a component swaps the last component of the store into the freed slot,
//! which keeps the store dense at the cost of moving another component.
//!
//! # Stale handles
//! Entity IDs are recycled through a FIFO free list.
//! Each ID carries a [`Generation`] that is incremented when the entity is destroyed,
//! and every entity handle records the generation it was issued with.
//! A handle whose generation no longer matches its slot is stale;
//! the [`World`] treats it like the null entity,
//! so reads return the sentinel component and writes do nothing.
//!
//! # Sibling references
//! Components often need to talk to other components of the same entity.
//! Instead of holding references,
//! a component caches [`CompRef`]s (typed store indices)
//! and re-fetches them in [`Component::refresh`].
//! The world calls `refresh` on every component of an entity
//! whenever a component is attached to or detached from it,
//! and whenever one of its components is moved by a swap-remove,
//! so cached locations are always current.
//!
//! # Example
//! ```
//! use entreg::{CompRef, Component, Context, World};
//!
//! #[derive(Default)]
//! struct Position(f32, f32);
//! impl Component for Position {}
//!
//! #[derive(Default)]
//! struct Follower {
//!     position: CompRef<Position>,
//! }
//! impl Component for Follower {
//!     fn refresh(&mut self, ctx: &Context<'_>) { self.position = ctx.locate::<Position>(); }
//! }
//!
//! let mut world = World::new();
//! let entity = world.create_entity();
//! let follower = world.add_component::<Follower>(entity);
//! assert!(world.resolve(follower).position.is_null());
//!
//! world.add_component_with(entity, Position(1.0, 2.0), Default::default());
//! let position = world.resolve(follower).position;
//! assert_eq!(world.resolve(position).0, 1.0);
//!
//! world.destroy_entity(entity);
//! assert!(!world.is_alive(entity));
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

/// Internal re-exports used in tests and benchmarks.
#[doc(hidden)]
pub mod _reexports {
    pub use {static_assertions, xias};
}

pub mod handle;
pub use handle::Handle;

pub mod entity;
pub use entity::{Entity, Generation};

pub mod comp;
pub use comp::{CompRef, Component, Refresh};

mod store;
pub use store::View;

pub mod types;
pub use types::TypeTag;

pub mod tracer;
pub use tracer::Tracer;

pub mod world;
pub use world::{Context, World};

#[cfg(any(test, feature = "internal-bench"))]
#[allow(missing_docs)]
pub mod test_util;

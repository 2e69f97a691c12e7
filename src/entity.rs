//! An entity is an identity that owns no data by itself.
//!
//! Components are attached to entities through the [`World`](crate::World).
//! An entity value is only a handle:
//! its generation and the list of attached components live in the world's entity table.
//! Destroying an entity bumps the generation of its ID,
//! so every copy of the old handle is rejected even after the ID is reused.

use std::fmt;

use crate::handle::Handle;
use crate::types::TypeTag;

mod generation;
pub use generation::Generation;

mod table;
pub(crate) use table::Table;

/// A handle to an entity.
///
/// Entities are plain `Copy` values.
/// They are validated by the world on every access,
/// so holding an entity after it is destroyed is safe but useless.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Entity(Handle);

impl Entity {
    /// The null entity.
    ///
    /// It can never own components;
    /// every accessor treats it as absent.
    pub const NULL: Self = Self(Handle::NULL);

    pub(crate) const fn new(id: u32, generation: Generation) -> Self {
        Self(Handle::pack(id, TypeTag::new(0), generation))
    }

    /// The numeric ID of the entity slot.
    pub const fn id(self) -> u32 { self.0.id() }

    /// The generation this handle was issued with.
    pub const fn generation(self) -> Generation { self.0.version() }

    /// The underlying packed handle.
    pub const fn handle(self) -> Handle { self.0 }

    /// Whether this is the null entity.
    pub const fn is_null(self) -> bool { self.0.is_null() }
}

impl From<Entity> for Handle {
    fn from(entity: Entity) -> Self { entity.0 }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({}v{})", self.id(), self.generation().get())
        }
    }
}

#[cfg(test)]
mod tests;

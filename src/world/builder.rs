use std::any::{self, TypeId};

use indexmap::IndexMap;
use xias::Xias;

use super::World;
use crate::comp::Component;
use crate::tracer::{self, Tracer};
use crate::types::{self, TypeTag};
use crate::{entity, Handle};

/// The number of entity IDs added each time the entity table runs out.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// This type is used to configure and build a world.
///
/// Component types registered here receive their tags in registration order.
/// Types used without registration are registered lazily on first attach.
pub struct Builder {
    chunk_size:      usize,
    id_limit:        u32,
    /// Defaults to `id_limit` if unset.
    component_limit: Option<u32>,
    tracer:          Box<dyn Tracer>,
    /// Store factories of the types registered so far, in tag order.
    pending:         IndexMap<TypeId, (&'static str, types::StoreFactory)>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            chunk_size:      DEFAULT_CHUNK_SIZE,
            id_limit:        Handle::MAX_ID,
            component_limit: None,
            tracer:          Box::new(tracer::Noop),
            pending:         IndexMap::new(),
        }
    }
}

impl Builder {
    /// Sets the number of entity IDs added each time the free list runs low.
    ///
    /// # Panics
    /// Panics if `chunk_size` is zero.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "The entity chunk size must be nonzero");
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the largest entity ID.
    ///
    /// Also the largest component index of every store unless
    /// [`component_limit`](Self::component_limit) is set.
    /// Operations that would exceed the ceiling fail softly.
    pub fn id_limit(mut self, id_limit: u32) -> Self {
        self.id_limit = id_limit;
        self
    }

    /// Sets the largest component index of every store,
    /// i.e. the number of components of one type that can exist at the same time.
    ///
    /// Attaching beyond the ceiling fails softly.
    pub fn component_limit(mut self, component_limit: u32) -> Self {
        self.component_limit = Some(component_limit);
        self
    }

    /// Sets the tracer that receives the world's events.
    pub fn tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Box::new(tracer);
        self
    }

    /// Registers a component type and returns its tag.
    ///
    /// Registering the same type again returns the same tag.
    pub fn register<T: Component>(&mut self) -> TypeTag {
        let entry = self.pending.entry(TypeId::of::<T>());
        let index = entry.index();
        assert!(index < types::MAX_TYPES, "Cannot register {}: too many component types", any::type_name::<T>());
        entry.or_insert_with(|| (any::type_name::<T>(), types::factory_of::<T>()));
        TypeTag::new(index.small_int())
    }

    /// Builds the world, creating the null entity and the first chunk of free IDs.
    pub fn build(self) -> World {
        let mut types = types::Registry::new(self.component_limit.unwrap_or(self.id_limit));
        for (&id, &(name, factory)) in &self.pending {
            types.register_with(id, name, factory);
        }

        let mut world = World {
            types,
            table: entity::Table::new(self.chunk_size, self.id_limit),
            tracer: self.tracer,
            in_shutdown: false,
        };
        world.grow_entities();
        world
    }
}

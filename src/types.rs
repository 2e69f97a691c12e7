//! Assigns each component type a dense tag and owns one store per type.
//!
//! Tags are handed out in registration order starting from 0
//! and never change for the lifetime of a world.

use std::any::{self, TypeId};
use std::fmt;

use indexmap::IndexSet;
use xias::Xias;

use crate::comp::Component;
use crate::store::{AnyStore, Store};

/// The dense numeric identifier of a component type within a world.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag(u16);

impl TypeTag {
    /// Wraps a raw tag value.
    pub const fn new(value: u16) -> Self { Self(value) }

    /// The raw tag value.
    pub const fn get(self) -> u16 { self.0 }

    /// The tag as an index into per-type arrays.
    pub const fn index(self) -> usize { self.0 as usize }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "TypeTag({})", self.0) }
}

/// The largest number of component types a world can hold.
pub const MAX_TYPES: usize = u16::MAX as usize + 1;

/// Constructs the type-erased store for a component type.
pub(crate) type StoreFactory = fn(u32) -> Box<dyn AnyStore>;

/// Builds a [`StoreFactory`] for `T`.
pub(crate) fn factory_of<T: Component>() -> StoreFactory {
    fn build<T: Component>(limit: u32) -> Box<dyn AnyStore> { Box::new(Store::<T>::new(limit)) }
    build::<T>
}

/// The `TypeId -> TypeTag` mapping, without the stores.
///
/// Split from [`Registry`] so that refresh contexts can read tags
/// while the stores are borrowed mutably.
#[derive(Default)]
pub(crate) struct Tags {
    ids:   IndexSet<TypeId>,
    names: Vec<&'static str>,
}

impl Tags {
    /// Looks up the tag of a registered type.
    pub(crate) fn get<T: 'static>(&self) -> Option<TypeTag> { self.get_by_id(TypeId::of::<T>()) }

    /// Looks up the tag of a registered type by its [`TypeId`].
    pub(crate) fn get_by_id(&self, id: TypeId) -> Option<TypeTag> {
        self.ids.get_index_of(&id).map(|index| TypeTag(index.small_int()))
    }

    /// Returns the tag of `T`, panicking if it was never registered.
    pub(crate) fn expect<T: 'static>(&self) -> TypeTag {
        match self.get::<T>() {
            Some(tag) => tag,
            None => panic!(
                "The component type {} was never registered in this world",
                any::type_name::<T>()
            ),
        }
    }

    fn insert(&mut self, id: TypeId, name: &'static str) -> TypeTag {
        assert!(self.ids.len() < MAX_TYPES, "Cannot register {name}: too many component types");

        let (index, new) = self.ids.insert_full(id);
        debug_assert!(new, "{name} is registered twice");
        self.names.push(name);
        TypeTag(index.small_int())
    }

    /// The number of registered types.
    pub(crate) fn len(&self) -> usize { self.ids.len() }

    /// The Rust type name of a registered type.
    pub(crate) fn name(&self, tag: TypeTag) -> Option<&'static str> { self.names.get(tag.index()).copied() }
}

/// Owns every component store of a world, indexed by tag.
pub(crate) struct Registry {
    pub(crate) tags:   Tags,
    pub(crate) stores: Vec<Box<dyn AnyStore>>,
    component_limit:   u32,
}

impl Registry {
    pub(crate) fn new(component_limit: u32) -> Self {
        Self { tags: Tags::default(), stores: Vec::new(), component_limit }
    }

    /// Returns the tag of `T`, creating its store on the first call.
    pub(crate) fn register<T: Component>(&mut self) -> TypeTag {
        self.register_with(TypeId::of::<T>(), any::type_name::<T>(), factory_of::<T>())
    }

    /// Registers a type through its store factory. Idempotent.
    pub(crate) fn register_with(&mut self, id: TypeId, name: &'static str, factory: StoreFactory) -> TypeTag {
        if let Some(tag) = self.tags.get_by_id(id) {
            return tag;
        }

        let tag = self.tags.insert(id, name);
        self.stores.push(factory(self.component_limit));
        debug_assert_eq!(self.stores.len(), self.tags.len());

        log::debug!("Registered component type {name} as {tag:?}");
        tag
    }

    /// The store of `T`. `tag` must be the tag of `T`.
    pub(crate) fn store<T: Component>(&self, tag: TypeTag) -> &Store<T> {
        let store = self.stores.get(tag.index()).expect("tags are only handed out with a store");
        match store.as_any().downcast_ref::<Store<T>>() {
            Some(store) => store,
            None => panic!("{tag:?} is not the tag of {}", any::type_name::<T>()),
        }
    }

    /// The store of `T`, mutably. `tag` must be the tag of `T`.
    pub(crate) fn store_mut<T: Component>(&mut self, tag: TypeTag) -> &mut Store<T> {
        let store = self.stores.get_mut(tag.index()).expect("tags are only handed out with a store");
        match store.as_any_mut().downcast_mut::<Store<T>>() {
            Some(store) => store,
            None => panic!("{tag:?} is not the tag of {}", any::type_name::<T>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, TypeTag};
    use crate::test_util::{Counter, Position, Velocity};

    #[test]
    fn test_tags_are_sequential_and_stable() {
        let mut registry = Registry::new(u32::MAX);
        assert_eq!(registry.register::<Position>(), TypeTag::new(0));
        assert_eq!(registry.register::<Velocity>(), TypeTag::new(1));
        assert_eq!(registry.register::<Position>(), TypeTag::new(0));
        assert_eq!(registry.tags.len(), 2);
        assert_eq!(registry.stores.len(), 2);

        assert_eq!(registry.tags.get::<Velocity>(), Some(TypeTag::new(1)));
        assert_eq!(registry.tags.get::<Counter>(), None);
        assert!(registry.tags.name(TypeTag::new(1)).unwrap().ends_with("Velocity"));
        assert_eq!(registry.tags.name(TypeTag::new(2)), None);
    }

    #[test]
    fn test_store_downcast() {
        let mut registry = Registry::new(u32::MAX);
        let tag = registry.register::<Counter>();
        assert_eq!(registry.store::<Counter>(tag).len(), 0);
        assert!(registry.store_mut::<Counter>(tag).is_empty());
    }

    #[test]
    #[should_panic = "is not the tag of"]
    fn test_store_wrong_type_panics() {
        let mut registry = Registry::new(u32::MAX);
        let tag = registry.register::<Counter>();
        registry.store::<Position>(tag);
    }

    #[test]
    #[should_panic = "was never registered"]
    fn test_expect_unregistered_panics() {
        let registry = Registry::new(u32::MAX);
        registry.tags.expect::<Position>();
    }
}

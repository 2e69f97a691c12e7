use std::any::{self, Any};

use xias::Xias;

use super::Store;
use crate::comp::Component;
use crate::world::Context;
use crate::Entity;

/// The type-erased interface of a [`Store`],
/// used by the world for operations that only know the type tag.
pub(crate) trait AnyStore: 'static {
    /// The name of the component type.
    fn type_name(&self) -> &'static str;

    /// The number of live components.
    fn len(&self) -> usize;

    /// The owner of the component at `index`.
    fn owner(&self, index: u32) -> Entity;

    /// The component at `index`, or `None` for the sentinel and out-of-range indices.
    fn get_any(&self, index: u32) -> Option<&dyn Any>;

    /// Swap-removes the component at `index`. See [`Store::delete`].
    fn delete(&mut self, index: u32) -> Option<Entity>;

    /// Calls [`Component::refresh`] on the component at `index`.
    fn refresh(&mut self, index: u32, ctx: &Context<'_>);

    /// Calls [`Component::on_destroy`] on the component at `index`.
    fn on_destroy(&mut self, index: u32, ctx: &Context<'_>);

    /// See [`Store::delete_all`].
    fn delete_all(&mut self, ctx: &mut Context<'_>);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStore for Store<T> {
    fn type_name(&self) -> &'static str { any::type_name::<T>() }

    fn len(&self) -> usize { Store::len(self) }

    fn owner(&self, index: u32) -> Entity { Store::owner(self, index) }

    fn get_any(&self, index: u32) -> Option<&dyn Any> {
        if index == 0 {
            return None;
        }
        self.values.get(index.small_int::<usize>()).map(|value| value as &dyn Any)
    }

    fn delete(&mut self, index: u32) -> Option<Entity> { Store::delete(self, index) }

    fn refresh(&mut self, index: u32, ctx: &Context<'_>) {
        match self.get_mut(index) {
            Some(value) => value.refresh(ctx),
            None => debug_assert!(false, "Refreshing missing {} at {index}", any::type_name::<T>()),
        }
    }

    fn on_destroy(&mut self, index: u32, ctx: &Context<'_>) {
        match self.get_mut(index) {
            Some(value) => value.on_destroy(ctx),
            None => debug_assert!(false, "Destroying missing {} at {index}", any::type_name::<T>()),
        }
    }

    fn delete_all(&mut self, ctx: &mut Context<'_>) { Store::delete_all(self, ctx) }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

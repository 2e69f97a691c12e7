//! Exposes testing, profiling and diagnostic capabilities.
//!
//! Every structural change in a [`World`](crate::World) and every soft failure
//! (stale handles, duplicate attachments, capacity exhaustion)
//! is reported to the world's [`Tracer`].
//! The world never fails loudly on these conditions,
//! so the tracer is the place to observe them.

use std::sync::Arc;

use crate::types::TypeTag;
use crate::{Entity, Handle};

/// Defines the [`Tracer`] trait and implements the [`Log`] and [`Aggregate`] types.
///
/// All tracer method parameters must be [`Copy`] and [`Debug`](std::fmt::Debug).
macro_rules! define_tracer {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident(&self $(, $arg_ident:ident: $arg_ty:ty)* $(,)?);
        )*
    ) => {
        /// A handler that receives structural events and soft failures from a world.
        ///
        /// All methods do nothing by default.
        pub trait Tracer {
            $(
                $(#[$meta])*
                #[allow(unused_variables)]
                fn $name(&self, $($arg_ident: $arg_ty,)*) {}
            )*
        }

        impl<T: Tracer + ?Sized> Tracer for Arc<T> {
            $(
                fn $name(&self, $($arg_ident: $arg_ty,)*) { (**self).$name($($arg_ident,)*) }
            )*
        }

        impl Tracer for Log {
            $(
                fn $name(&self, $($arg_ident: $arg_ty,)*) {
                    log::log!(self.0, concat!(stringify!($name), "(", $(
                        stringify!($arg_ident),
                        " = {",
                        stringify!($arg_ident),
                        ":?}, ",
                    )* ")"), $(
                        $arg_ident = $arg_ident,
                    )*);
                }
            )*
        }

        impl_tuple_accumulate! {
            @TYPES (T1, T2, T3, T4, T5, T6, T7, T8);
            $(
                @VARS (t1, t2, t3, t4, t5, t6, t7, t8);
                @METHOD {fn $name(&self, $($arg_ident: $arg_ty,)*);}
            )*
        }
    };
}

macro_rules! impl_tuple {
    (
        @TYPES ($($ty:ident),* $(,)?);
        $(
            @VARS ($($vars:ident),* $(,)?);
            @METHOD {fn $name:ident(&self, $($arg_ident:ident: $arg_ty:ty,)*);}
        )*
    ) => {
        impl<$($ty: Tracer),*> Tracer for Aggregate<($($ty,)*)> {
            $(
                fn $name(&self, $($arg_ident: $arg_ty),*) {
                    #[allow(unused_variables)]
                    let args = ($($arg_ident,)*);

                    #[allow(dead_code)]
                    fn call_with_args(tracer: &impl Tracer, ($($arg_ident,)*): ($($arg_ty,)*)) {
                        tracer.$name($($arg_ident,)*);
                    }

                    #[allow(unused_variables)]
                    let Aggregate(($($vars,)*)) = self;
                    $(
                        call_with_args($vars, args);
                    )*
                }
            )*
        }
    };
}

macro_rules! impl_tuple_accumulate {
    (@TYPES (); $(@VARS (); @METHOD {$($body:tt)*})*) => {
        impl_tuple! {
            @TYPES ();
            $(
                @VARS ();
                @METHOD {$($body)*}
            )*
        }
    };
    (
        @TYPES ($first_ty:ident $(, $rest_ty:ident)* $(,)?);
        $(
            @VARS ($first_var:ident $(, $rest_var:ident)* $(,)?);
            @METHOD {$($body:tt)*}
        )*
    ) => {
        impl_tuple! {
            @TYPES ($first_ty $(, $rest_ty)*);
            $(
                @VARS ($first_var $(, $rest_var)*);
                @METHOD {$($body)*}
            )*
        }

        impl_tuple_accumulate! {
            @TYPES ($($rest_ty),*);
            $(
                @VARS ($($rest_var),*);
                @METHOD {$($body)*}
            )*
        }
    };
}

define_tracer! {
    /// An entity was created.
    fn create_entity(&self, entity: Entity);

    /// The entity table grew from `old_len` to `new_len` slots.
    fn grow_entities(&self, old_len: usize, new_len: usize);

    /// An entity was destroyed after all its components were detached.
    fn destroy_entity(&self, entity: Entity);

    /// A component was attached to `entity` at `index` of its store.
    fn attach(&self, entity: Entity, tag: TypeTag, index: u32);

    /// The component at `index` was detached from `entity`.
    fn detach(&self, entity: Entity, tag: TypeTag, index: u32);

    /// A swap-remove moved the component of `owner` from index `from` to `to`.
    fn displace(&self, owner: Entity, tag: TypeTag, from: u32, to: u32);

    /// A component of `entity` is about to be refreshed.
    fn refresh(&self, entity: Entity, tag: TypeTag);

    /// A mutating operation received a null or stale handle and did nothing.
    fn reject_stale(&self, handle: Handle);

    /// An attach was ignored because `entity` already has a component of this type.
    fn reject_duplicate(&self, entity: Entity, tag: TypeTag);

    /// An entity or component could not be created because an ID ceiling was reached.
    fn capacity_exhausted(&self, capacity: Capacity);

    /// All entities and components are about to be removed.
    fn destroy_all(&self);

    /// The world is shutting down.
    fn shutdown(&self);
}

/// The resource that ran out in [`Tracer::capacity_exhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacity {
    /// The entity ID ceiling was reached.
    Entities,
    /// The store of this component type is full.
    Components(TypeTag),
}

/// An empty tracer.
pub struct Noop;

impl Tracer for Noop {}

/// Groups multiple tracers into a tuple and dispatches each call to them in serial.
pub struct Aggregate<T>(
    /// A tuple of child tracers to execute in serial.
    pub T,
);

/// A tracer that logs all events.
pub struct Log(
    /// The log level to log events with.
    pub log::Level,
);

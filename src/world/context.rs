use crate::comp::{CompRef, Component};
use crate::entity::{self, Entity};
use crate::types::{self, TypeTag};

/// Read-only access to the world's bookkeeping,
/// passed to [`Component::refresh`] and [`Component::on_destroy`].
///
/// A context can locate components but cannot read their values,
/// because the component being refreshed is borrowed mutably from its store at the same time.
/// It cannot attach or detach anything either.
pub struct Context<'t> {
    entity:      Entity,
    table:       &'t entity::Table,
    tags:        &'t types::Tags,
    in_shutdown: bool,
}

impl<'t> Context<'t> {
    pub(crate) fn new(
        entity: Entity,
        table: &'t entity::Table,
        tags: &'t types::Tags,
        in_shutdown: bool,
    ) -> Self {
        Self { entity, table, tags, in_shutdown }
    }

    /// Points the context at another entity.
    pub(crate) fn rebind(&mut self, entity: Entity) { self.entity = entity; }

    /// The entity that owns the component receiving this call.
    pub fn entity(&self) -> Entity { self.entity }

    /// Whether the world is shutting down.
    pub fn in_shutdown(&self) -> bool { self.in_shutdown }

    /// Whether `entity` is a live, current-generation handle.
    pub fn is_alive(&self, entity: Entity) -> bool { self.table.is_alive(entity) }

    /// Whether the owning entity has a `U` component.
    pub fn has<U: Component>(&self) -> bool { self.locate_on::<U>(self.entity).is_some() }

    /// Finds the `U` component of the owning entity.
    ///
    /// Returns the null `CompRef` if it is absent.
    pub fn locate<U: Component>(&self) -> CompRef<U> {
        self.locate_on::<U>(self.entity).unwrap_or(CompRef::NULL)
    }

    /// Finds the `U` component of any entity.
    ///
    /// Returns `None` if `entity` is stale or has no `U`.
    pub fn locate_on<U: Component>(&self, entity: Entity) -> Option<CompRef<U>> {
        let tag = self.tags.get::<U>()?;
        self.table.lookup(entity, tag).map(CompRef::new)
    }

    /// Whether the owning entity has a component with this tag.
    pub fn has_tag(&self, tag: TypeTag) -> bool { self.table.lookup(self.entity, tag).is_some() }

    /// The tags of the owning entity's components in attachment order.
    pub fn attached(&self) -> impl Iterator<Item = TypeTag> + 't {
        self.table.record(self.entity).into_iter().flat_map(|record| record.attached.iter().map(|&(tag, _)| tag))
    }
}

use std::sync::Arc;

use super::Store;
use crate::entity::{self, Generation};
use crate::test_util::{self, Position, Probe, ProbeEvent, ProbeLog};
use crate::types::Tags;
use crate::world::Context;
use crate::{CompRef, Entity};

fn entity(id: u32) -> Entity { Entity::new(id, Generation::ZERO) }

fn pos(x: i32) -> Position { Position { x, y: -x } }

fn filled(count: u32) -> Store<Position> {
    let mut store = Store::new(u32::MAX);
    for id in 1..=count {
        let index = store.add(entity(id), pos(id.try_into().unwrap()));
        assert_eq!(index, id);
    }
    store
}

#[test]
fn test_new_store_only_has_sentinel() {
    let store = Store::<Position>::new(u32::MAX);
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
    assert_eq!(store.get(0), &Position::default());
    assert_eq!(store.owner(0), Entity::NULL);
    assert_eq!(store.view().as_slice().len(), 1);
}

#[test]
fn test_get_out_of_range_is_sentinel() {
    let mut store = filled(2);
    assert_eq!(store.get(2), &pos(2));
    assert_eq!(store.get(3), &Position::default());
    assert_eq!(store.owner(3), Entity::NULL);
    assert!(store.get_mut(0).is_none());
    assert!(store.get_mut(3).is_none());

    store.get_mut(1).unwrap().x = 10;
    assert_eq!(store.get(1).x, 10);
}

#[test]
fn test_delete_last_displaces_nothing() {
    let mut store = filled(3);
    assert_eq!(store.delete(3), None);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(2), &pos(2));
}

#[test]
fn test_delete_middle_returns_moved_owner() {
    let mut store = filled(3);
    assert_eq!(store.delete(1), Some(entity(3)));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(1), &pos(3));
    assert_eq!(store.owner(1), entity(3));
    assert_eq!(store.get(2), &pos(2));
    assert_eq!(store.owner(2), entity(2));
}

#[test]
fn test_delete_out_of_range_is_noop() {
    let mut store = filled(2);
    assert_eq!(store.delete(5), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_add_at_limit_fails_softly() {
    test_util::init();

    let mut store = Store::<Position>::new(2);
    assert_eq!(store.add(entity(1), pos(1)), 1);
    assert_eq!(store.add(entity(2), pos(2)), 2);
    assert_eq!(store.add(entity(3), pos(3)), 0);
    assert_eq!(store.len(), 2);

    // freed slots can be reused
    store.delete(1);
    assert_eq!(store.add(entity(3), pos(3)), 2);
}

#[test]
fn test_view_iter_skips_sentinel() {
    let store = filled(3);
    let view = store.view();
    assert_eq!(view.len(), 3);
    assert_eq!(view.sentinel(), &Position::default());

    let items: Vec<_> = view.iter().map(|(comp, owner, value)| (comp, owner, value.x)).collect();
    assert_eq!(
        items,
        [
            (CompRef::new(1), entity(1), 1),
            (CompRef::new(2), entity(2), 2),
            (CompRef::new(3), entity(3), 3),
        ]
    );
    assert_eq!(view.owners()[0], Entity::NULL);
}

#[test]
fn test_delete_all_calls_on_destroy_last_first() {
    let log = ProbeLog::default();
    let mut store = Store::<Probe>::new(u32::MAX);
    store.add(entity(1), Probe::new("a", &log));
    store.add(entity(2), Probe::new("b", &log));

    let table = entity::Table::new(4, u32::MAX);
    let tags = Tags::default();
    let mut ctx = Context::new(Entity::NULL, &table, &tags, true);
    store.delete_all(&mut ctx);

    assert!(store.is_empty());
    assert_eq!(
        *log.lock(),
        [
            ProbeEvent::Destroy { name: "b", entity: entity(2), in_shutdown: true },
            ProbeEvent::Destroy { name: "a", entity: entity(1), in_shutdown: true },
        ]
    );
    assert_eq!(Arc::strong_count(&log), 1);
}

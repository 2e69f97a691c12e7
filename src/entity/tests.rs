use super::{Entity, Generation, Table};
use crate::types::TypeTag;

const POS: TypeTag = TypeTag::new(0);
const VEL: TypeTag = TypeTag::new(1);

fn table_with(chunk_size: usize) -> Table {
    let mut table = Table::new(chunk_size, u32::MAX);
    table.grow();
    table
}

#[test]
fn test_entity_fields() {
    let entity = Entity::new(5, Generation::new(3));
    assert_eq!(entity.id(), 5);
    assert_eq!(entity.generation(), Generation::new(3));
    assert_eq!(entity.handle().ty(), TypeTag::new(0));
    assert!(!entity.is_null());
    assert_eq!(format!("{entity:?}"), "Entity(5v3)");

    assert!(Entity::NULL.is_null());
    assert_eq!(Entity::default(), Entity::NULL);
    assert_eq!(format!("{:?}", Entity::NULL), "Entity(null)");
}

#[test]
fn test_generation_wraps() {
    assert_eq!(Generation::ZERO.next(), Generation::new(1));
    assert_eq!(Generation::new(u16::MAX).next(), Generation::ZERO);
}

#[test]
fn test_new_table_only_has_null() {
    let table = Table::new(8, u32::MAX);
    assert_eq!(table.len(), 1);
    assert_eq!(table.free_len(), 0);
    assert_eq!(table.live_len(), 0);
    assert!(table.needs_growth());
    assert!(!table.is_alive(Entity::NULL));
}

#[test]
fn test_grow_adds_one_chunk() {
    let mut table = Table::new(8, u32::MAX);
    assert_eq!(table.grow(), 8);
    assert_eq!(table.len(), 9);
    assert_eq!(table.free_len(), 8);
    assert!(!table.needs_growth());
}

#[test]
fn test_grow_stops_at_id_limit() {
    let mut table = Table::new(8, 10);
    assert_eq!(table.grow(), 8);
    assert_eq!(table.grow(), 2);
    assert_eq!(table.len(), 11);
    assert_eq!(table.grow(), 0);
    assert_eq!(table.len(), 11);
}

#[test]
fn test_huge_chunk_size_is_capped_by_id_limit() {
    let mut table = Table::new(usize::MAX, 5);
    assert_eq!(table.free_len(), 0);
    assert_eq!(table.grow(), 5);
    assert_eq!(table.len(), 6);
    assert_eq!(table.free_len(), 5);
    assert_eq!(table.grow(), 0);
}

#[test]
fn test_allocate_fifo() {
    let mut table = table_with(4);
    let ids: Vec<u32> = (0..4).map(|_| table.allocate().expect("free list is not empty").id()).collect();
    assert_eq!(ids, [1, 2, 3, 4]);
    assert_eq!(table.allocate(), None);
    assert_eq!(table.live_len(), 4);
}

#[test]
fn test_release_bumps_generation() {
    let mut table = table_with(2);
    let first = table.allocate().unwrap();
    assert_eq!(first.generation(), Generation::ZERO);
    assert!(table.is_alive(first));

    table.release(first);
    assert!(!table.is_alive(first));
    assert_eq!(table.free_len(), 2);

    // 2 is still ahead of 1 in the free list
    assert_eq!(table.allocate().unwrap().id(), 2);

    let reused = table.allocate().unwrap();
    assert_eq!(reused.id(), first.id());
    assert_eq!(reused.generation(), Generation::new(1));
    assert!(table.is_alive(reused));
    assert!(!table.is_alive(first));
}

#[test]
fn test_free_and_unallocated_ids_are_not_alive() {
    let table = table_with(4);
    assert!(!table.is_alive(Entity::new(1, Generation::ZERO)));
    assert!(!table.is_alive(Entity::new(100, Generation::ZERO)));
}

#[test]
fn test_attach_lookup_detach() {
    let mut table = table_with(4);
    let entity = table.allocate().unwrap();
    let other = table.allocate().unwrap();

    table.attach(entity, POS, 1);
    table.attach(entity, VEL, 3);
    table.attach(other, POS, 2);

    assert_eq!(table.lookup(entity, POS), Some(1));
    assert_eq!(table.lookup(entity, VEL), Some(3));
    assert_eq!(table.lookup(other, POS), Some(2));
    assert_eq!(table.lookup(other, VEL), None);
    assert_eq!(table.lookup_len(), 3);

    let record = table.record(entity).unwrap();
    assert_eq!(record.attached, [(POS, 1), (VEL, 3)]);

    assert_eq!(table.detach(entity, POS), Some(1));
    assert_eq!(table.lookup(entity, POS), None);
    assert_eq!(table.record(entity).unwrap().attached, [(VEL, 3)]);
    assert_eq!(table.lookup(other, POS), Some(2));
}

#[test]
fn test_lookup_rejects_stale_handle() {
    let mut table = table_with(4);
    let entity = table.allocate().unwrap();
    table.attach(entity, POS, 1);

    let stale = Entity::new(entity.id(), entity.generation().next());
    assert_eq!(table.lookup(stale, POS), None);
    assert_eq!(table.detach(stale, POS), None);
    assert_eq!(table.lookup(entity, POS), Some(1));
}

#[test]
fn test_repoint() {
    let mut table = table_with(4);
    let entity = table.allocate().unwrap();
    table.attach(entity, POS, 5);
    table.attach(entity, VEL, 1);

    table.repoint(entity, POS, 2);
    assert_eq!(table.lookup(entity, POS), Some(2));
    assert_eq!(table.record(entity).unwrap().attached, [(POS, 2), (VEL, 1)]);
}

#[test]
fn test_reset() {
    let mut table = table_with(4);
    let entity = table.allocate().unwrap();
    table.attach(entity, POS, 1);

    table.reset();
    assert_eq!(table.len(), 1);
    assert_eq!(table.free_len(), 0);
    assert_eq!(table.lookup_len(), 0);
    assert!(!table.is_alive(entity));

    table.grow();
    let fresh = table.allocate().unwrap();
    assert_eq!(fresh.id(), 1);
    assert_eq!(fresh.generation(), Generation::ZERO);
    assert_eq!(table.lookup(fresh, POS), None);
}

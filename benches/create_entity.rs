use criterion::*;
use entreg::{test_util, Refresh, World};

fn create_entity(c: &mut Criterion) {
    let mut group = c.benchmark_group("create entity");

    macro_rules! create_entity_batch {
        ($num_comps:literal; $($comps:expr),* $(,)?) => {
            for log_entities in (0..=12).step_by(4) {
                let entities = 1 << log_entities;
                group.throughput(Throughput::Elements(entities));
                group.bench_with_input(BenchmarkId::new(format!("{} components", $num_comps), format!("{entities} entities")), &entities, |b, &entities| {
                    b.iter_batched(
                        World::new,
                        |mut world| {
                            for _ in 0..entities {
                                let entity = world.create_entity();
                                $(
                                    world.add_component_with(entity, $comps, Refresh::Siblings);
                                )*
                            }
                            world
                        },
                        BatchSize::SmallInput,
                    );
                });
            }
        }
    }

    create_entity_batch!(0; );
    create_entity_batch!(1; test_util::CompN::<1>(1));
    create_entity_batch!(2; test_util::CompN::<1>(1), test_util::CompN::<2>(2));
    create_entity_batch!(4; test_util::CompN::<1>(1), test_util::CompN::<2>(2), test_util::CompN::<3>(3), test_util::CompN::<4>(4));
    create_entity_batch!(8; test_util::CompN::<1>(1), test_util::CompN::<2>(2), test_util::CompN::<3>(3), test_util::CompN::<4>(4), test_util::CompN::<5>(5), test_util::CompN::<6>(6), test_util::CompN::<7>(7), test_util::CompN::<8>(8));
}

criterion_group!(benches, create_entity);
criterion_main!(benches);

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{CompRef, Component, Context, Entity};

// Test component summary:
// Position: plain data
// Velocity: plain data
// Counter: counts refreshes, no caches
// Follower: counts refreshes, caches Position and Velocity
// Probe: records refresh and on_destroy calls into a shared log
// CompN: a family of plain components for benchmarks

/// plain data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Component for Position {}

/// plain data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Velocity(pub i32);

impl Component for Velocity {}

/// counts refreshes
#[derive(Debug, Default)]
pub struct Counter {
    pub value:     i32,
    pub refreshes: usize,
}

impl Component for Counter {
    fn refresh(&mut self, _: &Context<'_>) { self.refreshes += 1; }
}

/// caches the location of its siblings
#[derive(Debug, Default)]
pub struct Follower {
    pub refreshes: usize,
    pub position:  CompRef<Position>,
    pub velocity:  CompRef<Velocity>,
}

impl Component for Follower {
    fn refresh(&mut self, ctx: &Context<'_>) {
        self.refreshes += 1;
        self.position = ctx.locate();
        self.velocity = ctx.locate();
    }
}

/// A hook call observed by a [`Probe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    Refresh { name: &'static str, entity: Entity },
    Destroy { name: &'static str, entity: Entity, in_shutdown: bool },
}

/// The log shared between probes and the test.
pub type ProbeLog = Arc<Mutex<Vec<ProbeEvent>>>;

/// records its hooks
#[derive(Debug, Default)]
pub struct Probe {
    pub name: &'static str,
    pub log:  ProbeLog,
}

impl Probe {
    pub fn new(name: &'static str, log: &ProbeLog) -> Self { Self { name, log: Arc::clone(log) } }
}

impl Component for Probe {
    fn refresh(&mut self, ctx: &Context<'_>) {
        self.log.lock().push(ProbeEvent::Refresh { name: self.name, entity: ctx.entity() });
    }

    fn on_destroy(&mut self, ctx: &Context<'_>) {
        self.log.lock().push(ProbeEvent::Destroy {
            name:        self.name,
            entity:      ctx.entity(),
            in_shutdown: ctx.in_shutdown(),
        });
    }
}

/// A second probe type, for ordering tests across types.
#[derive(Debug, Default)]
pub struct OtherProbe(pub Probe);

impl Component for OtherProbe {
    fn refresh(&mut self, ctx: &Context<'_>) { self.0.refresh(ctx) }

    fn on_destroy(&mut self, ctx: &Context<'_>) { self.0.on_destroy(ctx) }
}

/// a generic component
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompN<const N: usize>(pub i32);

impl<const N: usize> Component for CompN<N> {}

//! Tracks the number of times an entity ID has been released,
//! used for distinguishing stale handles from live ones.

/// The number of times the same entity ID has been destroyed.
///
/// Every never-used slot starts at generation 0.
/// The counter wraps around after `u16::MAX`,
/// so a handle kept across 65536 reuses of the same ID may alias again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u16);

impl Generation {
    /// The generation of a slot that was never released.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw generation value.
    pub const fn new(value: u16) -> Self { Self(value) }

    /// The raw generation value.
    pub const fn get(self) -> u16 { self.0 }

    /// The generation after this one.
    #[must_use]
    pub const fn next(self) -> Self { Self(self.0.wrapping_add(1)) }
}

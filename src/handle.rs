//! Packed object handles.
//!
//! A handle identifies an object by its numeric ID, a type tag and a generation,
//! packed into a single `u64` with the ID in the high bits:
//!
//! ```text
//! +---------------------+-----------+------------+
//! |        id:32        |  type:16  | version:16 |
//! +---------------------+-----------+------------+
//! ```
//!
//! The ID 0 is reserved for the null handle.
//! Entities always use the type tag 0;
//! the registry also packs `(entity ID, component type)` pairs into handles
//! to key its component lookup index.

use std::fmt;

use crate::entity::Generation;
use crate::types::TypeTag;

/// An opaque `(id, type, version)` triple.
///
/// Two handles are equal only if all three fields are equal.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u64);

static_assertions::assert_eq_size!(Handle, u64);
static_assertions::const_assert_eq!(Handle::ID_SHIFT, u16::BITS * 2);
static_assertions::const_assert_eq!(Handle::TYPE_SHIFT, u16::BITS);

impl Handle {
    /// The null handle. Its ID is 0, which never refers to a live object.
    pub const NULL: Self = Self(0);

    /// The largest ID representable in a handle.
    pub const MAX_ID: u32 = u32::MAX;

    const ID_SHIFT: u32 = 32;
    const TYPE_SHIFT: u32 = 16;
    const TYPE_MASK: u64 = 0xFFFF;
    const VERSION_MASK: u64 = 0xFFFF;

    /// Packs the three fields into a handle.
    pub const fn pack(id: u32, ty: TypeTag, version: Generation) -> Self {
        Self(
            (id as u64) << Self::ID_SHIFT
                | (ty.get() as u64) << Self::TYPE_SHIFT
                | version.get() as u64,
        )
    }

    /// Reinterprets a value previously returned by [`raw`](Self::raw).
    pub const fn from_raw(raw: u64) -> Self { Self(raw) }

    /// The packed representation.
    pub const fn raw(self) -> u64 { self.0 }

    /// The numeric ID. 0 means null.
    pub const fn id(self) -> u32 { (self.0 >> Self::ID_SHIFT) as u32 }

    /// The type tag.
    pub const fn ty(self) -> TypeTag { TypeTag::new(((self.0 >> Self::TYPE_SHIFT) & Self::TYPE_MASK) as u16) }

    /// The generation the handle was issued with.
    pub const fn version(self) -> Generation { Generation::new((self.0 & Self::VERSION_MASK) as u16) }

    /// Whether this handle has the reserved null ID.
    pub const fn is_null(self) -> bool { self.id() == 0 }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id())
            .field("ty", &self.ty().get())
            .field("version", &self.version().get())
            .finish()
    }
}

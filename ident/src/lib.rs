//! Generation-tagged entity identifiers for the netprim codec.
//!
//! A [`NetId`] packs a 20-bit slot index with a 12-bit generation. The
//! generation lives on the [`Slot`] and advances every time the slot is
//! freed, so an id kept past its entity's lifetime stops testing alive even
//! after the index has been reused. [`SlotPool`] manages a dense array of
//! slots and recycles freed indices.
//!
//! # Design Principles
//!
//! - **Liveness by generation** - [`SlotPool::is_alive`] is the only test of
//!   whether an id is current; matching indices prove nothing.
//! - **Strict transitions** - Occupying a live slot or freeing an empty one is
//!   an error, not a no-op.
//! - **Known bound** - Generations wrap after 4096 frees of one slot.
//!
//! # Example
//!
//! ```
//! use ident::{ArchetypeId, IdentError, SlotPool};
//!
//! let mut pool = SlotPool::new();
//! let player = pool.allocate(ArchetypeId::new(7)).unwrap();
//! pool.free(player).unwrap();
//!
//! let npc = pool.allocate(ArchetypeId::new(9)).unwrap();
//! assert_eq!(npc.index(), player.index());
//! assert!(!pool.is_alive(player));
//! assert!(matches!(pool.free(player), Err(IdentError::StaleId { .. })));
//! ```

mod error;
mod net_id;
mod pool;
mod slot;
mod types;

pub use bitstream::ErrorKind;
pub use error::{IdentError, IdentResult};
pub use net_id::{NetId, NetIdCodec, GENERATION_BITS, INDEX_BITS, MAX_GENERATION, MAX_INDEX};
pub use pool::{SlotPool, MAX_SLOTS};
pub use slot::Slot;
pub use types::{ArchetypeId, ComponentId, FieldIndex, ServerTime, Tick};

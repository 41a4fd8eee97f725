//! Per-slot lifecycle state.

use crate::error::{IdentError, IdentResult};
use crate::net_id::{next_generation, NetId, MAX_INDEX};
use crate::types::ArchetypeId;

/// Metadata for one position in an entity store.
///
/// A slot is either empty or occupied by one entity. Its generation only
/// advances when it is freed, which is what turns every id handed out for the
/// previous occupant into a stale one.
///
/// Generations are 12 bits wide. After exactly 4096 frees a slot's generation
/// comes back around, and an id that old will test alive again. Ids are not
/// expected to be held that long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    occupied: bool,
    archetype: ArchetypeId,
    generation: u16,
}

impl Slot {
    /// Creates an empty slot at generation 0.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            occupied: false,
            archetype: ArchetypeId::new(0),
            generation: 0,
        }
    }

    /// Returns `true` while an entity holds the slot.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Returns the current occupant's archetype, if any.
    #[must_use]
    pub const fn archetype(&self) -> Option<ArchetypeId> {
        if self.occupied {
            Some(self.archetype)
        } else {
            None
        }
    }

    /// Returns the slot's current generation.
    #[must_use]
    pub const fn generation(&self) -> u16 {
        self.generation
    }

    /// Returns `true` if the slot is occupied and `id` carries its current
    /// generation.
    ///
    /// This is the only check that establishes an id is current. An index
    /// match alone says nothing, since the index may have been freed and
    /// reused since `id` was issued.
    #[must_use]
    pub const fn is_alive(&self, id: NetId) -> bool {
        self.occupied && id.generation() == self.generation
    }

    /// Occupies the slot at `index` and returns the id for the new occupant.
    ///
    /// The id carries the slot's current generation; allocation never
    /// advances it.
    pub fn allocate(&mut self, index: u32, archetype: ArchetypeId) -> IdentResult<NetId> {
        if index > MAX_INDEX {
            return Err(IdentError::IndexOutOfRange { index });
        }
        if self.occupied {
            return Err(IdentError::SlotOccupied { index });
        }
        self.occupied = true;
        self.archetype = archetype;
        Ok(NetId::compose(index, self.generation))
    }

    /// Occupies the slot with an externally issued id, adopting its generation.
    pub fn attach(&mut self, id: NetId, archetype: ArchetypeId) -> IdentResult<()> {
        if self.occupied {
            return Err(IdentError::SlotOccupied { index: id.index() });
        }
        self.generation = id.generation();
        self.archetype = archetype;
        self.occupied = true;
        Ok(())
    }

    /// Vacates the slot and advances its generation, wrapping at 4096.
    ///
    /// `index` is this slot's position and is only used to report errors.
    pub fn free(&mut self, index: u32) -> IdentResult<()> {
        if !self.occupied {
            return Err(IdentError::SlotVacant { index });
        }
        self.occupied = false;
        self.archetype = ArchetypeId::default();
        self.generation = next_generation(self.generation);
        if self.generation == 0 {
            tracing::warn!(index, "slot generation wrapped to 0");
        }
        Ok(())
    }

    /// Restores the freshly created state, generation included.
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

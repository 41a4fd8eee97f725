//! Dense slot pool with index recycling.

use crate::error::{IdentError, IdentResult};
use crate::net_id::{NetId, MAX_INDEX};
use crate::slot::Slot;
use crate::types::ArchetypeId;

/// Maximum number of slots a pool can hold (one per 20-bit index).
pub const MAX_SLOTS: usize = MAX_INDEX as usize + 1;

/// A growable array of [`Slot`]s that hands out and validates [`NetId`]s.
///
/// Freed indices are reused most-recently-freed first. The pool is a plain
/// value with no internal locking; share it across threads behind whatever
/// lock the owner already uses.
///
/// ```
/// use ident::{ArchetypeId, SlotPool};
///
/// let mut pool = SlotPool::new();
/// let id = pool.allocate(ArchetypeId::new(1)).unwrap();
/// assert!(pool.is_alive(id));
///
/// pool.free(id).unwrap();
/// let reused = pool.allocate(ArchetypeId::new(1)).unwrap();
/// assert_eq!(reused.index(), id.index());
/// assert!(!pool.is_alive(id));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: Vec<Slot>,
    /// Candidate indices for reuse. May hold indices that were attached to
    /// since being pushed; those are skipped when popped.
    free: Vec<u32>,
    /// `queued[i]` is set while `i` is on `free`, so no index is queued twice.
    queued: Vec<bool>,
    live: usize,
}

#[allow(clippy::cast_possible_truncation)]
impl SlotPool {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            queued: Vec::new(),
            live: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` slots before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(MAX_SLOTS)),
            free: Vec::new(),
            queued: Vec::with_capacity(capacity.min(MAX_SLOTS)),
            live: 0,
        }
    }

    /// Returns the number of live entities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no entity is live.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of slots created so far, live or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupies a slot and returns the id of the new entity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError::PoolExhausted`] if all 2^20 indices are live.
    pub fn allocate(&mut self, archetype: ArchetypeId) -> IdentResult<NetId> {
        let index = match self.pop_free() {
            Some(index) => index,
            None => {
                if self.slots.len() >= MAX_SLOTS {
                    tracing::debug!(capacity = MAX_SLOTS, "slot pool exhausted");
                    return Err(IdentError::PoolExhausted {
                        capacity: MAX_SLOTS,
                    });
                }
                self.slots.push(Slot::empty());
                self.queued.push(false);
                (self.slots.len() - 1) as u32
            }
        };
        let id = self.slots[index as usize].allocate(index, archetype)?;
        self.live += 1;
        tracing::trace!(%id, %archetype, "allocated slot");
        Ok(id)
    }

    /// Occupies the slot named by an externally issued id.
    ///
    /// The pool grows as needed to cover `id.index()`. Slots created to fill
    /// the gap become available to [`allocate`](Self::allocate).
    ///
    /// # Errors
    ///
    /// Returns [`IdentError::SlotOccupied`] if that index is already live.
    pub fn attach(&mut self, id: NetId, archetype: ArchetypeId) -> IdentResult<()> {
        let index = id.index() as usize;
        if index >= self.slots.len() {
            let start = self.slots.len();
            self.slots.resize(index + 1, Slot::empty());
            self.queued.resize(index + 1, false);
            // Lowest gap index is reused first.
            self.free.extend((start..index).rev().map(|i| i as u32));
            self.queued[start..index].fill(true);
        }
        if let Err(err) = self.slots[index].attach(id, archetype) {
            tracing::debug!(%id, "attach into occupied slot");
            return Err(err);
        }
        self.live += 1;
        tracing::trace!(%id, %archetype, "attached slot");
        Ok(())
    }

    /// Frees the entity `id` refers to, invalidating `id`.
    ///
    /// # Errors
    ///
    /// - [`IdentError::IndexOutOfRange`] if the pool has no such slot.
    /// - [`IdentError::StaleId`] if the slot has moved on to another generation.
    /// - [`IdentError::SlotVacant`] if the slot is empty at `id`'s generation.
    pub fn free(&mut self, id: NetId) -> IdentResult<()> {
        let index = id.index();
        let Some(slot) = self.slots.get_mut(index as usize) else {
            tracing::debug!(%id, "free of unknown index");
            return Err(IdentError::IndexOutOfRange { index });
        };
        if slot.generation() != id.generation() {
            tracing::debug!(%id, current_generation = slot.generation(), "free of stale id");
            return Err(IdentError::StaleId {
                id,
                current_generation: slot.generation(),
            });
        }
        if let Err(err) = slot.free(index) {
            tracing::debug!(%id, "free of vacant slot");
            return Err(err);
        }
        self.enqueue(index);
        self.live -= 1;
        tracing::trace!(%id, "freed slot");
        Ok(())
    }

    /// Returns `true` if `id` refers to a live entity of this pool.
    #[must_use]
    pub fn is_alive(&self, id: NetId) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| slot.is_alive(id))
    }

    /// Returns the archetype of the live entity `id` refers to.
    #[must_use]
    pub fn archetype_of(&self, id: NetId) -> Option<ArchetypeId> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.is_alive(id))
            .and_then(Slot::archetype)
    }

    /// Returns the slot at `index`, if the pool has one.
    #[must_use]
    pub fn slot(&self, index: u32) -> Option<&Slot> {
        self.slots.get(index as usize)
    }

    /// Iterates the ids of all live entities in index order.
    pub fn iter_alive(&self) -> impl Iterator<Item = NetId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_occupied())
            .map(|(index, slot)| NetId::compose(index as u32, slot.generation()))
    }

    /// Vacates every slot and resets all generations to 0.
    ///
    /// Ids issued before the clear may test alive again once their index is
    /// reallocated.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
        self.queued.fill(true);
        self.live = 0;
    }

    fn enqueue(&mut self, index: u32) {
        let queued = &mut self.queued[index as usize];
        if !*queued {
            *queued = true;
            self.free.push(index);
        }
    }

    fn pop_free(&mut self) -> Option<u32> {
        while let Some(index) = self.free.pop() {
            self.queued[index as usize] = false;
            if !self.slots[index as usize].is_occupied() {
                return Some(index);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ArchetypeId = ArchetypeId::new(1);
    const B: ArchetypeId = ArchetypeId::new(2);

    #[test]
    fn new_pool_is_empty() {
        let pool = SlotPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.capacity(), 0);
        assert_eq!(pool.iter_alive().count(), 0);
    }

    #[test]
    fn allocate_appends_sequential_indices() {
        let mut pool = SlotPool::with_capacity(4);
        let ids: Vec<NetId> = (0..3).map(|_| pool.allocate(A).unwrap()).collect();
        assert_eq!(
            ids,
            vec![
                NetId::compose(0, 0),
                NetId::compose(1, 0),
                NetId::compose(2, 0)
            ]
        );
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn freed_index_reused_with_new_generation() {
        let mut pool = SlotPool::new();
        let a = pool.allocate(A).unwrap();
        let b = pool.allocate(A).unwrap();
        pool.free(a).unwrap();
        pool.free(b).unwrap();

        // LIFO: the last freed index comes back first.
        let c = pool.allocate(B).unwrap();
        assert_eq!(c, NetId::compose(b.index(), 1));
        let d = pool.allocate(B).unwrap();
        assert_eq!(d, NetId::compose(a.index(), 1));
        assert_eq!(pool.capacity(), 2);

        assert!(!pool.is_alive(a));
        assert!(!pool.is_alive(b));
        assert!(pool.is_alive(c));
        assert_eq!(pool.archetype_of(c), Some(B));
        assert_eq!(pool.archetype_of(a), None);
    }

    #[test]
    fn stale_free_rejected() {
        let mut pool = SlotPool::new();
        let old = pool.allocate(A).unwrap();
        pool.free(old).unwrap();
        let new = pool.allocate(A).unwrap();

        assert_eq!(
            pool.free(old),
            Err(IdentError::StaleId {
                id: old,
                current_generation: 1
            })
        );
        assert!(pool.is_alive(new));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn double_free_rejected() {
        let mut pool = SlotPool::new();
        let id = pool.allocate(A).unwrap();
        pool.free(id).unwrap();
        assert!(matches!(pool.free(id), Err(IdentError::StaleId { .. })));
        assert!(pool.is_empty());
    }

    #[test]
    fn free_vacant_at_matching_generation() {
        let mut pool = SlotPool::new();
        let id = pool.allocate(A).unwrap();
        pool.free(id).unwrap();
        let never_issued = id.next_generation();
        assert_eq!(
            pool.free(never_issued),
            Err(IdentError::SlotVacant { index: id.index() })
        );
    }

    #[test]
    fn free_unknown_index() {
        let mut pool = SlotPool::new();
        assert_eq!(
            pool.free(NetId::compose(10, 0)),
            Err(IdentError::IndexOutOfRange { index: 10 })
        );
    }

    #[test]
    fn attach_grows_and_fills_gap() {
        let mut pool = SlotPool::new();
        let remote = NetId::compose(3, 9);
        pool.attach(remote, B).unwrap();
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.len(), 1);
        assert!(pool.is_alive(remote));
        assert_eq!(pool.slot(3).map(Slot::generation), Some(9));

        // Gap slots are handed out lowest first.
        assert_eq!(pool.allocate(A).unwrap().index(), 0);
        assert_eq!(pool.allocate(A).unwrap().index(), 1);
        assert_eq!(pool.allocate(A).unwrap().index(), 2);
        assert_eq!(pool.allocate(A).unwrap().index(), 4);
    }

    #[test]
    fn attach_into_freed_slot_is_not_reallocated() {
        let mut pool = SlotPool::new();
        let local = pool.allocate(A).unwrap();
        pool.free(local).unwrap();

        let remote = NetId::compose(local.index(), 40);
        pool.attach(remote, B).unwrap();

        // The freed index is still queued but now occupied; allocation must
        // skip it.
        let next = pool.allocate(A).unwrap();
        assert_ne!(next.index(), local.index());
        assert!(pool.is_alive(remote));
    }

    #[test]
    fn attach_free_cycles_keep_free_list_bounded() {
        let mut pool = SlotPool::new();
        for round in 0..10_000u32 {
            let remote = NetId::compose(0, (round & 0xFFF) as u16);
            pool.attach(remote, B).unwrap();
            pool.free(remote).unwrap();
        }
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.free.len(), 1);

        // Remote ids scattered across a wider range.
        for round in 0..1_000u32 {
            let remote = NetId::compose(round % 16, 0);
            let slot_generation = pool.slot(remote.index()).map_or(0, Slot::generation);
            let remote = remote.with_generation(slot_generation);
            pool.attach(remote, B).unwrap();
            pool.free(remote).unwrap();
            assert!(pool.free.len() <= pool.capacity());
        }
        assert_eq!(pool.capacity(), 16);
        assert_eq!(pool.free.len(), 16);
        assert!(pool.is_empty());

        // Every slot is still handed out exactly once.
        let mut indices: Vec<u32> = (0..16)
            .map(|_| pool.allocate(A).unwrap().index())
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..16).collect::<Vec<_>>());
        assert_eq!(pool.allocate(A).unwrap().index(), 16);
    }

    #[test]
    fn attach_occupied_rejected() {
        let mut pool = SlotPool::new();
        let id = pool.allocate(A).unwrap();
        assert_eq!(
            pool.attach(id, B),
            Err(IdentError::SlotOccupied { index: id.index() })
        );
        assert_eq!(pool.archetype_of(id), Some(A));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn iter_alive_in_index_order() {
        let mut pool = SlotPool::new();
        let ids: Vec<NetId> = (0..5).map(|_| pool.allocate(A).unwrap()).collect();
        pool.free(ids[1]).unwrap();
        pool.free(ids[3]).unwrap();
        let alive: Vec<NetId> = pool.iter_alive().collect();
        assert_eq!(alive, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn clear_resets_generations() {
        let mut pool = SlotPool::new();
        let a = pool.allocate(A).unwrap();
        pool.free(a).unwrap();
        pool.allocate(A).unwrap();
        pool.allocate(A).unwrap();
        pool.clear();

        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.slot(0), Some(&Slot::empty()));
        assert_eq!(pool.allocate(B).unwrap(), NetId::compose(0, 0));
        assert_eq!(pool.allocate(B).unwrap(), NetId::compose(1, 0));
    }

    #[test]
    fn is_alive_out_of_range() {
        let pool = SlotPool::new();
        assert!(!pool.is_alive(NetId::compose(MAX_INDEX, 0)));
        assert_eq!(pool.slot(0), None);
    }
}

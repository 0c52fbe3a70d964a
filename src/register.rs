//! Hash-consed register of frozen states.
//!
//! Keys are arena offsets, not pointers: the arena may move its backing
//! allocation wholesale as it grows, but offsets into it never change
//! meaning, and a frozen region's bytes are never mutated once written. The
//! register itself never needs to be touched when the arena grows — only
//! when the register's own slot array fills past half.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::arc::{self, ARC_SIZE};
use crate::arena::Arena;
use crate::error::BuildError;

const INITIAL_SLOTS: usize = 16;

pub struct Register {
    /// Power-of-two length. `0` marks an empty slot (offset 0 is the
    /// reserved arena sentinel, so it can never be a real state address).
    slots: Vec<u32>,
    count: usize,
}

impl Register {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Register {
            slots: zeroed_vec(INITIAL_SLOTS)?,
            count: 0,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn entry_count(&self) -> usize {
        self.count
    }

    /// Folds a region's hash per the order-sensitive scheme in the crate
    /// docs, and returns `(hash, region length in bytes)`. The `LAST` bit
    /// is deliberately excluded: it is a layout artifact of the region's
    /// final arc, not a semantic property of the state.
    fn hash_region(arena: &Arena, offset: u32) -> (u64, usize) {
        let mut hash: u64 = 0;
        let mut cursor = offset;
        let mut arcs = 0usize;
        loop {
            let record = arena.arc(cursor);
            hash = hash.wrapping_mul(17).wrapping_add(arc::label(record) as u64);
            hash = hash.wrapping_mul(17).wrapping_add(arc::target(record) as u64);
            if arc::is_final(record) {
                hash = hash.wrapping_add(17);
            }
            arcs += 1;
            let last = arc::is_last(record);
            cursor += ARC_SIZE as u32;
            if last {
                break;
            }
        }
        (hash, arcs * ARC_SIZE)
    }

    /// Looks up the scratch region `[scratch_offset, scratch_offset +
    /// scratch_len)` in the register. On a hit, returns the existing
    /// canonical address and the scratch bytes are simply abandoned. On a
    /// miss, copies the region into a fresh bump allocation, interns that
    /// address, and returns it.
    pub fn insert(
        &mut self,
        arena: &mut Arena,
        scratch_offset: u32,
        scratch_len: usize,
    ) -> Result<u32, BuildError> {
        let (hash, len) = Self::hash_region(arena, scratch_offset);
        debug_assert_eq!(len, scratch_len, "region length disagrees with caller");

        let mask = (self.slots.len() - 1) as u64;
        let mut index = (hash & mask) as usize;
        let mut step: u64 = 1;

        loop {
            let candidate = self.slots[index];
            if candidate == 0 {
                let fresh = arena.allocate(len / ARC_SIZE)?;
                arena.copy_region(scratch_offset, fresh, len);
                self.slots[index] = fresh;
                self.count += 1;
                if self.count * 2 > self.slots.len() {
                    self.resize(arena)?;
                }
                return Ok(fresh);
            }
            if regions_equal(arena, candidate, scratch_offset, len) {
                return Ok(candidate);
            }
            index = ((index as u64 + step) & mask) as usize;
            step += 1;
        }
    }

    /// Doubles the slot array and rehashes every occupied entry. No
    /// tombstones are needed: the register never deletes.
    fn resize(&mut self, arena: &Arena) -> Result<(), BuildError> {
        let new_len = self.slots.len() * 2;
        let mut new_slots = zeroed_vec(new_len)?;
        let mask = (new_len - 1) as u64;

        for &addr in &self.slots {
            if addr == 0 {
                continue;
            }
            let (hash, _) = Self::hash_region(arena, addr);
            let mut index = (hash & mask) as usize;
            let mut step: u64 = 1;
            while new_slots[index] != 0 {
                index = ((index as u64 + step) & mask) as usize;
                step += 1;
            }
            new_slots[index] = addr;
        }

        self.slots = new_slots;
        log::trace!("register resized to {} slots ({} entries)", new_len, self.count);
        Ok(())
    }
}

fn regions_equal(arena: &Arena, a: u32, b: u32, len: usize) -> bool {
    arena.region(a, len) == arena.region(b, len)
}

fn zeroed_vec(len: usize) -> Result<Vec<u32>, BuildError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(BuildError::AllocationFailure)?;
    v.resize(len, 0);
    Ok(v)
}

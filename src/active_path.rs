//! The stack of mutable states spelling the sequence most recently added.
//!
//! Each depth's slot is a full `MAX_LABELS`-arc region carved out of the
//! arena once, the first time the active path reaches that depth, and
//! reused in place for every later sequence that reaches the same depth:
//! "reopening" a slot after it freezes just rewinds its write cursor back
//! to the slot's base. This is what keeps active-path memory bounded by
//! the longest prefix ever seen rather than growing with every `add`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::arc::{self, ARC_SIZE, MAX_LABELS};
use crate::arena::Arena;
use crate::error::BuildError;

pub struct ActivePath {
    base: Vec<u32>,
    cursor: Vec<u32>,
}

impl ActivePath {
    pub fn new() -> Self {
        ActivePath {
            base: Vec::new(),
            cursor: Vec::new(),
        }
    }

    /// Ensures slots exist for every depth in `0..=len`, allocating fresh
    /// ones in the arena for any depth seen for the first time.
    pub fn expand_to(&mut self, len: usize, arena: &mut Arena) -> Result<(), BuildError> {
        while self.base.len() <= len {
            let offset = arena.allocate(MAX_LABELS)?;
            self.base.push(offset);
            self.cursor.push(offset);
        }
        Ok(())
    }

    /// The highest depth a slot has ever been allocated for.
    pub fn max_depth(&self) -> usize {
        self.base.len().saturating_sub(1)
    }

    #[inline]
    pub fn base(&self, depth: usize) -> u32 {
        self.base[depth]
    }

    #[inline]
    pub fn has_arcs(&self, depth: usize) -> bool {
        self.cursor[depth] > self.base[depth]
    }

    #[inline]
    fn last_arc_offset(&self, depth: usize) -> u32 {
        debug_assert!(self.has_arcs(depth));
        self.cursor[depth] - ARC_SIZE as u32
    }

    /// Appends one fresh arc at `depth` and advances its cursor.
    pub fn append_arc(&mut self, depth: usize, arena: &mut Arena, label: u8, flags: u8, target: u32) {
        let offset = self.cursor[depth];
        arc::write(arena.arc_mut(offset), label, flags, target);
        self.cursor[depth] = offset + ARC_SIZE as u32;
    }

    /// Marks the most recently written arc at `depth` as the last of its
    /// state.
    pub fn mark_last(&self, depth: usize, arena: &mut Arena) {
        let offset = self.last_arc_offset(depth);
        arc::mark_last(arena.arc_mut(offset));
    }

    /// Patches the target of the most recently written arc at `depth`.
    pub fn set_last_target(&self, depth: usize, arena: &mut Arena, target: u32) {
        let offset = self.last_arc_offset(depth);
        arc::set_target(arena.arc_mut(offset), target);
    }

    /// The byte length of the region currently written at `depth`,
    /// `[base, cursor)` — what gets looked up in, or copied by, the
    /// register when this depth is frozen.
    pub fn region_len(&self, depth: usize) -> usize {
        (self.cursor[depth] - self.base[depth]) as usize
    }

    /// Rewinds `depth`'s cursor back to its base, logically discarding the
    /// frozen arcs (the bytes themselves are left alone; they're simply
    /// never referenced by anything canonical again).
    pub fn reopen(&mut self, depth: usize) {
        self.cursor[depth] = self.base[depth];
    }
}

impl Default for ActivePath {
    fn default() -> Self {
        Self::new()
    }
}

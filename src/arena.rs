//! Growable byte-addressed bump arena.
//!
//! A single `Vec<u8>` is the backing store for every arc the builder ever
//! writes: active-path scratch slots and frozen, register-interned states
//! alike. Allocation only ever appends at the current end of the buffer and
//! returns the offset it started at — there is no free list, no
//! compaction, and nothing is ever moved once written (growth reallocates
//! the whole `Vec`, which preserves every existing byte at its existing
//! offset; see crate docs for why that's what makes offsets usable as
//! hash-consing keys).
//!
//! Offset 0 is never allocated to: it is reserved so `0` can mean "empty"
//! in the register and "terminal" as an arc target.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::arc::{ARC_SIZE, MAX_LABELS};
use crate::error::BuildError;

/// Default grow quantum, per spec: about 5 MiB.
pub const DEFAULT_GROWTH_SIZE: usize = 5 * 1024 * 1024;

pub struct Arena {
    buf: Vec<u8>,
    growth_size: usize,
    growth_count: u32,
}

impl Arena {
    pub fn new(growth_size: usize) -> Self {
        let growth_size = growth_size.max(ARC_SIZE * MAX_LABELS);
        let mut buf = Vec::new();
        // Offset 0 sentinel byte; never read back as part of any arc.
        buf.push(0);
        Arena {
            buf,
            growth_size,
            growth_count: 0,
        }
    }

    /// Reserves `labels * ARC_SIZE` zero-filled bytes and returns the
    /// offset they start at.
    pub fn allocate(&mut self, labels: usize) -> Result<u32, BuildError> {
        debug_assert!(labels <= MAX_LABELS);
        self.ensure_headroom()?;
        let offset = self.buf.len();
        let additional = labels * ARC_SIZE;
        // Capacity for this was already reserved by ensure_headroom, so
        // this resize cannot itself trigger a reallocation.
        self.buf.resize(offset + additional, 0);
        Ok(offset as u32)
    }

    /// Guarantees the free tail can hold one more worst-case state
    /// (`ARC_SIZE * MAX_LABELS`), growing by `growth_size` if not.
    fn ensure_headroom(&mut self) -> Result<(), BuildError> {
        let free = self.buf.capacity() - self.buf.len();
        let worst_case = ARC_SIZE * MAX_LABELS;
        if free < worst_case {
            self.buf
                .try_reserve(self.growth_size)
                .map_err(BuildError::AllocationFailure)?;
            self.growth_count += 1;
            log::trace!(
                "arena grew by {} bytes (growth #{}), len={}",
                self.growth_size,
                self.growth_count,
                self.buf.len()
            );
        }
        Ok(())
    }

    #[inline]
    pub fn arc(&self, offset: u32) -> &[u8] {
        let offset = offset as usize;
        &self.buf[offset..offset + ARC_SIZE]
    }

    #[inline]
    pub fn arc_mut(&mut self, offset: u32) -> &mut [u8] {
        let offset = offset as usize;
        &mut self.buf[offset..offset + ARC_SIZE]
    }

    #[inline]
    pub fn region(&self, offset: u32, len: usize) -> &[u8] {
        let offset = offset as usize;
        &self.buf[offset..offset + len]
    }

    /// Copies `len` bytes from `src` to `dst`. Requires `dst >= src + len`
    /// (always true for this crate's use: `dst` is a fresh allocation made
    /// strictly after `src` was reserved).
    pub fn copy_region(&mut self, src: u32, dst: u32, len: usize) {
        let (src, dst) = (src as usize, dst as usize);
        debug_assert!(dst >= src + len);
        let (front, back) = self.buf.split_at_mut(dst);
        back[..len].copy_from_slice(&front[src..src + len]);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn growth_count(&self) -> u32 {
        self.growth_count
    }

    /// Consumes the arena, returning a right-sized immutable copy of its
    /// bytes. Called exactly once, from `Builder::complete`.
    pub fn into_bytes(mut self) -> bytes::Bytes {
        self.buf.shrink_to_fit();
        bytes::Bytes::from(self.buf)
    }
}

//! Incremental minimal-automaton construction.
//!
//! Drives `add`/freeze/`complete` in strict lexicographic input order,
//! performing on-the-fly minimization (Daciuk/Mihov/Watson/Watson): each
//! call trims the active path to its longest common prefix with the
//! previous input, freezes the diverged suffix right-to-left through the
//! register, then grows the active path with whatever's new.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::active_path::ActivePath;
use crate::arc::{self, EPSILON, FINAL, TERMINAL};
use crate::arena::{Arena, DEFAULT_GROWTH_SIZE};
use crate::automaton::Automaton;
use crate::error::BuildError;
use crate::info::Info;
use crate::register::Register;

pub struct Builder {
    arena: Arena,
    register: Register,
    active_path: ActivePath,
    previous: Vec<u8>,
    current_len: usize,
    contains_empty: bool,
    poisoned: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::with_growth_size(DEFAULT_GROWTH_SIZE)
    }

    /// `bytes` is the arena's grow quantum, floored to one worst-case
    /// state (`ArcCodec::ARC_SIZE * MAX_LABELS`).
    pub fn with_growth_size(bytes: usize) -> Self {
        let mut arena = Arena::new(bytes);
        // Epsilon's single arc, allocated first and fixed at EPSILON. Its
        // target and FINAL bit are set at `complete`.
        let epsilon = arena.allocate(1).expect("initial allocation cannot fail");
        debug_assert_eq!(epsilon, EPSILON);
        arc::mark_last(arena.arc_mut(epsilon));

        Builder {
            arena,
            register: Register::new().expect("initial allocation cannot fail"),
            active_path: ActivePath::new(),
            previous: Vec::new(),
            current_len: 0,
            contains_empty: false,
            poisoned: false,
        }
    }

    /// Appends one sequence. The concatenation of all sequences supplied
    /// so far, compared unsigned byte-wise then by length, must be
    /// nondecreasing; duplicates are accepted as no-ops.
    pub fn add(&mut self, seq: &[u8]) -> Result<(), BuildError> {
        if self.poisoned {
            return Err(BuildError::AlreadyComplete);
        }

        if seq.is_empty() {
            if !self.previous.is_empty() {
                return Err(BuildError::EmptyAfterNonEmpty);
            }
        } else if seq < self.previous.as_slice() {
            return Err(BuildError::OrderViolation {
                previous: self.previous.clone(),
                next: seq.to_vec(),
            });
        }

        if seq.is_empty() {
            self.contains_empty = true;
        }

        self.insert(seq).map_err(|e| {
            self.poisoned = true;
            e
        })?;
        self.previous = seq.to_vec();
        Ok(())
    }

    /// Finalizes the automaton. No further `add` is possible (this method
    /// consumes the builder).
    pub fn complete(mut self) -> Result<Automaton, BuildError> {
        if self.poisoned {
            return Err(BuildError::AlreadyComplete);
        }

        // Flush: freezes every depth down to 1, leaving depth 0 (the root)
        // for the explicit freeze below. Bypasses the public ordering
        // checks above, since this isn't caller-supplied input.
        self.insert(&[]).map_err(|e| {
            self.poisoned = true;
            e
        })?;

        if self.contains_empty {
            arc::mark_final(self.arena.arc_mut(EPSILON));
        }

        let root_addr = self.freeze_depth(0)?;
        arc::set_target(self.arena.arc_mut(EPSILON), root_addr);

        let info = self.snapshot_info(Some(self.arena.len()));
        log::debug!(
            "fsa build complete: {} bytes, {} states, {} arena growths",
            info.serialized_buffer_size.unwrap_or(0),
            info.register_entry_count,
            info.reallocation_count
        );

        Ok(Automaton {
            arena: self.arena.into_bytes(),
            entry: EPSILON,
            info,
        })
    }

    /// Statistics as of right now; callable at any point during a build.
    pub fn info(&self) -> Info {
        self.snapshot_info(None)
    }

    fn snapshot_info(&self, serialized_buffer_size: Option<usize>) -> Info {
        Info {
            serialized_buffer_size,
            reallocation_count: self.arena.growth_count(),
            live_arena_size: self.arena.len(),
            max_active_path_length: self.active_path.max_depth(),
            register_slot_count: self.register.slot_count(),
            register_entry_count: self.register.entry_count(),
        }
    }

    /// The shared core of `add` and `complete`'s flush: common-prefix
    /// trim, right-to-left freeze of the diverged suffix (including its
    /// deepest state, which the previous call left open in case of
    /// exactly this kind of extension), then append of whatever's new.
    /// Performs no ordering validation of its own.
    fn insert(&mut self, seq: &[u8]) -> Result<(), BuildError> {
        let k = common_prefix_len(&self.previous, seq);
        let old_len = self.current_len;

        self.active_path.expand_to(seq.len(), &mut self.arena)?;

        // Freeze the diverged suffix, deepest first. Empty whenever `seq`
        // is a straight extension of `previous` (k == old_len): nothing
        // diverged, so depth `old_len` stays open for the append below.
        for depth in (k + 1..=old_len).rev() {
            let canonical = self.freeze_depth(depth)?;
            self.active_path.set_last_target(depth - 1, &mut self.arena, canonical);
            self.active_path.reopen(depth);
        }

        // Append the new suffix. The target always points at the next
        // depth's (possibly just-reopened) slot, even on the final byte:
        // whether that slot ends up empty (collapsing to `TERMINAL`) or
        // gains children of its own is resolved later, the next time this
        // depth is frozen.
        for i in (k + 1)..=seq.len() {
            let depth = i - 1;
            let label = seq[i - 1];
            let is_last_byte = i == seq.len();
            let flags = if is_last_byte { FINAL } else { 0 };
            let target = self.active_path.base(i);
            self.active_path.append_arc(depth, &mut self.arena, label, flags, target);
        }

        self.current_len = seq.len();
        Ok(())
    }

    /// Resolves `depth`'s current slot to a canonical address: `TERMINAL`
    /// if it never gained any arcs, otherwise its hash-consed register
    /// address (after marking the slot's last arc). Does not reopen the
    /// slot; that's the caller's job once it no longer needs the address.
    fn freeze_depth(&mut self, depth: usize) -> Result<u32, BuildError> {
        if self.active_path.has_arcs(depth) {
            self.active_path.mark_last(depth, &mut self.arena);
            let len = self.active_path.region_len(depth);
            self.register.insert(&mut self.arena, self.active_path.base(depth), len)
        } else {
            Ok(TERMINAL)
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Builds an automaton from a sequence of already-sorted byte strings.
pub fn build<I, S>(sequences: I) -> Result<Automaton, BuildError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut builder = Builder::new();
    for seq in sequences {
        builder.add(seq.as_ref())?;
    }
    builder.complete()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(xs: &[&str]) -> Vec<Vec<u8>> {
        xs.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    #[test]
    fn empty_language() {
        let automaton = build::<_, Vec<u8>>(Vec::new()).unwrap();
        assert!(automaton.iter().next().is_none());
        assert!(!automaton.contains(b""));
    }

    #[test]
    fn single_empty_string() {
        let automaton = build(words(&[""])).unwrap();
        let all: Vec<_> = automaton.iter().collect();
        assert_eq!(all, vec![Vec::<u8>::new()]);
        assert!(automaton.contains(b""));
    }

    #[test]
    fn shared_suffix() {
        let automaton = build(words(&["ac", "bc"])).unwrap();
        let mut all: Vec<_> = automaton.iter().collect();
        all.sort();
        assert_eq!(all, words(&["ac", "bc"]));
        assert_eq!(automaton.info().register_entry_count, 2);
    }

    #[test]
    fn prefix_relationship() {
        let automaton = build(words(&["a", "ab"])).unwrap();
        assert!(automaton.contains(b"a"));
        assert!(automaton.contains(b"ab"));
        assert!(!automaton.contains(b"abc"));
    }

    #[test]
    fn order_violation_is_rejected() {
        let mut builder = Builder::new();
        builder.add(b"b").unwrap();
        let err = builder.add(b"a").unwrap_err();
        assert!(matches!(err, BuildError::OrderViolation { .. }));
    }

    #[test]
    fn empty_after_non_empty_is_rejected() {
        let mut builder = Builder::new();
        builder.add(b"a").unwrap();
        let err = builder.add(b"").unwrap_err();
        assert!(matches!(err, BuildError::EmptyAfterNonEmpty));
    }

    #[test]
    fn duplicates_are_no_ops() {
        let automaton = build(words(&["a", "a", "b"])).unwrap();
        let all: Vec<_> = automaton.iter().collect();
        assert_eq!(all, words(&["a", "b"]));
    }
}

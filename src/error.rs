//! The crate's one error type.
//!
//! Every variant here is either a caller contract violation (wrong input
//! order, calling `add` after `complete`) or an environmental failure
//! (allocation refused). There is no transient-retry path: the builder
//! either produces a consistent automaton or it doesn't produce one at all.

#[cfg(not(feature = "std"))]
use alloc::collections::TryReserveError;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::fmt;
#[cfg(feature = "std")]
use std::collections::TryReserveError;

/// Why a `Builder::add` or `Builder::complete` call failed.
#[derive(Debug)]
pub enum BuildError {
    /// `add` was called with a sequence that compares less than the
    /// previously added one (unsigned byte-wise, then by length).
    OrderViolation { previous: Vec<u8>, next: Vec<u8> },
    /// An empty sequence was submitted after a non-empty one. An initial
    /// empty input is legal and idempotent; this variant only fires when a
    /// non-empty sequence already set `previous`.
    EmptyAfterNonEmpty,
    /// `add` or `complete` was called on a builder that has already
    /// completed (or been poisoned by an allocation failure).
    AlreadyComplete,
    /// The arena or the register could not grow to hold the next state.
    /// The builder is poisoned: every subsequent call returns
    /// `AlreadyComplete`.
    AllocationFailure(TryReserveError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::OrderViolation { previous, next } => write!(
                f,
                "input out of order: {next:?} follows {previous:?}, which is not lex-nondecreasing"
            ),
            BuildError::EmptyAfterNonEmpty => {
                write!(f, "empty sequence submitted after a non-empty one")
            }
            BuildError::AlreadyComplete => {
                write!(f, "builder has already completed")
            }
            BuildError::AllocationFailure(source) => {
                write!(f, "allocation failure; builder is poisoned: {source}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::AllocationFailure(source) => Some(source),
            _ => None,
        }
    }
}

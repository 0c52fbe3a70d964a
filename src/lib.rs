#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export the bytes crate: `Automaton::arena` hands back a `bytes::Bytes`
// and callers that want to store or hash it need the same type.
pub use bytes;

mod active_path;
mod arc;
mod arena;
mod automaton;
mod builder;
mod error;
mod info;
mod register;

pub use crate::arc::{ARC_SIZE, MAX_LABELS};
pub use crate::automaton::Automaton;
pub use crate::builder::{build, Builder};
pub use crate::error::BuildError;
pub use crate::info::Info;

//! Post-build statistics.

/// A point-in-time snapshot of builder or automaton statistics.
///
/// `serialized_buffer_size` is only meaningful once `Builder::complete` has
/// run; it is `None` for a snapshot taken mid-build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    pub serialized_buffer_size: Option<usize>,
    pub reallocation_count: u32,
    pub live_arena_size: usize,
    pub max_active_path_length: usize,
    pub register_slot_count: usize,
    pub register_entry_count: usize,
}

impl Info {
    /// Estimated peak memory in megabytes: live arena bytes plus four
    /// bytes per register slot (the slot array is `Vec<u32>`).
    pub fn estimated_memory_mb(&self) -> f64 {
        let bytes = self.live_arena_size + 4 * self.register_slot_count;
        bytes as f64 / (1024.0 * 1024.0)
    }
}

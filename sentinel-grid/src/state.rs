use crate::VirtualisationOptions;

/// The current fully-rendered range and load progress of one grid.
///
/// Invariants (checked by [`VirtualisationState::is_consistent`]):
/// - `range_start <= range_end <= total_count + 1`
/// - `loaded_count <= total_count`
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualisationState {
    pub range_start: usize,
    pub range_end: usize,
    pub loaded_count: usize,
    pub total_count: usize,
}

impl VirtualisationState {
    pub fn new(options: &VirtualisationOptions, total_count: usize) -> Self {
        let mut state = Self {
            range_start: 0,
            range_end: 0,
            loaded_count: 0,
            total_count,
        };
        state.initialize_range_end(options);
        state
    }

    /// Resets the range to `[0, overflow + page_size]`, clamped to `total_count + 1`.
    pub fn initialize_range_end(&mut self, options: &VirtualisationOptions) {
        self.range_start = 0;
        self.range_end = options.initial_range_end().min(self.range_limit());
    }

    /// Largest allowed `range_end`.
    pub fn range_limit(&self) -> usize {
        self.total_count.saturating_add(1)
    }

    pub fn is_consistent(&self) -> bool {
        self.range_start <= self.range_end
            && self.range_end <= self.range_limit()
            && self.loaded_count <= self.total_count
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.loaded_count >= self.total_count
    }
}

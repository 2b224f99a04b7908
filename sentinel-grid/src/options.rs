use alloc::format;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_OVERFLOW: usize = 20;
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 250;

static NEXT_GRID_SEQ: AtomicU64 = AtomicU64::new(1);

/// Configuration for one grid instance.
///
/// Options are built once and then handed to the grid, which never mutates them. Identifiers
/// that are not overridden are derived from a per-process sequence number, so the n-th grid
/// created gets `sentinel-grid-{n}` and sentinel classes suffixed with `-scroll`, `-above` and
/// `-below`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualisationOptions {
    /// Rows per page. Always at least 1.
    pub page_size: usize,
    /// Buffer rows kept on each side of the visible range.
    pub overflow: usize,
    pub is_load_on_demand: bool,
    /// Delay of the debounced refresh scheduled after an accepted boundary crossing.
    pub refresh_delay_ms: u64,

    pub grid_id: String,
    pub scroll_sentinel_id: String,
    pub above_sentinel_id: String,
    pub below_sentinel_id: String,
}

impl Default for VirtualisationOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualisationOptions {
    pub fn new() -> Self {
        let seq = NEXT_GRID_SEQ.fetch_add(1, Ordering::Relaxed);
        Self::with_seq(seq)
    }

    /// Creates options whose generated identifiers derive from `seq` instead of the process-wide
    /// sequence. Useful when identifiers must be reproducible across runs.
    pub fn with_seq(seq: u64) -> Self {
        let grid_id = format!("sentinel-grid-{seq}");
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            overflow: DEFAULT_OVERFLOW,
            is_load_on_demand: false,
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
            scroll_sentinel_id: format!("{grid_id}-scroll"),
            above_sentinel_id: format!("{grid_id}-above"),
            below_sentinel_id: format!("{grid_id}-below"),
            grid_id,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_overflow(mut self, overflow: usize) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_load_on_demand(mut self, is_load_on_demand: bool) -> Self {
        self.is_load_on_demand = is_load_on_demand;
        self
    }

    pub fn with_refresh_delay_ms(mut self, delay_ms: u64) -> Self {
        self.refresh_delay_ms = delay_ms;
        self
    }

    /// Overrides the grid id. Sentinel ids that were not overridden follow the new id.
    pub fn with_grid_id(mut self, grid_id: impl Into<String>) -> Self {
        let prev = core::mem::take(&mut self.grid_id);
        let grid_id = grid_id.into();
        if self.scroll_sentinel_id == format!("{prev}-scroll") {
            self.scroll_sentinel_id = format!("{grid_id}-scroll");
        }
        if self.above_sentinel_id == format!("{prev}-above") {
            self.above_sentinel_id = format!("{grid_id}-above");
        }
        if self.below_sentinel_id == format!("{prev}-below") {
            self.below_sentinel_id = format!("{grid_id}-below");
        }
        self.grid_id = grid_id;
        self
    }

    pub fn with_scroll_sentinel_id(mut self, id: impl Into<String>) -> Self {
        self.scroll_sentinel_id = id.into();
        self
    }

    pub fn with_above_sentinel_id(mut self, id: impl Into<String>) -> Self {
        self.above_sentinel_id = id.into();
        self
    }

    pub fn with_below_sentinel_id(mut self, id: impl Into<String>) -> Self {
        self.below_sentinel_id = id.into();
        self
    }

    /// Half of `overflow`, rounded down. This is the cushion used on each side of a crossing.
    pub fn half_overflow(&self) -> usize {
        self.overflow / 2
    }

    /// The initial (and minimum upper-crossing) range end: `overflow + page_size`.
    pub fn initial_range_end(&self) -> usize {
        self.overflow.saturating_add(self.page_size)
    }
}

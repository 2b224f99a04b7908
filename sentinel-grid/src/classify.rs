use crate::{RenderMode, VirtualisationOptions, VirtualisationState};

/// How one row should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowClass {
    pub index: usize,
    pub mode: RenderMode,
    /// `index % 2 == 0`. Cosmetic only.
    pub is_even: bool,
    pub above_sentinel: bool,
    pub below_sentinel: bool,
}

impl RowClass {
    pub fn has_sentinel(&self) -> bool {
        self.above_sentinel || self.below_sentinel
    }
}

/// Classifies the row at `index` against the current range.
///
/// - A row renders in full when `range_start <= index <= range_end + 1`, otherwise as a
///   skeleton. In load-on-demand mode every loaded row renders in full.
/// - An *above* sentinel goes on rows with `index <= range_start + overflow / 2` once the range
///   no longer starts at 0.
/// - A *below* sentinel goes on rows with
///   `range_end - overflow / 2 <= index <= total_count - overflow / 2`.
///
/// Sentinels are placed on skeleton rows too, so a viewport that jumps past the rendered span
/// still lands on a sentinel and recenters the range.
///
/// Load-on-demand grids place no boundary sentinels; they are driven by the scroll sentinel
/// instead.
pub fn classify_row(
    state: &VirtualisationState,
    options: &VirtualisationOptions,
    index: usize,
) -> RowClass {
    let is_even = index % 2 == 0;
    if options.is_load_on_demand {
        return RowClass {
            index,
            mode: RenderMode::Full,
            is_even,
            above_sentinel: false,
            below_sentinel: false,
        };
    }

    let half = options.half_overflow();
    let mode = if is_in_range(state, index) {
        RenderMode::Full
    } else {
        RenderMode::Skeleton
    };
    let above_sentinel = above_band(state, half).is_some_and(|last| index <= last);
    let below_sentinel =
        below_band(state, half).is_some_and(|(first, last)| first <= index && index <= last);

    RowClass {
        index,
        mode,
        is_even,
        above_sentinel,
        below_sentinel,
    }
}

/// `range_start <= index <= range_end + 1`.
pub fn is_in_range(state: &VirtualisationState, index: usize) -> bool {
    state.range_start <= index && index <= state.range_end.saturating_add(1)
}

/// Last row of the *above* band `[0, range_start + overflow / 2]`, if the band exists.
fn above_band(state: &VirtualisationState, half: usize) -> Option<usize> {
    (state.range_start > 0).then(|| state.range_start.saturating_add(half))
}

/// The *below* band `[range_end - overflow / 2, total_count - overflow / 2]`, if non-empty.
fn below_band(state: &VirtualisationState, half: usize) -> Option<(usize, usize)> {
    let last = state.total_count.checked_sub(half)?;
    let first = state.range_end.saturating_sub(half);
    (first <= last).then_some((first, last))
}

/// Visits the rows in `[0, count)` that carry a sentinel, in ascending order.
///
/// Only the two bands are walked; rows between them are skipped without being classified.
pub fn for_each_sentinel_row(
    state: &VirtualisationState,
    options: &VirtualisationOptions,
    count: usize,
    mut f: impl FnMut(RowClass),
) {
    if options.is_load_on_demand {
        return;
    }
    let half = options.half_overflow();
    let above = above_band(state, half).map(|last| (0, last));
    let below = below_band(state, half);

    // The bands overlap when the range is narrower than the overflow; merge them.
    let spans = match (above, below) {
        (Some((a0, a1)), Some((b0, b1))) if b0 <= a1.saturating_add(1) => {
            [Some((a0, a1.max(b1))), None]
        }
        (a, b) => [a, b],
    };
    for (first, last) in spans.into_iter().flatten() {
        let end = last.saturating_add(1).min(count);
        for index in first..end {
            f(classify_row(state, options, index));
        }
    }
}

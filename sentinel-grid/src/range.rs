use crate::{VirtualisationOptions, VirtualisationState};

/// Which sentinel entered the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    /// The *above* sentinel: the user scrolled toward the start.
    Upper,
    /// The *below* sentinel: the user scrolled toward the end.
    Lower,
}

/// Recomputes the range after the *below* sentinel at `index` entered the viewport.
///
/// Returns `None` when the crossing is stale: `index` is past the data, or the range was already
/// advanced beyond it (`index <= range_end - overflow / 2`).
///
/// On acceptance the range is recentered with half the overflow on each side:
/// - `range_end = min(index + overflow / 2, total_count + 1)`
/// - `range_start = max(index - page_size - overflow / 2, 0)`
pub fn lower_boundary_crossed(
    state: &VirtualisationState,
    options: &VirtualisationOptions,
    index: usize,
) -> Option<VirtualisationState> {
    let half = options.half_overflow();
    if index > state.total_count {
        return None;
    }
    // `index > range_end - half` without underflow.
    if index.saturating_add(half) <= state.range_end {
        return None;
    }

    let range_end = index.saturating_add(half).min(state.range_limit());
    let range_start = index
        .saturating_sub(options.page_size)
        .saturating_sub(half)
        .min(range_end);

    Some(VirtualisationState {
        range_start,
        range_end,
        ..*state
    })
}

/// Recomputes the range after the *above* sentinel at `index` entered the viewport.
///
/// Returns `None` unless `index < range_start + overflow / 2`.
///
/// On acceptance:
/// - `range_start = max(index - overflow / 2, 0)`
/// - `range_end = max(index + page_size + overflow / 2, overflow + page_size)`, clamped to
///   `total_count + 1`
pub fn upper_boundary_crossed(
    state: &VirtualisationState,
    options: &VirtualisationOptions,
    index: usize,
) -> Option<VirtualisationState> {
    let half = options.half_overflow();
    if index >= state.range_start.saturating_add(half) {
        return None;
    }

    let range_end = index
        .saturating_add(options.page_size)
        .saturating_add(half)
        .max(options.initial_range_end())
        .min(state.range_limit());
    let range_start = index.saturating_sub(half).min(range_end);

    Some(VirtualisationState {
        range_start,
        range_end,
        ..*state
    })
}

/// Dispatches to [`upper_boundary_crossed`] or [`lower_boundary_crossed`].
pub fn boundary_crossed(
    state: &VirtualisationState,
    options: &VirtualisationOptions,
    boundary: Boundary,
    index: usize,
) -> Option<VirtualisationState> {
    let next = match boundary {
        Boundary::Upper => upper_boundary_crossed(state, options, index),
        Boundary::Lower => lower_boundary_crossed(state, options, index),
    };
    if let Some(next) = &next {
        debug_assert!(
            next.is_consistent(),
            "boundary_crossed produced an inconsistent state: {next:?}"
        );
    }
    next
}

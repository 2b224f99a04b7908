//! A headless range/state engine for sentinel-driven row virtualization.
//!
//! For the grid controller and the observer-layer message boundary, see the
//! `sentinel-grid-adapter` crate.
//!
//! This crate decides which contiguous index range of a large row list should be fully rendered,
//! based on intermittent "a sentinel row entered the viewport" signals:
//!
//! - [`lower_boundary_crossed`] / [`upper_boundary_crossed`] recenter the range around a crossing
//! - [`ScrollGate`] drops reentrant signals and coalesces bursts into one debounced refresh
//! - [`IncrementalLoader`] pulls a contiguous prefix from a [`DataSource`] page by page
//! - [`classify_row`] derives full/skeleton rendering and sentinel placement per row
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the sentinel crossing signals (as raw identifiers, see [`parse_row_index`])
//! - the current time in milliseconds, to drive the debounced refresh
//! - the rendering of full rows, skeleton rows and sentinels
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod classify;
mod gate;
mod loader;
mod options;
mod range;
mod signal;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use classify::{RowClass, classify_row, for_each_sentinel_row, is_in_range};
pub use gate::{Debouncer, GateGuard, GateRun, RefreshTicket, ScrollGate};
pub use loader::{DataSource, IncrementalLoader, PageRequest};
pub use options::{
    DEFAULT_OVERFLOW, DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_DELAY_MS, VirtualisationOptions,
};
pub use range::{Boundary, boundary_crossed, lower_boundary_crossed, upper_boundary_crossed};
pub use signal::{IndexParseError, parse_row_index};
pub use state::VirtualisationState;
pub use types::{Column, IgnoreReason, RenderMode, Row, RowKey, SignalOutcome};

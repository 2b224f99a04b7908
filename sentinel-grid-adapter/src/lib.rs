//! Grid controller and observer-layer boundary for the `sentinel-grid` crate.
//!
//! The `sentinel-grid` crate is UI-agnostic and focuses on the range math and state. This crate
//! wires it into a single per-grid controller and models the viewport-observer layer as a message
//! boundary:
//!
//! - inbound [`SentinelEvent`]s (boundary crossings, scroll-near-end, target rows)
//! - outbound [`ObserverCommand`]s (re-register current sentinels, dispose)
//!
//! This crate is intentionally framework-agnostic (no DOM or widget bindings), so the whole
//! state machine can be driven by synthetic events in tests.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod events;
mod source;


pub use controller::{GridController, Refresh};
pub use events::{ObserveRequest, ObserverCommand, SentinelEvent};
pub use source::VecDataSource;

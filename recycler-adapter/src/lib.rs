//! Adapter utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and focuses on windowing, layout, and cell recycling. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Auto-scrolling toward the last item or the focused item, yielding to manual scrolling
//! - Half-life damping for smooth, monotonic scroll approaches
//! - Focus memory with a grace period
//!
//! This crate is intentionally framework-agnostic (no GUI toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod auto_scroll;
mod damp;
mod focus;


pub use auto_scroll::{AutoScrollMode, AutoScrollOptions, AutoScrollPhase, AutoScroller};
pub use damp::{HalfLife, damp};
pub use focus::FocusMemory;

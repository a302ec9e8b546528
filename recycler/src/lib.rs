//! A headless cell-recycling engine for scrollable tables and grids.
//!
//! For adapter-level utilities (auto-scrolling, focus following), see the `recycler-adapter`
//! crate.
//!
//! A table shows a very large (or infinite, in repeat mode) number of items through a small,
//! fixed pool of reusable cells. On every layout pass the engine:
//! - computes the window of item indices overlapping the viewport (fixed grid, jagged column,
//!   or jagged rows)
//! - assigns a rectangle to each index of the window
//! - reconciles the cell pool so each visible index has exactly one bound cell, re-binding only
//!   the indices that entered the window
//!
//! It is UI-agnostic. A host UI layer is expected to provide:
//! - the viewport size and content offset
//! - a [`DataSource`] answering item counts and sizes, and filling cells with content
//! - the pre-instantiated cell views, which it positions from the reported rectangles
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("recycler requires either the `std` or the `libm` feature for float math");

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod binding;
mod controller;
mod layout;
pub mod math;
mod options;
mod pool;
mod source;
mod state;
mod types;
mod windower;

#[cfg(test)]
mod tests;

pub use controller::{PassReport, TableContentController};
pub use layout::{
    FixedGridLayout, JaggedColumnLayout, JaggedRowsLayout, LayoutStrategy, LayoutWindow, PackedRow,
};
pub use options::{ConfigIssue, TableOptions};
pub use pool::{Cell, CellId, CellPool, ReconcileReport};
pub use source::DataSource;
pub use state::TableState;
pub use types::{Align, Insets, Orientation, Point, Rect, Size};
pub use windower::ViewportWindower;

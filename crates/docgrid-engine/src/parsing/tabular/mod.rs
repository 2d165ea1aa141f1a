//! Table and cell geometry tracked during the tree walk.

pub mod grid;
pub mod tracker;

pub use grid::TableGridState;
pub use tracker::TableGridTracker;

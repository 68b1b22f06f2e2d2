//! # classtable core
//!
//! Domain model and pure operations for the weekly class-timetable grid:
//! a day-by-period matrix in which a period's position is the shared time
//! slot across all six school days.
//!
//! Everything in this crate is side-effect free. Mutations take an aggregate
//! by reference and return a new one, so callers (HTTP handlers, UI event
//! sources) decide when a transformed grid is persisted.

/// Single-cell editing of lesson periods
pub mod editor;
/// Error types shared by every crate in the workspace
pub mod errors;
/// Initial schedule generation
pub mod generate;
/// Read-only grid views for rendering
pub mod grid;
/// Aggregate, period, and reference data types
pub mod models;
/// Break-column relocation
pub mod relocate;

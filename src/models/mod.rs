//! Planner domain models.
//!
//! Provides the data types for the weekly grid and the blocks placed on it.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `TimeGrid` | Half-hour marks over the working day |
//! | `Weekday` | One of the five grid columns |
//! | `BlockTemplate` | A draggable catalog item |
//! | `PlacedBlock` | A template bound to a day and start mark |

mod block;
mod grid;

pub use block::{default_catalog, BlockId, BlockKind, BlockTemplate, PlacedBlock};
pub use grid::{
    format_time, GridError, Interval, TimeGrid, TimeMark, Weekday, DEFAULT_DAY_START_MINUTE,
    DEFAULT_MARK_COUNT, SLOT_MINUTES,
};

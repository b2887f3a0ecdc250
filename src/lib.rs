//! Weekly block planner.
//!
//! Places fixed-duration blocks on a half-hour grid spanning five weekdays,
//! enforcing axis bounds and per-day non-overlap, and exposes the whole thing
//! as a drag-and-drop surface that renders to text.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeGrid`, `TimeMark`, `Weekday`,
//!   `BlockTemplate`, `BlockKind`, `PlacedBlock`
//! - **`placement`**: `PlacementStore` — accept/reject, reset, occupancy
//! - **`surface`**: Drag state machine, cell states, layout and rendering
//! - **`summary`**: Meeting lines and per-day load
//! - **`validation`**: Catalog, config and placement integrity checks
//! - **`config`**: JSON planner configuration
//!
//! # Example
//!
//! ```
//! use u_weekplan::models::{TimeMark, Weekday};
//! use u_weekplan::surface::{DropOutcome, Slot, Surface};
//!
//! let mut surface = Surface::default();
//! surface.begin_drag(1);
//! surface.hover(Some(Slot::new(Weekday::Monday, TimeMark::at(9, 0))));
//! assert!(matches!(surface.release(), DropOutcome::Placed(_)));
//! assert_eq!(
//!     surface.summary_lines(),
//!     ["Adam has a meeting on Monday from 9:00 till 12:00"]
//! );
//! ```

pub mod config;
pub mod models;
pub mod placement;
pub mod summary;
pub mod surface;
pub mod validation;

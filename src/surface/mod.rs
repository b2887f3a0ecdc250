//! Interactive drag-and-drop surface.
//!
//! Holds the placement store together with the transient drag state and
//! turns host drag events into placement requests. Everything displayed is
//! derived from the store plus the current hover:
//!
//! - the palette is the catalog minus placed templates,
//! - each cell's [`CellState`] comes from store occupancy and hover,
//! - the summary is one line per placed block.
//!
//! # Drag Lifecycle
//!
//! ```text
//! begin_drag(id) ──► hover(slot)* ──► release()     → Placed | Rejected | SlotOccupied
//!                                 └─► cancel_drag() → no state change
//! ```
//!
//! A drop over an occupied cell is refused by the cell itself; the store is
//! never consulted.

mod layout;
mod render;

pub use layout::{HitTarget, Rect, SurfaceLayout};
pub use render::render;

use tracing::debug;

use crate::config::{ConfigError, PlannerConfig};
use crate::models::{BlockId, BlockTemplate, TimeGrid, TimeMark, Weekday};
use crate::placement::{PlacementError, PlacementStore};
use crate::summary::{meeting_lines, DayLoad};
use crate::validation::validate_config;

/// One grid cell: a weekday column and a time mark row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Day column.
    pub day: Weekday,
    /// Mark row.
    pub mark: TimeMark,
}

impl Slot {
    /// Creates a slot.
    pub fn new(day: Weekday, mark: TimeMark) -> Self {
        Self { day, mark }
    }
}

/// Visual state of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Free and not under the pointer.
    Empty,
    /// Free and under a dragged block.
    Hovered,
    /// Covered by a block, not its first slot.
    Occupied,
    /// First slot of a block; carries the label.
    OccupiedStart,
}

/// State of an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// Template being dragged.
    pub block_id: BlockId,
    /// Cell currently under the pointer.
    pub hover: Option<Slot>,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The block was placed at the slot.
    Placed(Slot),
    /// The store refused the placement.
    Rejected(PlacementError),
    /// The target cell is already covered.
    SlotOccupied(Slot),
    /// No drag was active, or the pointer was not over a cell.
    Abandoned,
}

/// The planner surface.
#[derive(Debug, Clone)]
pub struct Surface {
    owner: String,
    catalog: Vec<BlockTemplate>,
    store: PlacementStore,
    drag: Option<DragState>,
    last_diagnostic: Option<String>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(
            "Adam",
            crate::models::default_catalog(),
            PlacementStore::default(),
        )
    }
}

impl Surface {
    /// Creates a surface over an empty store.
    pub fn new(owner: impl Into<String>, catalog: Vec<BlockTemplate>, store: PlacementStore) -> Self {
        Self {
            owner: owner.into(),
            catalog,
            store,
            drag: None,
            last_diagnostic: None,
        }
    }

    /// Builds a surface from a configuration, validating it first.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Invalid)?;
        let grid = config.grid()?;
        Ok(Self::new(
            config.owner.clone(),
            config.catalog.clone(),
            PlacementStore::new(grid),
        ))
    }

    /// Owner named in the summary.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The full block catalog.
    pub fn catalog(&self) -> &[BlockTemplate] {
        &self.catalog
    }

    /// The placement store.
    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    /// The time axis.
    pub fn grid(&self) -> &TimeGrid {
        self.store.grid()
    }

    /// Active drag, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Returns true if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Message from the most recent refused drop, cleared on the next success or reset.
    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    /// Templates available to drag: the catalog minus placed templates.
    pub fn palette(&self) -> Vec<&BlockTemplate> {
        self.catalog
            .iter()
            .filter(|t| !self.store.is_placed(t.id))
            .collect()
    }

    /// Starts dragging a palette template.
    ///
    /// Returns false, leaving any current drag untouched, if the template is
    /// unknown or already placed.
    pub fn begin_drag(&mut self, block_id: BlockId) -> bool {
        let available = self
            .catalog
            .iter()
            .any(|t| t.id == block_id && !self.store.is_placed(t.id));
        if !available {
            return false;
        }
        self.drag = Some(DragState {
            block_id,
            hover: None,
        });
        true
    }

    /// Moves the pointer over a cell (or off the grid). Ignored without a drag.
    pub fn hover(&mut self, slot: Option<Slot>) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover = slot;
        }
    }

    /// Abandons the active drag with no state change.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Releases the active drag over the hovered cell.
    pub fn release(&mut self) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::Abandoned;
        };
        let Some(slot) = drag.hover else {
            debug!(block = drag.block_id, "drag released outside the grid");
            return DropOutcome::Abandoned;
        };
        let Some(template) = self.catalog.iter().find(|t| t.id == drag.block_id) else {
            return DropOutcome::Abandoned;
        };

        if self.store.is_occupied(slot.day, slot.mark) {
            debug!(day = %slot.day, mark = %slot.mark, "drop on occupied slot ignored");
            self.last_diagnostic = Some(format!("{} {} is already taken", slot.day, slot.mark));
            return DropOutcome::SlotOccupied(slot);
        }

        match self.store.attempt_place(template, slot.day, slot.mark) {
            Ok(_) => {
                self.last_diagnostic = None;
                DropOutcome::Placed(slot)
            }
            Err(e) => {
                self.last_diagnostic = Some(e.to_string());
                DropOutcome::Rejected(e)
            }
        }
    }

    /// Clears every placement and any drag in progress.
    pub fn reset(&mut self) {
        self.drag = None;
        self.last_diagnostic = None;
        self.store.reset();
    }

    /// Visual state of one cell.
    pub fn cell_state(&self, slot: Slot) -> CellState {
        match self.store.occupant(slot.day, slot.mark) {
            Some(o) if o.is_start => CellState::OccupiedStart,
            Some(_) => CellState::Occupied,
            None if self.drag.is_some_and(|d| d.hover == Some(slot)) => CellState::Hovered,
            None => CellState::Empty,
        }
    }

    /// Label shown in a cell: the block label on its first slot only.
    pub fn cell_label(&self, slot: Slot) -> Option<&str> {
        self.store
            .occupant(slot.day, slot.mark)
            .filter(|o| o.is_start)
            .map(|o| o.block.template.label.as_str())
    }

    /// One line per placed block, in placement order.
    pub fn summary_lines(&self) -> Vec<String> {
        meeting_lines(&self.owner, self.store.placed())
    }

    /// Booked load per weekday.
    pub fn week_load(&self) -> Vec<DayLoad> {
        DayLoad::week(self.store.placed(), self.store.grid())
    }
}

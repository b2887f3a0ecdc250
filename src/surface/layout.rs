//! Terminal geometry for the surface and pointer hit-testing.
//!
//! ```text
//! row 0   [ Reset Schedule ]  [3 hours] [3 hours] ... [8 hours]
//! row 1   status / hint
//! row 2          Monday    Tuesday   ...
//! row 3+   8:00  cell      cell      ...      one row per mark
//! ```

use crate::models::{BlockId, TimeGrid, Weekday};

use super::{Slot, Surface};

/// Text of the reset control.
pub const RESET_LABEL: &str = "[ Reset Schedule ]";

/// Width of the time label column.
pub const TIME_COLUMN_WIDTH: u16 = 7;

/// Width of one day column.
pub const CELL_WIDTH: u16 = 11;

/// Row of the day header.
pub const HEADER_ROW: u16 = 2;

/// First grid row.
pub const GRID_TOP: u16 = 3;

const CONTROL_ROW: u16 = 0;
const CHIP_GAP: u16 = 1;

/// An axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a screen position falls inside.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        !self.is_empty()
            && x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The reset control.
    Reset,
    /// A palette chip.
    Palette(BlockId),
    /// A grid cell.
    Cell(Slot),
}

/// Screen positions of every interactive element for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLayout {
    /// Reset control.
    pub reset: Rect,
    /// Palette chips in palette order.
    pub palette: Vec<(BlockId, Rect)>,
    /// The cell area (all days × all marks).
    pub cells: Rect,
    grid: TimeGrid,
}

impl SurfaceLayout {
    /// Lays out the current surface.
    ///
    /// Chips are clipped at the last screen column; chips starting past it
    /// are left out of the layout.
    pub fn compute(surface: &Surface) -> Self {
        let reset = Rect::new(0, CONTROL_ROW, text_width(RESET_LABEL), 1);

        let mut x = reset.width + 2;
        let mut palette = Vec::new();
        for t in surface.palette() {
            if x == u16::MAX {
                break;
            }
            let width = text_width(&t.label).saturating_add(2).min(u16::MAX - x);
            palette.push((t.id, Rect::new(x, CONTROL_ROW, width, 1)));
            x = x.saturating_add(width).saturating_add(CHIP_GAP);
        }

        let grid = *surface.grid();
        let cells = Rect::new(
            TIME_COLUMN_WIDTH,
            GRID_TOP,
            CELL_WIDTH * Weekday::ALL.len() as u16,
            grid.len() as u16,
        );

        Self {
            reset,
            palette,
            cells,
            grid,
        }
    }

    /// Rectangle of one grid cell.
    pub fn cell_rect(&self, slot: Slot) -> Option<Rect> {
        let row = self.grid.index_of(slot.mark)? as u16;
        let col = slot.day.index() as u16;
        Some(Rect::new(
            self.cells.x + col * CELL_WIDTH,
            self.cells.y + row,
            CELL_WIDTH,
            1,
        ))
    }

    /// The grid cell under a screen position.
    pub fn slot_at(&self, x: u16, y: u16) -> Option<Slot> {
        if !self.cells.contains(x, y) {
            return None;
        }
        let day = Weekday::from_index(usize::from((x - self.cells.x) / CELL_WIDTH))?;
        let mark = self.grid.mark_at(usize::from(y - self.cells.y))?;
        Some(Slot::new(day, mark))
    }

    /// Determine which element a screen position falls on.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        if self.reset.contains(x, y) {
            return Some(HitTarget::Reset);
        }
        if let Some((id, _)) = self.palette.iter().find(|(_, r)| r.contains(x, y)) {
            return Some(HitTarget::Palette(*id));
        }
        self.slot_at(x, y).map(HitTarget::Cell)
    }
}

/// Display width in terminal columns (one per char).
pub(crate) fn text_width(text: &str) -> u16 {
    text.chars().count().min(usize::from(u16::MAX)) as u16
}

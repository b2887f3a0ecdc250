//! Text projection of the surface.
//!
//! Pure function of the surface and its layout; the host only has to print
//! the returned lines top to bottom.

use crate::models::Weekday;

use super::layout::{text_width, SurfaceLayout, CELL_WIDTH, RESET_LABEL, TIME_COLUMN_WIDTH};
use super::{CellState, Slot, Surface};

const EMPTY_MARK: &str = "·";
const HOVER_MARK: &str = "+ drop +";
const BLOCK_FILL: char = '░';

/// Renders the surface to lines of text.
pub fn render(surface: &Surface, layout: &SurfaceLayout) -> Vec<String> {
    let mut lines = Vec::with_capacity(usize::from(layout.cells.y + layout.cells.height) + 8);

    lines.push(control_row(surface, layout));
    lines.push(status_row(surface));
    lines.push(header_row());

    for mark in surface.grid().marks() {
        let mut row = format!("{:>5}  ", mark.to_string());
        for &day in &Weekday::ALL {
            row.push_str(&cell_text(surface, Slot::new(day, mark)));
        }
        lines.push(row);
    }

    let summary = surface.summary_lines();
    if !summary.is_empty() {
        lines.push(String::new());
        lines.extend(summary);
    }

    lines.push(String::new());
    let load: Vec<String> = surface
        .week_load()
        .iter()
        .map(|l| format!("{} {:.1}h", &l.day.name()[..3], l.booked_hours()))
        .collect();
    lines.push(format!("Booked: {}", load.join("  ")));

    if let Some(msg) = surface.last_diagnostic() {
        lines.push(format!("! {msg}"));
    }

    lines
}

fn control_row(surface: &Surface, layout: &SurfaceLayout) -> String {
    let mut row = String::from(RESET_LABEL);
    let mut width = text_width(RESET_LABEL);
    let dragged = surface.drag().map(|d| d.block_id);

    for (id, rect) in &layout.palette {
        let Some(template) = surface.catalog().iter().find(|t| t.id == *id) else {
            continue;
        };
        while width < rect.x {
            row.push(' ');
            width += 1;
        }
        // Dim the source chip during drag
        let chip = if dragged == Some(*id) {
            format!("({})", template.label)
        } else {
            format!("[{}]", template.label)
        };
        let chip: String = chip.chars().take(usize::from(rect.width)).collect();
        width = width.saturating_add(text_width(&chip));
        row.push_str(&chip);
    }
    row
}

fn status_row(surface: &Surface) -> String {
    match surface.drag() {
        Some(drag) => {
            let label = surface
                .catalog()
                .iter()
                .find(|t| t.id == drag.block_id)
                .map_or("block", |t| t.label.as_str());
            format!(" Dragging {label}... release over a slot to drop | Esc: cancel")
        }
        None => " Drag a block onto the grid | r: reset | q: quit".to_string(),
    }
}

fn header_row() -> String {
    let mut row = " ".repeat(usize::from(TIME_COLUMN_WIDTH));
    for day in Weekday::ALL {
        row.push_str(&center(day.name(), usize::from(CELL_WIDTH), ' '));
    }
    row
}

fn cell_text(surface: &Surface, slot: Slot) -> String {
    let width = usize::from(CELL_WIDTH);
    let inner = width - 2;
    let body = match surface.cell_state(slot) {
        CellState::Empty => center(EMPTY_MARK, inner, ' '),
        CellState::Hovered => center(HOVER_MARK, inner, ' '),
        CellState::Occupied => BLOCK_FILL.to_string().repeat(inner),
        CellState::OccupiedStart => {
            center(surface.cell_label(slot).unwrap_or_default(), inner, BLOCK_FILL)
        }
    };
    format!(" {body} ")
}

/// Centers `text` in `width` columns, truncating if it does not fit.
fn center(text: &str, width: usize, fill: char) -> String {
    let text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut out = String::with_capacity(width * fill.len_utf8() + text.len());
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(&text);
    out.extend(std::iter::repeat(fill).take(right));
    out
}

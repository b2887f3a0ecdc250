//! Placement store.
//!
//! Owns the blocks currently placed on the week and decides whether a
//! proposed placement is accepted.
//!
//! # Acceptance
//! A placement of template `t` on `day` at `start` is accepted iff:
//! 1. `start` is a mark on the axis,
//! 2. `index(start) + t.kind.slot_span() <= axis length`,
//! 3. `[start, start + duration)` overlaps no placed block on `day`.
//!
//! On acceptance any earlier placement of `t` is removed and the new one is
//! appended. Rejections leave the store untouched.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{BlockId, BlockTemplate, PlacedBlock, TimeGrid, TimeMark, Weekday};

/// Why a placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The start is not one of the axis marks.
    #[error("block {id} cannot start at {start}: not a mark on the time axis")]
    OffAxis { id: BlockId, start: TimeMark },
    /// The block would run past the end of the axis.
    #[error("block {id} does not fit at {start}: needs {needed} slots, {available} left")]
    OutOfBounds {
        id: BlockId,
        start: TimeMark,
        needed: usize,
        available: usize,
    },
    /// The block would overlap another block on the same day.
    #[error("block {id} overlaps block {conflicting_id} on {day}")]
    Overlap {
        id: BlockId,
        day: Weekday,
        conflicting_id: BlockId,
    },
}

/// The block covering a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOccupant<'a> {
    /// The covering block.
    pub block: &'a PlacedBlock,
    /// Whether the slot is the block's first one.
    pub is_start: bool,
}

/// The set of placed blocks for one week.
#[derive(Debug, Clone, Default)]
pub struct PlacementStore {
    grid: TimeGrid,
    placed: Vec<PlacedBlock>,
}

impl PlacementStore {
    /// Creates an empty store over `grid`.
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            placed: Vec::new(),
        }
    }

    /// The time axis placements are checked against.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Attempts to place `template` on `day` starting at `start`.
    ///
    /// Returns the new placement, or the reason it was rejected. Existing
    /// placements of the same template take part in the overlap check.
    pub fn attempt_place(
        &mut self,
        template: &BlockTemplate,
        day: Weekday,
        start: TimeMark,
    ) -> Result<&PlacedBlock, PlacementError> {
        if let Err(e) = self.check(template, day, start) {
            warn!(error = %e, "placement rejected");
            return Err(e);
        }

        self.placed.retain(|b| b.id() != template.id);
        self.placed.push(template.place(day, start));
        let placed = &self.placed[self.placed.len() - 1];
        debug!(block = %placed, "placement accepted");
        Ok(placed)
    }

    /// Runs the acceptance checks without touching the store.
    pub fn check(
        &self,
        template: &BlockTemplate,
        day: Weekday,
        start: TimeMark,
    ) -> Result<(), PlacementError> {
        let id = template.id;
        let index = self
            .grid
            .index_of(start)
            .ok_or(PlacementError::OffAxis { id, start })?;

        let needed = template.kind.slot_span();
        let available = self.grid.len() - index;
        if needed > available {
            return Err(PlacementError::OutOfBounds {
                id,
                start,
                needed,
                available,
            });
        }

        let proposed = template.place(day, start).interval();
        if let Some(conflict) = self
            .placed
            .iter()
            .find(|b| b.day == day && b.interval().overlaps(&proposed))
        {
            return Err(PlacementError::Overlap {
                id,
                day,
                conflicting_id: conflict.id(),
            });
        }

        Ok(())
    }

    /// Removes every placement.
    pub fn reset(&mut self) {
        info!(cleared = self.placed.len(), "schedule reset");
        self.placed.clear();
    }

    /// The block covering `mark` on `day`, if any.
    pub fn occupant(&self, day: Weekday, mark: TimeMark) -> Option<SlotOccupant<'_>> {
        self.placed
            .iter()
            .find(|b| b.covers(day, mark))
            .map(|block| SlotOccupant {
                block,
                is_start: block.start == mark,
            })
    }

    /// Whether a slot is covered by any block.
    pub fn is_occupied(&self, day: Weekday, mark: TimeMark) -> bool {
        self.occupant(day, mark).is_some()
    }

    /// Whether the template is currently placed.
    pub fn is_placed(&self, id: BlockId) -> bool {
        self.placed.iter().any(|b| b.id() == id)
    }

    /// The placement of a template.
    pub fn get(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.placed.iter().find(|b| b.id() == id)
    }

    /// Placements in the order they were made.
    pub fn placed(&self) -> &[PlacedBlock] {
        &self.placed
    }

    /// Placements on one day.
    pub fn placed_on(&self, day: Weekday) -> impl Iterator<Item = &PlacedBlock> + '_ {
        self.placed.iter().filter(move |b| b.day == day)
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_catalog, BlockKind};

    fn three(id: BlockId) -> BlockTemplate {
        BlockTemplate::new(id, BlockKind::ThreeHour)
    }

    fn eight(id: BlockId) -> BlockTemplate {
        BlockTemplate::new(id, BlockKind::EightHour)
    }

    #[test]
    fn test_overlap_then_adjacent() {
        let mut store = PlacementStore::default();
        assert!(store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .is_ok());

        let err = store
            .attempt_place(&three(2), Weekday::Monday, TimeMark::at(10, 0))
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::Overlap {
                id: 2,
                day: Weekday::Monday,
                conflicting_id: 1
            }
        );
        assert_eq!(store.len(), 1);

        assert!(store
            .attempt_place(&three(2), Weekday::Monday, TimeMark::at(12, 0))
            .is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_overlap_is_per_day() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap();
        assert!(store
            .attempt_place(&three(2), Weekday::Tuesday, TimeMark::at(9, 0))
            .is_ok());
    }

    #[test]
    fn test_overlap_when_new_block_starts_earlier() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(11, 0))
            .unwrap();
        let err = store
            .attempt_place(&three(2), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap_err();
        assert!(matches!(err, PlacementError::Overlap { conflicting_id: 1, .. }));

        // [8:00, 11:00) touches [11:00, 14:00)
        assert!(store
            .attempt_place(&three(2), Weekday::Monday, TimeMark::at(8, 0))
            .is_ok());
    }

    #[test]
    fn test_three_hour_bounds() {
        let mut store = PlacementStore::default();
        assert!(store
            .attempt_place(&three(1), Weekday::Wednesday, TimeMark::at(15, 30))
            .is_ok());

        let err = store
            .attempt_place(&three(2), Weekday::Thursday, TimeMark::at(16, 0))
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::OutOfBounds {
                id: 2,
                start: TimeMark::at(16, 0),
                needed: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_eight_hour_bounds_include_extra_slot() {
        let mut store = PlacementStore::default();
        assert!(store
            .attempt_place(&eight(5), Weekday::Friday, TimeMark::at(10, 0))
            .is_ok());

        let err = store
            .attempt_place(&eight(6), Weekday::Thursday, TimeMark::at(10, 30))
            .unwrap_err();
        assert!(matches!(
            err,
            PlacementError::OutOfBounds {
                needed: 17,
                available: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_off_axis_start() {
        let mut store = PlacementStore::default();
        for start in [TimeMark::at(7, 30), TimeMark::at(9, 15), TimeMark::at(18, 30)] {
            let err = store
                .attempt_place(&three(1), Weekday::Monday, start)
                .unwrap_err();
            assert_eq!(err, PlacementError::OffAxis { id: 1, start });
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_same_template() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap();
        store
            .attempt_place(&three(1), Weekday::Tuesday, TimeMark::at(13, 0))
            .unwrap();

        assert_eq!(store.len(), 1);
        let b = store.get(1).unwrap();
        assert_eq!(b.day, Weekday::Tuesday);
        assert_eq!(b.start, TimeMark::at(13, 0));
    }

    #[test]
    fn test_replace_checks_against_own_prior_placement() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap();
        let err = store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(10, 0))
            .unwrap_err();
        assert!(matches!(err, PlacementError::Overlap { conflicting_id: 1, .. }));
        assert_eq!(store.get(1).unwrap().start, TimeMark::at(9, 0));
    }

    #[test]
    fn test_replace_moves_to_end_of_order() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap();
        store
            .attempt_place(&three(2), Weekday::Tuesday, TimeMark::at(9, 0))
            .unwrap();
        store
            .attempt_place(&three(1), Weekday::Friday, TimeMark::at(9, 0))
            .unwrap();

        let ids: Vec<_> = store.placed().iter().map(|b| b.id()).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn test_reset() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap();
        store
            .attempt_place(&eight(5), Weekday::Wednesday, TimeMark::at(8, 0))
            .unwrap();
        store.reset();
        assert!(store.is_empty());
        assert!(!store.is_placed(1));
        assert!(!store.is_placed(5));

        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn test_occupant() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(9, 0))
            .unwrap();

        let start = store.occupant(Weekday::Monday, TimeMark::at(9, 0)).unwrap();
        assert!(start.is_start);
        assert_eq!(start.block.id(), 1);

        let inner = store.occupant(Weekday::Monday, TimeMark::at(11, 30)).unwrap();
        assert!(!inner.is_start);

        assert!(store.occupant(Weekday::Monday, TimeMark::at(12, 0)).is_none());
        assert!(store.occupant(Weekday::Tuesday, TimeMark::at(9, 0)).is_none());
    }

    #[test]
    fn test_eight_hour_occupancy_excludes_extra_slot() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&eight(5), Weekday::Monday, TimeMark::at(10, 0))
            .unwrap();
        assert!(store.is_occupied(Weekday::Monday, TimeMark::at(17, 30)));
        assert!(!store.is_occupied(Weekday::Monday, TimeMark::at(18, 0)));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let store = PlacementStore::default();
        let catalog = default_catalog();
        assert!(store
            .check(&catalog[0], Weekday::Monday, TimeMark::at(8, 0))
            .is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_placed_on() {
        let mut store = PlacementStore::default();
        store
            .attempt_place(&three(1), Weekday::Monday, TimeMark::at(8, 0))
            .unwrap();
        store
            .attempt_place(&three(2), Weekday::Monday, TimeMark::at(13, 0))
            .unwrap();
        store
            .attempt_place(&three(3), Weekday::Friday, TimeMark::at(8, 0))
            .unwrap();
        assert_eq!(store.placed_on(Weekday::Monday).count(), 2);
        assert_eq!(store.placed_on(Weekday::Thursday).count(), 0);
    }
}

//! Block catalog models.
//!
//! A block template is one of the fixed draggable items; a placed block is a
//! template bound to a weekday and start mark.
//!
//! # Slot Span
//! Bounds checks count half-hour slots, not minutes. A block needs
//! `duration_hours × 2` slots, and the 8-hour kind needs one more on top of
//! that. The extra slot belongs to the kind, not to a general rule; it is not
//! part of the block's occupied interval.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::grid::{Interval, TimeMark, Weekday};

/// Identifier of a block template.
pub type BlockId = u32;

/// The fixed block durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Three hours.
    ThreeHour,
    /// Eight hours.
    EightHour,
}

impl BlockKind {
    /// Duration in whole hours.
    pub fn duration_hours(self) -> u16 {
        match self {
            Self::ThreeHour => 3,
            Self::EightHour => 8,
        }
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration_minutes(self) -> u16 {
        self.duration_hours() * 60
    }

    /// Half-hour slots required on the axis for a placement to fit.
    pub fn slot_span(self) -> usize {
        let extra = match self {
            Self::ThreeHour => 0,
            Self::EightHour => 1,
        };
        usize::from(self.duration_hours()) * 2 + extra
    }

    /// Default display label.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::ThreeHour => "3 hours",
            Self::EightHour => "8 hours",
        }
    }
}

/// A draggable block template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTemplate {
    /// Unique template identifier.
    pub id: BlockId,
    /// Display label.
    pub label: String,
    /// Duration kind.
    pub kind: BlockKind,
}

impl BlockTemplate {
    /// Creates a template labelled after its kind.
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            label: kind.default_label().to_string(),
            kind,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.kind.duration_minutes()
    }

    /// Binds this template to a day and start mark.
    pub fn place(&self, day: Weekday, start: TimeMark) -> PlacedBlock {
        PlacedBlock {
            template: self.clone(),
            day,
            start,
        }
    }
}

/// The default catalog: four 3-hour blocks (ids 1-4), two 8-hour blocks (ids 5-6).
pub fn default_catalog() -> Vec<BlockTemplate> {
    let mut catalog: Vec<BlockTemplate> = (1..=4)
        .map(|id| BlockTemplate::new(id, BlockKind::ThreeHour))
        .collect();
    catalog.extend((5..=6).map(|id| BlockTemplate::new(id, BlockKind::EightHour)));
    catalog
}

/// A template placed on the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// The template this placement was made from.
    pub template: BlockTemplate,
    /// Weekday column.
    pub day: Weekday,
    /// Start mark.
    pub start: TimeMark,
}

impl PlacedBlock {
    /// Template identifier.
    #[inline]
    pub fn id(&self) -> BlockId {
        self.template.id
    }

    /// End of the block: start plus the real duration.
    pub fn end(&self) -> TimeMark {
        self.start.plus_minutes(self.template.duration_minutes())
    }

    /// Occupied interval [start, end).
    pub fn interval(&self) -> Interval {
        Interval::new(self.start.minutes(), self.end().minutes())
    }

    /// Whether this block covers `mark` on `day`.
    pub fn covers(&self, day: Weekday, mark: TimeMark) -> bool {
        self.day == day && self.interval().contains(mark.minutes())
    }
}

impl fmt::Display for PlacedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} '{}' {} {}-{}",
            self.template.id,
            self.template.label,
            self.day,
            self.start,
            self.end()
        )
    }
}

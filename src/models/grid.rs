//! Time grid model.
//!
//! Defines the schedulable daily axis (half-hour marks over a fixed window)
//! and the fixed working week.
//!
//! # Time Model
//! All times are minutes since midnight. A mark opens a half-hour slot, so an
//! axis of `n` marks starting at `s` covers `[s, s + 30n)`.
//!
//! The default axis is 8:00 through 18:00 inclusive (21 marks), which spans
//! `[8:00, 18:30)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of one slot (minutes).
pub const SLOT_MINUTES: u16 = 30;

/// Minutes in a day; no axis may run past midnight.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Default first mark (8:00).
pub const DEFAULT_DAY_START_MINUTE: u16 = 8 * 60;

/// Default number of marks (8:00 through 18:00 inclusive).
pub const DEFAULT_MARK_COUNT: usize = 21;

/// Formats a numeric hour mark as `H:MM`.
///
/// The minute part is `00` for whole hours and `30` otherwise; the hour is
/// not zero-padded.
///
/// ```
/// use u_weekplan::models::format_time;
///
/// assert_eq!(format_time(8.0), "8:00");
/// assert_eq!(format_time(12.5), "12:30");
/// ```
pub fn format_time(hour: f64) -> String {
    let h = hour.floor() as i64;
    let m = if hour.fract() == 0.0 { "00" } else { "30" };
    format!("{h}:{m}")
}

/// A working weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// The week in column order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }

    /// Column index (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weekday for a column index.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point on the daily axis, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeMark(pub u16);

impl TimeMark {
    /// Mark at a whole number of minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Mark at `h:mm`.
    pub fn at(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Numeric hour (`8:30` → `8.5`).
    pub fn hour(self) -> f64 {
        f64::from(self.0) / 60.0
    }

    /// This mark shifted forward by `minutes`.
    pub fn plus_minutes(self, minutes: u16) -> Self {
        Self(self.0 + minutes)
    }
}

impl fmt::Display for TimeMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A time interval [start, end) in minutes.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Interval start (minutes, inclusive).
    pub start: u16,
    /// Interval end (minutes, exclusive).
    pub end: u16,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Length of this interval (minutes).
    #[inline]
    pub fn duration(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    /// Whether a minute falls within this interval.
    #[inline]
    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Whether two intervals overlap.
    ///
    /// Symmetric: true iff either interval's start lies inside the other.
    /// Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Errors building a [`TimeGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("time axis must have at least one mark")]
    Empty,
    #[error("day start {0} is not on a half-hour boundary")]
    Unaligned(TimeMark),
    #[error("time axis starting at {start} with {marks} marks runs past midnight")]
    PastMidnight { start: TimeMark, marks: usize },
}

/// The daily axis of half-hour marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start: TimeMark,
    mark_count: usize,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            start: TimeMark(DEFAULT_DAY_START_MINUTE),
            mark_count: DEFAULT_MARK_COUNT,
        }
    }
}

impl TimeGrid {
    /// Creates an axis of `mark_count` half-hour marks starting at `start`.
    pub fn new(start: TimeMark, mark_count: usize) -> Result<Self, GridError> {
        if mark_count == 0 {
            return Err(GridError::Empty);
        }
        if start.minutes() % SLOT_MINUTES != 0 {
            return Err(GridError::Unaligned(start));
        }
        let span = mark_count
            .checked_mul(usize::from(SLOT_MINUTES))
            .and_then(|m| m.checked_add(usize::from(start.minutes())));
        match span {
            Some(end) if end <= usize::from(MINUTES_PER_DAY) => Ok(Self { start, mark_count }),
            _ => Err(GridError::PastMidnight {
                start,
                marks: mark_count,
            }),
        }
    }

    /// First mark.
    pub fn start(&self) -> TimeMark {
        self.start
    }

    /// End of the axis: the close of the last mark's slot.
    pub fn end(&self) -> TimeMark {
        self.start.plus_minutes(self.mark_count as u16 * SLOT_MINUTES)
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.mark_count
    }

    /// Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.mark_count == 0
    }

    /// Total minutes covered by the axis.
    pub fn span_minutes(&self) -> u16 {
        self.end().minutes() - self.start.minutes()
    }

    /// Mark at a position on the axis.
    pub fn mark_at(&self, index: usize) -> Option<TimeMark> {
        (index < self.mark_count)
            .then(|| self.start.plus_minutes(index as u16 * SLOT_MINUTES))
    }

    /// Position of a mark on the axis, if it is one.
    pub fn index_of(&self, mark: TimeMark) -> Option<usize> {
        let offset = mark.minutes().checked_sub(self.start.minutes())?;
        if offset % SLOT_MINUTES != 0 {
            return None;
        }
        let index = usize::from(offset / SLOT_MINUTES);
        (index < self.mark_count).then_some(index)
    }

    /// All marks in order.
    pub fn marks(&self) -> impl Iterator<Item = TimeMark> + '_ {
        (0..self.mark_count).filter_map(|i| self.mark_at(i))
    }
}

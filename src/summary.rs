//! Human-readable schedule summary and per-day load.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Booked minutes | Sum of placed durations on a day |
//! | Fill ratio | Booked minutes / axis span |

use crate::models::{PlacedBlock, TimeGrid, Weekday};

/// One summary line per placed block, in placement order.
///
/// Each line reads `"{owner} has a meeting on {day} from {start} till {end}"`.
pub fn meeting_lines(owner: &str, placed: &[PlacedBlock]) -> Vec<String> {
    placed
        .iter()
        .map(|b| {
            format!(
                "{owner} has a meeting on {} from {} till {}",
                b.day,
                b.start,
                b.end()
            )
        })
        .collect()
}

/// Booked time on one weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayLoad {
    /// Weekday.
    pub day: Weekday,
    /// Sum of placed durations (minutes).
    pub booked_minutes: u16,
    /// Booked share of the axis (0.0..=1.0).
    pub fill_ratio: f64,
}

impl DayLoad {
    /// Computes the load of every weekday, in column order.
    pub fn week(placed: &[PlacedBlock], grid: &TimeGrid) -> Vec<DayLoad> {
        let span = f64::from(grid.span_minutes());
        Weekday::ALL
            .iter()
            .map(|&day| {
                let booked_minutes: u16 = placed
                    .iter()
                    .filter(|b| b.day == day)
                    .map(|b| b.interval().duration())
                    .sum();
                DayLoad {
                    day,
                    booked_minutes,
                    fill_ratio: (f64::from(booked_minutes) / span).min(1.0),
                }
            })
            .collect()
    }

    /// Booked hours (may be fractional).
    pub fn booked_hours(&self) -> f64 {
        f64::from(self.booked_minutes) / 60.0
    }
}

//! Integrity checks for planner inputs and placement state.
//!
//! Input checks run on a catalog before it reaches the surface. Detects:
//! - Duplicate template IDs
//! - Empty labels
//! - Templates that can never fit on the axis
//!
//! State checks re-verify the store invariants over a set of placements:
//! - At most one placement per template
//! - No overlap between placements on the same day
//! - Every placement starts on the axis and fits within it

use std::collections::HashSet;

use crate::config::PlannerConfig;
use crate::models::{BlockTemplate, PlacedBlock, TimeGrid};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two templates share the same ID.
    DuplicateId,
    /// A template has a blank label.
    EmptyLabel,
    /// A template needs more slots than the axis has.
    NeverFits,
    /// The configured axis is invalid.
    InvalidAxis,
    /// A template is placed more than once.
    DuplicatePlacement,
    /// Two placements on the same day overlap.
    Overlap,
    /// A placement starts off the axis or runs past its end.
    OutOfBounds,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a block catalog against the axis it will be placed on.
///
/// Checks:
/// 1. No duplicate template IDs
/// 2. No blank labels
/// 3. Every template fits on the axis at its first mark
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &[BlockTemplate], grid: &TimeGrid) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for t in catalog {
        if !ids.insert(t.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate block ID: {}", t.id),
            ));
        }

        if t.label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyLabel,
                format!("Block {} has an empty label", t.id),
            ));
        }

        if t.kind.slot_span() > grid.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NeverFits,
                format!(
                    "Block {} needs {} slots but the axis has {}",
                    t.id,
                    t.kind.slot_span(),
                    grid.len()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a loaded configuration: its axis, then its catalog on that axis.
pub fn validate_config(config: &PlannerConfig) -> ValidationResult {
    match config.grid() {
        Ok(grid) => validate_catalog(&config.catalog, &grid),
        Err(e) => Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidAxis,
            e.to_string(),
        )]),
    }
}

/// Verifies the store invariants over a set of placements.
pub fn validate_placements(placed: &[PlacedBlock], grid: &TimeGrid) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (i, b) in placed.iter().enumerate() {
        if !ids.insert(b.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePlacement,
                format!("Block {} is placed more than once", b.id()),
            ));
        }

        match grid.index_of(b.start) {
            Some(index) if index + b.template.kind.slot_span() <= grid.len() => {}
            _ => errors.push(ValidationError::new(
                ValidationErrorKind::OutOfBounds,
                format!("Block {} at {} does not fit the axis", b.id(), b.start),
            )),
        }

        for other in &placed[i + 1..] {
            if other.day == b.day && other.interval().overlaps(&b.interval()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::Overlap,
                    format!(
                        "Blocks {} and {} overlap on {}",
                        b.id(),
                        other.id(),
                        b.day
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

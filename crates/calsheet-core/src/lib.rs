//! # calsheet-core
//!
//! Core domain model and traits for calsheet yearly calendar workbooks.
//!
//! This crate provides:
//! - Domain types: `CalendarMatrix`, `Week`, `EventTable`, `MonthEvents`
//! - Calendar helpers: leap years, month lengths, weekday of the 1st
//! - Core trait: `YearRenderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use calsheet_core::{CalendarMatrix, EventTable};
//!
//! let january = CalendarMatrix::build(2025, 1).unwrap();
//! assert_eq!(january.position_of(1), Some((0, 3))); // Wednesday
//!
//! let events = EventTable::builtin();
//! assert_eq!(events.lookup(1, 1), ["Revelion", "An nou"]);
//! ```

pub mod events;
pub mod matrix;

pub use events::{cell_text, EventTable, MonthEvents};
pub use matrix::{
    days_in_month, first_weekday, is_leap_year, validate_year, CalendarMatrix, Week,
};

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Year rendered when nothing else is requested
pub const DEFAULT_YEAR: i32 = 2025;

/// Days in a week row
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; DAYS_PER_WEEK] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

/// Full English name of a month (1-12)
pub fn month_name(month: u32) -> Result<&'static str, CalendarError> {
    let number = u8::try_from(month).map_err(|_| CalendarError::InvalidMonth(month))?;
    chrono::Month::try_from(number)
        .map(|m| m.name())
        .map_err(|_| CalendarError::InvalidMonth(month))
}

/// Upper-case three-letter abbreviation of a month ("JAN")
pub fn month_abbrev(month: u32) -> Result<String, CalendarError> {
    Ok(month_name(month)?[..3].to_uppercase())
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering of a whole year
pub trait YearRenderer {
    type Output;

    /// Render the twelve months of `year`, annotated from `events`
    fn render(&self, year: i32, events: &EventTable) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Invalid calendar input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] CalendarError),

    #[error("File in use: {}", .0.display())]
    ResourceBusy(PathBuf),

    #[error("Failed to save {}: {detail}", path.display())]
    Persistence { path: PathBuf, detail: String },

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(month_name(1).unwrap(), "January");
        assert_eq!(month_name(10).unwrap(), "October");
        assert_eq!(month_name(12).unwrap(), "December");
    }

    #[test]
    fn month_name_rejects_out_of_range() {
        assert_eq!(month_name(0), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(month_name(13), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(month_name(300), Err(CalendarError::InvalidMonth(300)));
    }

    #[test]
    fn month_abbreviations_are_upper_case() {
        assert_eq!(month_abbrev(1).unwrap(), "JAN");
        assert_eq!(month_abbrev(10).unwrap(), "OCT");
        assert_eq!(month_abbrev(9).unwrap(), "SEP");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CalendarError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (expected 1-12)"
        );
        let busy = RenderError::ResourceBusy(PathBuf::from("cal.xlsx"));
        assert_eq!(busy.to_string(), "File in use: cal.xlsx");
        let failed = RenderError::Persistence {
            path: PathBuf::from("out/cal.xlsx"),
            detail: "disk full".into(),
        };
        assert_eq!(failed.to_string(), "Failed to save out/cal.xlsx: disk full");
    }
}

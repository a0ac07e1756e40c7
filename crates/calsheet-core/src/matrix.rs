//! Calendar matrix construction
//!
//! A month is laid out as rows of seven weekday slots, Sunday first. Day 1
//! sits in the column of its real weekday; leading slots of the first week and
//! trailing slots of the last week stay empty.
//!
//! ```text
//!         January 2025
//!  Su Mo Tu We Th Fr Sa
//!            1  2  3  4
//!   5  6  7  8  9 10 11
//!  ...
//!  26 27 28 29 30 31
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{month_name, CalendarError, DAYS_PER_WEEK};

/// One calendar row: day numbers indexed by weekday (Sunday = 0)
pub type Week = [Option<u32>; DAYS_PER_WEEK];

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    match month {
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        4 | 6 | 9 | 11 => Ok(30),
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        _ => Err(CalendarError::InvalidMonth(month)),
    }
}

/// Check that `year` can be rendered
pub fn validate_year(year: i32) -> Result<(), CalendarError> {
    first_of_month(year, 1).map(|_| ())
}

/// Weekday column (Sunday = 0 .. Saturday = 6) of the first day of the month
pub fn first_weekday(year: i32, month: u32) -> Result<usize, CalendarError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday() as usize)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    if year < 1 {
        return Err(CalendarError::InvalidYear(year));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidYear(year))
}

/// Week-by-weekday grid of one month
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMatrix {
    year: i32,
    month: u32,
    weeks: Vec<Week>,
}

impl CalendarMatrix {
    /// Lay out the days of `month` (1-12) in `year`
    pub fn build(year: i32, month: u32) -> Result<Self, CalendarError> {
        let mut column = first_weekday(year, month)?;
        let length = days_in_month(year, month)?;

        let mut weeks = Vec::with_capacity(6);
        let mut week: Week = [None; DAYS_PER_WEEK];
        for day in 1..=length {
            week[column] = Some(day);
            column += 1;
            if column == DAYS_PER_WEEK {
                weeks.push(week);
                week = [None; DAYS_PER_WEEK];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }

        Ok(Self { year, month, weeks })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Full English month name
    pub fn month_name(&self) -> &'static str {
        // `month` was validated by `build`
        month_name(self.month).unwrap_or_default()
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Number of week rows (4, 5 or 6)
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Number of days in the month
    pub fn day_count(&self) -> u32 {
        self.days().count() as u32
    }

    /// Populated slots as `(week_index, weekday_index, day)`, in day order
    pub fn days(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.weeks.iter().enumerate().flat_map(|(week_idx, week)| {
            week.iter()
                .enumerate()
                .filter_map(move |(col, slot)| slot.map(|day| (week_idx, col, day)))
        })
    }

    /// `(week_index, weekday_index)` holding `day`
    pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
        self.days()
            .find(|&(_, _, d)| d == day)
            .map(|(week, col, _)| (week, col))
    }
}

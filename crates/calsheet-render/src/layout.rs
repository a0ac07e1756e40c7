//! Month block geometry and placement
//!
//! Rows and columns are zero-based: row 0 is spreadsheet row 1, column 0 is
//! column A. A month block starting at row `s` with `W` weeks occupies:
//!
//! ```text
//! s .. s+1      month header      (A:G merged)   side label s .. s+9 (H:I merged)
//! s+2           weekday headers   (A..G)
//! s+3 .. s+2+W  week rows         (A..G)
//! s+3+W         blank
//! s+4+W         NOTES             (A:G merged)
//! ```
//!
//! In stacked mode the next block starts two rows below the NOTES row.

use calsheet_core::{CalendarError, CalendarMatrix};

/// Rows taken by the merged month header
pub const HEADER_ROWS: u32 = 2;
/// Rows left between stacked month blocks
pub const STACK_GAP: u32 = 2;
/// Height of the rotated month label
pub const SIDE_LABEL_ROWS: u32 = 10;
/// Columns A..G hold the weekday grid
pub const GRID_COLUMNS: u16 = 7;
/// Side label spans columns H..I
pub const SIDE_LABEL_COLUMNS: (u16, u16) = (7, 8);

/// Where month blocks are placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// One sheet per month, each block at the top
    #[default]
    PerMonthSheets,
    /// One sheet, blocks stacked in month order
    SingleStackedSheet,
}

impl LayoutMode {
    /// Start row of the next block given the span of the previous one on the same sheet
    pub fn start_row(self, previous: Option<RowSpan>) -> u32 {
        match (self, previous) {
            (Self::SingleStackedSheet, Some(span)) => span.last + STACK_GAP,
            _ => 0,
        }
    }
}

/// Inclusive range of rows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpan {
    pub first: u32,
    pub last: u32,
}

/// Row positions of one month block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthBlock {
    pub start_row: u32,
    pub weeks: u32,
}

impl MonthBlock {
    pub fn new(start_row: u32, weeks: usize) -> Self {
        Self {
            start_row,
            weeks: weeks as u32,
        }
    }

    /// First and last row of the merged month header
    pub fn header_rows(&self) -> (u32, u32) {
        (self.start_row, self.start_row + HEADER_ROWS - 1)
    }

    pub fn weekday_row(&self) -> u32 {
        self.start_row + HEADER_ROWS
    }

    /// Row of week `index` (0-based)
    pub fn week_row(&self, index: usize) -> u32 {
        self.weekday_row() + 1 + index as u32
    }

    /// NOTES sits two rows below the last week row
    pub fn notes_row(&self) -> u32 {
        self.weekday_row() + self.weeks + 2
    }

    pub fn side_label_rows(&self) -> (u32, u32) {
        (self.start_row, self.start_row + SIDE_LABEL_ROWS - 1)
    }

    /// Header, weekday header, weeks and notes rows
    pub fn rows_consumed(&self) -> u32 {
        HEADER_ROWS + 1 + self.weeks + 1
    }

    /// Rows from the header through the NOTES row
    pub fn span(&self) -> RowSpan {
        RowSpan {
            first: self.start_row,
            last: self.notes_row(),
        }
    }
}

/// Place the twelve months of `year` under `mode`
pub fn plan_year(mode: LayoutMode, year: i32) -> Result<Vec<MonthBlock>, CalendarError> {
    let mut blocks = Vec::with_capacity(12);
    let mut previous = None;
    for month in 1..=12 {
        let matrix = CalendarMatrix::build(year, month)?;
        let block = MonthBlock::new(mode.start_row(previous), matrix.week_count());
        previous = Some(block.span());
        blocks.push(block);
    }
    Ok(blocks)
}

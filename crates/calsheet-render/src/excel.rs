//! Excel calendar workbook renderer
//!
//! Generates XLSX files with one styled block per month:
//! - Month header merged over A:G, weekday headers on a light-blue band
//! - Day numbers in their weekday column, event days highlighted in orange
//!   with one label per line under the number
//! - A rotated three-letter month label merged over H:I
//! - A NOTES row under the grid
//!
//! ## Layout Modes
//!
//! - **Per-month sheets**: twelve sheets "January".."December", each block at
//!   the top of its sheet
//! - **Single stacked sheet**: one sheet "Calendar <year>", blocks stacked in
//!   month order with a two-row gap
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: January
//! |            JANUARY            | J |
//! | SUNDAY | MONDAY | ... | SATURDAY  | A |
//! |        |        |  1 Revelion ... | N |
//! | 5      | 6      | ...             |   |
//! ...
//! | NOTES                           |
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use calsheet_core::{
    cell_text, month_abbrev, month_name, validate_year, CalendarMatrix, EventTable, MonthEvents,
    RenderError, YearRenderer, WEEKDAY_HEADERS,
};
use chrono::{DateTime, Local, TimeZone};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::{debug, info, warn};

use crate::layout::{LayoutMode, MonthBlock, RowSpan, GRID_COLUMNS, SIDE_LABEL_COLUMNS};

/// Colors, widths and font sizes of the calendar
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarStyle {
    /// Sheet tab color
    pub tab_color: u32,
    /// Fill of the weekday header row
    pub weekday_fill: u32,
    /// Fill of days carrying events
    pub event_fill: u32,
    /// Width of the seven grid columns
    pub column_width: f64,
    pub header_font_size: f64,
    pub side_label_font_size: f64,
}

impl Default for CalendarStyle {
    fn default() -> Self {
        Self {
            tab_color: 0x87CEEB,    // Sky blue
            weekday_fill: 0xE6F2FF, // Light blue
            event_fill: 0xFFA500,   // Orange
            column_width: 20.0,
            header_font_size: 16.0,
            side_label_font_size: 48.0,
        }
    }
}

/// Reusable cell formats
#[derive(Clone, Debug)]
struct CalendarFormats {
    header: Format,
    weekday: Format,
    day: Format,
    event_day: Format,
    side_label: Format,
    notes: Format,
}

impl CalendarFormats {
    fn new(style: &CalendarStyle) -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_size(style.header_font_size)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let weekday = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(style.weekday_fill)
            .set_border(FormatBorder::Thin);

        let day = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::Top)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let event_day = day.clone().set_background_color(style.event_fill);

        let side_label = Format::new()
            .set_bold()
            .set_font_size(style.side_label_font_size)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_rotation(90);

        let notes = Format::new().set_bold();

        Self {
            header,
            weekday,
            day,
            event_day,
            side_label,
            notes,
        }
    }
}

fn format_err(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

// ============================================================================
// Sheet Renderer
// ============================================================================

/// Writes month blocks into a worksheet
#[derive(Clone, Debug)]
pub struct SheetRenderer {
    formats: CalendarFormats,
    column_width: f64,
}

impl SheetRenderer {
    pub fn new(style: &CalendarStyle) -> Self {
        Self {
            formats: CalendarFormats::new(style),
            column_width: style.column_width,
        }
    }

    /// Set the grid column widths; safe to call repeatedly
    pub fn prepare_sheet(&self, sheet: &mut Worksheet) -> Result<(), RenderError> {
        for col in 0..GRID_COLUMNS {
            sheet
                .set_column_width(col, self.column_width)
                .map_err(format_err)?;
        }
        Ok(())
    }

    /// Write one month block starting at `start_row` and return the rows it occupies
    pub fn render_month(
        &self,
        sheet: &mut Worksheet,
        start_row: u32,
        matrix: &CalendarMatrix,
        events: MonthEvents<'_>,
    ) -> Result<RowSpan, RenderError> {
        let block = MonthBlock::new(start_row, matrix.week_count());
        let month = matrix.month();
        let last_col = GRID_COLUMNS - 1;

        // Month header
        let (header_first, header_last) = block.header_rows();
        sheet
            .merge_range(
                header_first,
                0,
                header_last,
                last_col,
                &matrix.month_name().to_uppercase(),
                &self.formats.header,
            )
            .map_err(format_err)?;

        // Weekday headers
        for (col, name) in WEEKDAY_HEADERS.iter().enumerate() {
            sheet
                .write_string_with_format(block.weekday_row(), col as u16, *name, &self.formats.weekday)
                .map_err(format_err)?;
        }

        // Days
        let mut annotated = 0;
        for (week, col, day) in matrix.days() {
            let row = block.week_row(week);
            let labels = events.labels(day);
            if labels.is_empty() {
                sheet
                    .write_number_with_format(row, col as u16, day, &self.formats.day)
                    .map_err(format_err)?;
            } else {
                annotated += 1;
                sheet
                    .write_string_with_format(
                        row,
                        col as u16,
                        cell_text(day, labels),
                        &self.formats.event_day,
                    )
                    .map_err(format_err)?;
            }
        }

        // Rotated month label
        let (side_first, side_last) = block.side_label_rows();
        sheet
            .merge_range(
                side_first,
                SIDE_LABEL_COLUMNS.0,
                side_last,
                SIDE_LABEL_COLUMNS.1,
                &month_abbrev(month)?,
                &self.formats.side_label,
            )
            .map_err(format_err)?;

        // Notes
        let notes_row = block.notes_row();
        sheet
            .merge_range(notes_row, 0, notes_row, last_col, "NOTES", &self.formats.notes)
            .map_err(format_err)?;

        debug!(
            month,
            start_row,
            weeks = matrix.week_count(),
            events = annotated,
            "rendered month block"
        );

        Ok(block.span())
    }
}

// ============================================================================
// Workbook Renderer
// ============================================================================

/// Excel calendar workbook renderer
#[derive(Clone, Debug, Default)]
pub struct ExcelRenderer {
    /// Placement of month blocks
    pub mode: LayoutMode,
    /// Colors and sizes
    pub style: CalendarStyle,
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout mode
    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Stack all months in one sheet
    pub fn stacked(self) -> Self {
        self.mode(LayoutMode::SingleStackedSheet)
    }

    /// Replace the calendar style
    pub fn style(mut self, style: CalendarStyle) -> Self {
        self.style = style;
        self
    }

    /// Build the in-memory workbook for `year`
    pub fn build_workbook(&self, year: i32, events: &EventTable) -> Result<Workbook, RenderError> {
        validate_year(year)?;

        let mut workbook = Workbook::new();
        let renderer = SheetRenderer::new(&self.style);

        match self.mode {
            LayoutMode::PerMonthSheets => {
                for month in 1..=12 {
                    let matrix = CalendarMatrix::build(year, month)?;
                    let sheet = self.add_sheet(&mut workbook, month_name(month)?)?;
                    renderer.prepare_sheet(sheet)?;
                    renderer.render_month(
                        sheet,
                        self.mode.start_row(None),
                        &matrix,
                        events.for_month(month),
                    )?;
                }
            }
            LayoutMode::SingleStackedSheet => {
                let sheet = self.add_sheet(&mut workbook, &format!("Calendar {year}"))?;
                renderer.prepare_sheet(sheet)?;
                let mut previous = None;
                for month in 1..=12 {
                    let matrix = CalendarMatrix::build(year, month)?;
                    let span = renderer.render_month(
                        sheet,
                        self.mode.start_row(previous),
                        &matrix,
                        events.for_month(month),
                    )?;
                    previous = Some(span);
                }
            }
        }

        Ok(workbook)
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, year: i32, events: &EventTable) -> Result<Vec<u8>, RenderError> {
        let mut workbook = self.build_workbook(year, events)?;
        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    fn add_sheet<'a>(
        &self,
        workbook: &'a mut Workbook,
        name: &str,
    ) -> Result<&'a mut Worksheet, RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).map_err(format_err)?;
        sheet.set_tab_color(self.style.tab_color);
        Ok(sheet)
    }
}

impl YearRenderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, year: i32, events: &EventTable) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(year, events)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Builds a year's calendar and writes it to disk
#[derive(Clone, Debug)]
pub struct CalendarGenerator {
    year: i32,
    events: EventTable,
    renderer: ExcelRenderer,
}

impl CalendarGenerator {
    /// Generator for `year` with the built-in events and default layout
    pub fn new(year: i32) -> Self {
        Self {
            year,
            events: EventTable::builtin(),
            renderer: ExcelRenderer::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Set the layout mode
    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.renderer = self.renderer.mode(mode);
        self
    }

    /// Replace the event table
    pub fn events(mut self, events: EventTable) -> Self {
        self.events = events;
        self
    }

    /// Replace the calendar style
    pub fn style(mut self, style: CalendarStyle) -> Self {
        self.renderer = self.renderer.style(style);
        self
    }

    /// Generate the workbook bytes without touching the filesystem
    pub fn render_to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        self.renderer.render(self.year, &self.events)
    }

    /// Write the calendar to `output`, or to a timestamped file in the
    /// current directory. An existing file at the path is replaced.
    pub fn generate(&self, output: Option<&Path>) -> Result<PathBuf, RenderError> {
        validate_year(self.year)?;

        let path = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(self.year, &Local::now()),
        };
        info!(year = self.year, mode = ?self.renderer.mode, path = %path.display(), "generating calendar");

        if path.is_file() {
            warn!(path = %path.display(), "replacing existing file");
            fs::remove_file(&path).map_err(|e| classify_io_error(&path, &e))?;
        }

        let bytes = self.render_to_bytes()?;
        fs::write(&path, &bytes).map_err(|e| classify_io_error(&path, &e))?;

        info!(path = %path.display(), bytes = bytes.len(), "calendar saved");
        Ok(path)
    }
}

/// `calendar_<year>_<YYYYMMDD_HHMMSS>.xlsx`
pub fn default_output_path<Tz: TimeZone>(year: i32, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    PathBuf::from(format!("calendar_{year}_{}.xlsx", now.format("%Y%m%d_%H%M%S")))
}

/// Map a filesystem error on `path` to a busy file or a plain save failure
fn classify_io_error(path: &Path, err: &io::Error) -> RenderError {
    if is_lock_error(err) && path.exists() {
        RenderError::ResourceBusy(path.to_path_buf())
    } else {
        RenderError::Persistence {
            path: path.to_path_buf(),
            detail: err.to_string(),
        }
    }
}

fn is_lock_error(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    err.kind() == io::ErrorKind::PermissionDenied
        || (cfg!(windows) && matches!(err.raw_os_error(), Some(32 | 33)))
}

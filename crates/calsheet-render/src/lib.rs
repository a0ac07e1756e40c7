//! # calsheet-render
//!
//! Rendering backends for calsheet calendars.
//!
//! This crate provides:
//! - Excel workbooks, one sheet per month or all months stacked in one sheet
//! - Plain-text month previews
//! - Month block geometry shared by the layouts
//!
//! ## Example
//!
//! ```rust,ignore
//! use calsheet_core::{EventTable, YearRenderer};
//! use calsheet_render::{CalendarGenerator, LayoutMode, TextRenderer};
//!
//! // Write calendar_2025_<timestamp>.xlsx in the current directory
//! let path = CalendarGenerator::new(2025).generate(None)?;
//!
//! // Everything on one sheet, at a fixed path
//! CalendarGenerator::new(2025)
//!     .mode(LayoutMode::SingleStackedSheet)
//!     .generate(Some("calendar.xlsx".as_ref()))?;
//!
//! // Text preview
//! let text = TextRenderer::new().render(2025, &EventTable::builtin())?;
//! ```

pub mod excel;
pub mod layout;
pub mod text;

pub use excel::{
    default_output_path, CalendarGenerator, CalendarStyle, ExcelRenderer, SheetRenderer,
};
pub use layout::{plan_year, LayoutMode, MonthBlock, RowSpan};
pub use text::TextRenderer;

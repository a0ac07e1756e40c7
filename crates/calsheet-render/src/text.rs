//! Plain-text calendar preview
//!
//! Renders months the way `cal` does, marking annotated days with `*` and
//! listing their labels under the grid:
//!
//! ```text
//!         JANUARY 2025
//!  Su  Mo  Tu  We  Th  Fr  Sa
//!               1*  2   3   4
//! ...
//!   1: Revelion, An nou
//!  24: Unirea Principatelor Române
//! ```

use std::fmt::Write;

use calsheet_core::{
    validate_year, CalendarMatrix, EventTable, MonthEvents, RenderError, YearRenderer,
    WEEKDAY_HEADERS,
};

const CELL_WIDTH: usize = 4;

/// Text preview renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// List event labels under each month
    pub show_events: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { show_events: true }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the label listing; event days keep their marker
    pub fn no_events(mut self) -> Self {
        self.show_events = false;
        self
    }

    /// Render a single month
    pub fn render_month(&self, matrix: &CalendarMatrix, events: MonthEvents<'_>) -> String {
        let mut out = String::new();
        let width = CELL_WIDTH * WEEKDAY_HEADERS.len();
        let title = format!("{} {}", matrix.month_name().to_uppercase(), matrix.year());
        let _ = writeln!(out, "{:^width$}", title);

        let header: String = WEEKDAY_HEADERS
            .iter()
            .map(|name| format!("{:>3} ", title_case(&name[..2])))
            .collect();
        let _ = writeln!(out, "{}", header.trim_end());

        for week in matrix.weeks() {
            let line: String = week
                .iter()
                .map(|slot| match slot {
                    Some(day) => {
                        let marker = if events.labels(*day).is_empty() { ' ' } else { '*' };
                        format!("{day:>3}{marker}")
                    }
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect();
            let _ = writeln!(out, "{}", line.trim_end());
        }

        if self.show_events {
            for (day, labels) in events.days() {
                if matrix.position_of(day).is_some() {
                    let _ = writeln!(out, "{day:>3}: {}", labels.join(", "));
                }
            }
        }

        out
    }
}

impl YearRenderer for TextRenderer {
    type Output = String;

    fn render(&self, year: i32, events: &EventTable) -> Result<String, RenderError> {
        validate_year(year)?;
        let mut months = Vec::with_capacity(12);
        for month in 1..=12 {
            let matrix = CalendarMatrix::build(year, month)?;
            months.push(self.render_month(&matrix, events.for_month(month)));
        }
        Ok(months.join("\n"))
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

//! Fixed day annotations
//!
//! Events are opaque `(month, day) -> labels` fixtures. Labels keep their
//! authoring order and are shown under the day number in the day's cell.

use std::collections::HashMap;

/// Built-in annotations as `(month, day, labels)`
const BUILTIN_EVENTS: &[(u32, u32, &[&str])] = &[
    (1, 1, &["Revelion", "An nou"]),
    (1, 24, &["Unirea Principatelor Române"]),
    (2, 14, &["Ziua Îndrăgostiților"]),
    (3, 8, &["Ziua Internațională a Femeii"]),
    (3, 15, &["Ziua Constituției României"]),
    (4, 15, &["Paște"]),
    (5, 1, &["Ziua Muncii"]),
    (5, 9, &["Ziua Europei"]),
    (6, 1, &["Ziua Copilului"]),
    (6, 24, &["Revelație de vară"]),
    (7, 15, &["Zilele culturale de vară"]),
    (8, 15, &["Adormirea Maicii Domnului"]),
    (9, 15, &["Început de toamnă"]),
    (9, 22, &["Echnocțiul de toamnă"]),
    (10, 1, &["Multe story-uri", "Calea Victoriei"]),
    (10, 5, &["Seara reel", "Calea Victoriei"]),
    (10, 7, &["MAP OF THE UNIVERSE"]),
    (10, 8, &["Real/Tiktok", "telefoane"]),
    (10, 11, &["Reel/tiktok", "pancarta", "Program orașe"]),
    (10, 14, &["STORY STAND"]),
    (10, 15, &["STORY STAND"]),
    (10, 17, &["Teaser la", "Teaser artist", "filmat pe 16"]),
    (10, 21, &["STORY STAND", "+Reel artist", "+postare (19/20)"]),
    (10, 24, &["Story add yours", "editii trecute"]),
    (10, 26, &["Real/Tiktok", "Smiley"]),
    (10, 28, &["postare DJ Thomas", "Teaser", "Suna telefonul", "Filmat pe 28"]),
    (10, 30, &["Giveaway", "tatua"]),
    (10, 31, &["Postare", "Ce activitate ești?"]),
    (11, 1, &["Început de iarnă"]),
    (11, 15, &["Ziua Recoltei"]),
    (12, 1, &["Marea Unire"]),
    (12, 25, &["Crăciun"]),
    (12, 31, &["Revelion"]),
];

/// Read-only lookup of labels by `(month, day)`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventTable {
    entries: HashMap<(u32, u32), Vec<String>>,
}

impl EventTable {
    /// The annotation table shipped with calsheet
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_EVENTS.iter().copied())
    }

    /// Build a table from `(month, day, labels)` literals.
    ///
    /// Entries without labels are skipped; repeated keys append their labels.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (u32, u32, &'a [&'a str])>) -> Self {
        let mut table: HashMap<(u32, u32), Vec<String>> = HashMap::new();
        for (month, day, labels) in entries {
            if labels.is_empty() {
                continue;
            }
            table
                .entry((month, day))
                .or_default()
                .extend(labels.iter().map(|l| (*l).to_string()));
        }
        Self { entries: table }
    }

    /// Labels for a day, empty when the day has no events
    pub fn lookup(&self, month: u32, day: u32) -> &[String] {
        self.entries
            .get(&(month, day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// View of one month's events
    pub fn for_month(&self, month: u32) -> MonthEvents<'_> {
        MonthEvents { table: self, month }
    }

    /// Number of annotated days
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Events of a single month
#[derive(Clone, Copy, Debug)]
pub struct MonthEvents<'a> {
    table: &'a EventTable,
    month: u32,
}

impl<'a> MonthEvents<'a> {
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn labels(&self, day: u32) -> &'a [String] {
        self.table.lookup(self.month, day)
    }

    /// Annotated days of the month, sorted by day
    pub fn days(&self) -> Vec<(u32, &'a [String])> {
        let mut days: Vec<(u32, &'a [String])> = self
            .table
            .entries
            .iter()
            .filter(|((month, _), _)| *month == self.month)
            .map(|((_, day), labels)| (*day, labels.as_slice()))
            .collect();
        days.sort_by_key(|(day, _)| *day);
        days
    }
}

/// Cell content for a day: the number, then one label per line
pub fn cell_text(day: u32, labels: &[String]) -> String {
    if labels.is_empty() {
        day.to_string()
    } else {
        format!("{day}\n{}", labels.join("\n"))
    }
}

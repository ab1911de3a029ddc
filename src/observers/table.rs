//! Table observer for pretty-printing counters.
//!
//! This module provides [`TableObserver`], which renders the entries of a
//! [`KeyedCounter`] as a formatted ASCII table using the `tabled` crate.
//! Entries are listed by descending count.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! contachiavi = { version = "0.1", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ## Standard format (vertical list)
//!
//! ```rust,ignore
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::observers::table::{TableObserver, TableStyle};
//!
//! let mut words: KeyedCounter<&str> = KeyedCounter::new();
//! words.add_by("the", 1000)?;
//! words.add_by("cat", 5)?;
//!
//! let observer = TableObserver::new().with_style(TableStyle::Rounded);
//! println!("{}", observer.render(&words));
//! // ╭─────┬───────╮
//! // │ Key │ Count │
//! // ├─────┼───────┤
//! // │ the │ 1000  │
//! // │ cat │ 5     │
//! // ╰─────┴───────╯
//! ```
//!
//! ## Compact format (multiple columns)
//!
//! ```rust,ignore
//! let observer = TableObserver::new().compact(true).columns(3);
//! println!("{}", observer.render(&words));
//! // ╭───────────┬────────┬────────╮
//! // │ the: 1000 │ cat: 5 │ sat: 2 │
//! // ╰───────────┴────────┴────────╯
//! ```

use std::fmt::Display;

use tabled::{builder::Builder, settings::Style, Table, Tabled};

use crate::counters::{Count, KeyedCounter};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// Dots for borders
    Dots,
    /// No borders, just spacing
    Blank,
}

/// Separator style between key and count in compact mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompactSeparator {
    /// Colon separator: "key: count"
    #[default]
    Colon,
    /// Equals separator: "key = count"
    Equals,
    /// Arrow separator: "key → count"
    Arrow,
}

impl CompactSeparator {
    /// Returns the separator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompactSeparator::Colon => ": ",
            CompactSeparator::Equals => " = ",
            CompactSeparator::Arrow => " → ",
        }
    }
}

/// Configuration for the table observer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row (only in non-compact mode).
    pub show_header: bool,
    /// Custom title for the table. Falls back to the counter name when unset.
    pub title: Option<String>,
    /// Maximum number of entries to render, highest counts first.
    pub limit: Option<usize>,
    /// Whether to use compact format (key: count in cells).
    pub compact: bool,
    /// Number of columns in compact mode (default: 1).
    pub columns: usize,
    /// Separator between key and count in compact mode.
    pub separator: CompactSeparator,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            title: None,
            limit: None,
            compact: false,
            columns: 1,
            separator: CompactSeparator::default(),
        }
    }
}

/// Internal row representation for tabled (standard mode).
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Count")]
    count: String,
}

/// An observer that renders the entries of a counter as a table.
///
/// Supports two rendering modes:
///
/// 1. **Standard mode**: two-column table with Key and Count headers
/// 2. **Compact mode**: multi-column grid with "key: count" cells
#[derive(Debug, Clone, Default)]
pub struct TableObserver {
    config: TableConfig,
}

impl TableObserver {
    /// Creates a new table observer with default settings.
    ///
    /// Default style is [`TableStyle::Rounded`] in standard (non-compact) mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table observer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header row.
    ///
    /// Only applies in standard (non-compact) mode.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets a title printed above the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Renders at most `n` entries, highest counts first.
    pub fn limit(mut self, n: usize) -> Self {
        self.config.limit = Some(n);
        self
    }

    /// Enables or disables compact mode.
    pub fn compact(mut self, enabled: bool) -> Self {
        self.config.compact = enabled;
        self
    }

    /// Sets the number of columns in compact mode.
    ///
    /// Values less than 1 are treated as 1.
    pub fn columns(mut self, count: usize) -> Self {
        self.config.columns = count.max(1);
        self
    }

    /// Sets the separator between key and count in compact mode.
    pub fn separator(mut self, sep: CompactSeparator) -> Self {
        self.config.separator = sep;
        self
    }

    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => table.with(Style::ascii()),
            TableStyle::Rounded => table.with(Style::rounded()),
            TableStyle::Sharp => table.with(Style::sharp()),
            TableStyle::Modern => table.with(Style::modern()),
            TableStyle::Markdown => table.with(Style::markdown()),
            TableStyle::Dots => table.with(Style::dots()),
            TableStyle::Blank => table.with(Style::blank()),
        };
    }

    fn with_title_line(&self, name: &str, table: Table) -> String {
        match (&self.config.title, name.is_empty()) {
            (Some(title), _) => format!("{}\n{}", title, table),
            (None, false) => format!("{}\n{}", name, table),
            (None, true) => table.to_string(),
        }
    }

    /// Returns the entries to render as `(key, count)` strings.
    fn entries<K: Display, C: Count, E, S>(
        &self,
        counter: &KeyedCounter<K, C, E, S>,
    ) -> Vec<(String, String)> {
        let n = self.config.limit.unwrap_or(usize::MAX);
        counter
            .most_common(n)
            .into_iter()
            .map(|(key, count)| (key.to_string(), count.to_string()))
            .collect()
    }

    fn render_compact(&self, name: &str, entries: Vec<(String, String)>) -> String {
        if entries.is_empty() {
            return String::new();
        }

        let sep = self.config.separator.as_str();
        let cells: Vec<String> = entries
            .into_iter()
            .map(|(key, count)| format!("{key}{sep}{count}"))
            .collect();

        let cols = self.config.columns;
        let mut builder = Builder::default();
        for chunk in cells.chunks(cols) {
            let mut row: Vec<String> = chunk.to_vec();
            // Pad the last row with empty cells
            row.resize(cols, String::new());
            builder.push_record(row);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);
        self.with_title_line(name, table)
    }

    fn render_standard(&self, name: &str, entries: Vec<(String, String)>) -> String {
        let rows: Vec<EntryRow> = entries
            .into_iter()
            .map(|(key, count)| EntryRow { key, count })
            .collect();

        let mut table = Table::new(&rows);
        self.apply_style(&mut table);

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }

        self.with_title_line(name, table)
    }

    /// Renders the entries of `counter` as a table string.
    ///
    /// The counter name, when set, is used as the title unless an explicit
    /// title was configured.
    pub fn render<K: Display, C: Count, E, S>(&self, counter: &KeyedCounter<K, C, E, S>) -> String {
        let entries = self.entries(counter);
        if self.config.compact {
            self.render_compact(counter.name(), entries)
        } else {
            self.render_standard(counter.name(), entries)
        }
    }
}

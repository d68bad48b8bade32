//! In-memory tabular view: single-key sorting, per-column filters and
//! fixed-size pagination over a borrowed slice of rows.
//!
//! The view never reorders or mutates the underlying rows; every visible row
//! is reported together with its index in the source slice.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse `asc` / `desc`
    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// The single active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// How a column filter value is matched against the cell text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Case-insensitive substring
    Contains,
    /// Exact equality
    Equals,
}

#[derive(Debug, Clone)]
struct ColumnFilter<C> {
    column: C,
    mode: FilterMode,
    /// Lowercased already for `Contains`
    value: String,
}

impl<C> ColumnFilter<C> {
    fn matches(&self, cell: &str) -> bool {
        match self.mode {
            FilterMode::Contains => cell.to_lowercase().contains(&self.value),
            FilterMode::Equals => cell == self.value,
        }
    }
}

/// A row type the table can display
pub trait Row {
    type Column: Copy + Eq + std::fmt::Debug;

    /// Text of a cell, used for filtering and default ordering
    fn cell_text(&self, column: Self::Column) -> Cow<'_, str>;

    /// Ordering of two rows on a column, ascending
    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering {
        compare_alphanumeric(&self.cell_text(column), &other.cell_text(column))
    }
}

/// One page of visible rows
#[derive(Debug)]
pub struct Page<'a, R> {
    /// Visible rows with their index in the source slice
    pub rows: Vec<(usize, &'a R)>,
    /// Zero-based page index
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Rows left after filtering, across all pages
    pub total_rows: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

/// Sorted, filtered and paginated view over `rows`
pub struct Table<'a, R: Row> {
    rows: &'a [R],
    sort: Option<SortKey<R::Column>>,
    filters: Vec<ColumnFilter<R::Column>>,
    page_size: usize,
    page_index: usize,
}

impl<'a, R: Row> Table<'a, R> {
    pub fn new(rows: &'a [R], page_size: usize) -> Self {
        Self {
            rows,
            sort: None,
            filters: Vec::new(),
            page_size: page_size.max(1),
            page_index: 0,
        }
    }

    pub fn sort(&self) -> Option<SortKey<R::Column>> {
        self.sort
    }

    /// Click on a column's sort control.
    ///
    /// An ascending sort on `column` becomes descending; anything else
    /// becomes an ascending sort on `column` alone.
    pub fn toggle_sort(&mut self, column: R::Column) {
        let direction = match self.sort {
            Some(SortKey {
                column: active,
                direction: SortDirection::Ascending,
            }) if active == column => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.set_sort(Some(SortKey { column, direction }));
    }

    pub fn set_sort(&mut self, sort: Option<SortKey<R::Column>>) {
        self.sort = sort;
        self.page_index = 0;
    }

    /// Set or replace the filter on a column; an empty value removes it
    pub fn set_filter(&mut self, column: R::Column, mode: FilterMode, value: &str) {
        self.filters.retain(|f| f.column != column);
        if !value.is_empty() {
            let value = match mode {
                FilterMode::Contains => value.to_lowercase(),
                FilterMode::Equals => value.to_string(),
            };
            self.filters.push(ColumnFilter {
                column,
                mode,
                value,
            });
        }
        self.page_index = 0;
    }

    pub fn clear_filter(&mut self, column: R::Column) {
        self.set_filter(column, FilterMode::Contains, "");
    }

    /// All rows passing every filter, in sort order
    pub fn visible_rows(&self) -> Vec<(usize, &'a R)> {
        let mut visible: Vec<(usize, &'a R)> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                self.filters
                    .iter()
                    .all(|f| f.matches(&row.cell_text(f.column)))
            })
            .collect();

        if let Some(SortKey { column, direction }) = self.sort {
            // stable: ties keep source order
            visible.sort_by(|(_, a), (_, b)| {
                let ord = a.compare_by(b, column);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        visible
    }

    pub fn page_count(&self) -> usize {
        self.visible_rows().len().div_ceil(self.page_size)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Jump to a page, clamped to the existing pages
    pub fn go_to_page(&mut self, page_index: usize) {
        let last = self.page_count().saturating_sub(1);
        self.page_index = page_index.min(last);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page_index + 1);
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn page(&self) -> Page<'a, R> {
        let visible = self.visible_rows();
        let total_rows = visible.len();
        let page_count = total_rows.div_ceil(self.page_size);
        let rows: Vec<_> = visible
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect();

        Page {
            rows,
            page_index: self.page_index,
            page_size: self.page_size,
            page_count,
            total_rows,
            can_previous: self.page_index > 0,
            can_next: self.page_index + 1 < page_count,
        }
    }
}

/// Case-insensitive comparison treating runs of digits as numbers
/// (`"item 2" < "item 10"`).
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let mut a_chunks = Chunks::new(&a);
    let mut b_chunks = Chunks::new(&b);

    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_number(x), is_number(y)) {
                    (true, true) => compare_digits(x, y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_number(chunk: &str) -> bool {
    chunk.starts_with(|c: char| c.is_ascii_digit())
}

fn compare_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Alternating runs of ASCII digits and non-digits
struct Chunks<'s> {
    rest: &'s str,
}

impl<'s> Chunks<'s> {
    fn new(s: &'s str) -> Self {
        Self { rest: s }
    }
}

impl<'s> Iterator for Chunks<'s> {
    type Item = &'s str;

    fn next(&mut self) -> Option<&'s str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

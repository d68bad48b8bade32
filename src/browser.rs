//! Publication browser
//!
//! Holds the normalized publications of one load and answers table
//! queries over them (sort, filter, paginate) without ever re-fetching or
//! mutating the loaded sequence. A browser instance loads at most once:
//! `Loading` moves to either `Loaded` or `Error`, both terminal.
//!
//! The HTTP handlers drive the table side. The copy action
//! ([`Clipboard`], [`copy_bibtex`]) is library API for clients embedding
//! the crate, which own the actual clipboard.

use async_trait::async_trait;
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    citation::{cite, Citation},
    error::{AppError, AppResult, UPSTREAM_FAILURE_MESSAGE},
    models::publication::{DocType, PublicationRecord},
    services::publications::PublicationsService,
    table::{FilterMode, Row, SortKey, Table},
};

/// Shown after a successful copy
pub const COPY_SUCCESS_MESSAGE: &str = "BibTeX copied to clipboard!";

/// Shown after a failed copy; the user may simply retry
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy BibTeX.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationColumn {
    Year,
    Title,
    /// Conference or journal title
    Venue,
    Authors,
    Type,
}

impl PublicationColumn {
    /// Columns that can be sorted on, by their sort id
    pub fn from_sort_id(id: &str) -> Option<Self> {
        match id {
            "year" => Some(PublicationColumn::Year),
            "title" => Some(PublicationColumn::Title),
            "conference_or_journal" => Some(PublicationColumn::Venue),
            _ => None,
        }
    }
}

impl Row for PublicationRecord {
    type Column = PublicationColumn;

    fn cell_text(&self, column: PublicationColumn) -> Cow<'_, str> {
        match column {
            PublicationColumn::Year => Cow::Owned(self.year.to_string()),
            PublicationColumn::Title => Cow::Borrowed(&self.title),
            PublicationColumn::Venue => Cow::Borrowed(self.venue()),
            PublicationColumn::Authors => Cow::Owned(self.authors_text()),
            PublicationColumn::Type => Cow::Borrowed(self.doc_type.label()),
        }
    }

    fn compare_by(&self, other: &Self, column: PublicationColumn) -> Ordering {
        match column {
            PublicationColumn::Year => self.year.cmp(&other.year),
            _ => crate::table::compare_alphanumeric(
                &self.cell_text(column),
                &other.cell_text(column),
            ),
        }
    }
}

/// Load state of a browser instance
#[derive(Debug)]
pub enum BrowserState {
    Loading,
    Loaded(Vec<PublicationRecord>),
    /// User-visible failure message
    Error(String),
}

/// Author name with emphasis when it is the homepage owner
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthorBadge {
    pub name: String,
    pub is_owner: bool,
}

/// One table row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicationRow {
    /// Position in the loaded sequence, used to request the citation
    pub index: usize,
    pub title: String,
    pub year: u32,
    pub doc_type: DocType,
    pub url: String,
    /// Conference or journal, `N/A` when unknown
    pub venue: String,
    pub authors: Vec<AuthorBadge>,
}

/// Count cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TypeCounts {
    pub total: usize,
    pub journals: usize,
    pub conferences: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct YearGroup {
    pub year: u32,
    pub publications: Vec<PublicationRow>,
}

/// One page of the publications table
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicationPage {
    pub items: Vec<PublicationRow>,
    /// Rows matching the filters, across all pages
    pub total: usize,
    /// One-based page number
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub counts: TypeCounts,
}

/// Table settings for one browse request
#[derive(Debug, Clone, Default)]
pub struct BrowseOptions {
    pub sort: Option<SortKey<PublicationColumn>>,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub doc_type: Option<DocType>,
    /// Zero-based, clamped to the last page
    pub page_index: usize,
    pub page_size: usize,
}

pub struct PublicationBrowser {
    state: BrowserState,
    owner: String,
}

impl PublicationBrowser {
    /// `owner` is the author name emphasized in author badges
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            state: BrowserState::Loading,
            owner: owner.into(),
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Fetch once; later calls are no-ops
    pub async fn load(&mut self, service: &PublicationsService) {
        if matches!(self.state, BrowserState::Loading) {
            let result = service.load_records().await;
            self.resolve(result);
        }
    }

    /// Settle the load; returns false when already settled
    pub fn resolve(&mut self, result: AppResult<Vec<PublicationRecord>>) -> bool {
        if !matches!(self.state, BrowserState::Loading) {
            tracing::debug!("Ignoring publications result, browser already settled");
            return false;
        }

        self.state = match result {
            Ok(records) => BrowserState::Loaded(records),
            Err(e) => {
                tracing::warn!("Publications load failed: {}", e);
                BrowserState::Error(UPSTREAM_FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    pub fn records(&self) -> AppResult<&[PublicationRecord]> {
        match &self.state {
            BrowserState::Loaded(records) => Ok(records),
            BrowserState::Error(message) => Err(AppError::Upstream(message.clone())),
            BrowserState::Loading => Err(AppError::Internal(
                "Publications are still loading".to_string(),
            )),
        }
    }

    /// Table over the loaded records
    pub fn table(&self, page_size: usize) -> AppResult<Table<'_, PublicationRecord>> {
        Ok(Table::new(self.records()?, page_size))
    }

    pub fn counts(&self) -> AppResult<TypeCounts> {
        let records = self.records()?;
        let count = |t: DocType| records.iter().filter(|r| r.doc_type == t).count();

        Ok(TypeCounts {
            total: records.len(),
            journals: count(DocType::Journal),
            conferences: count(DocType::Conference),
        })
    }

    /// Citation dialog content for the record at `index`
    pub fn citation(&self, index: usize) -> AppResult<Citation> {
        self.records()?
            .get(index)
            .map(cite)
            .ok_or_else(|| AppError::NotFound(format!("No publication at index {}", index)))
    }

    pub fn row(&self, index: usize, record: &PublicationRecord) -> PublicationRow {
        PublicationRow {
            index,
            title: record.title.clone(),
            year: record.year,
            doc_type: record.doc_type,
            url: record.url.clone(),
            venue: record.venue().to_string(),
            authors: record
                .authors
                .iter()
                .map(|name| AuthorBadge {
                    name: name.clone(),
                    is_owner: *name == self.owner,
                })
                .collect(),
        }
    }

    pub fn browse(&self, options: &BrowseOptions) -> AppResult<PublicationPage> {
        let mut table = self.table(options.page_size)?;

        table.set_sort(options.sort);
        if let Some(title) = &options.title {
            table.set_filter(PublicationColumn::Title, FilterMode::Contains, title);
        }
        if let Some(authors) = &options.authors {
            table.set_filter(PublicationColumn::Authors, FilterMode::Contains, authors);
        }
        if let Some(doc_type) = options.doc_type {
            table.set_filter(PublicationColumn::Type, FilterMode::Equals, doc_type.label());
        }
        table.go_to_page(options.page_index);

        let page = table.page();
        Ok(PublicationPage {
            items: page
                .rows
                .iter()
                .map(|(index, record)| self.row(*index, record))
                .collect(),
            total: page.total_rows,
            page: page.page_index + 1,
            per_page: page.page_size,
            page_count: page.page_count,
            has_previous: page.can_previous,
            has_next: page.can_next,
            counts: self.counts()?,
        })
    }

    /// Records grouped by year, most recent year first, source order within a year
    pub fn by_year(&self) -> AppResult<Vec<YearGroup>> {
        let mut groups: BTreeMap<u32, Vec<PublicationRow>> = BTreeMap::new();
        for (index, record) in self.records()?.iter().enumerate() {
            groups
                .entry(record.year)
                .or_default()
                .push(self.row(index, record));
        }

        Ok(groups
            .into_iter()
            .rev()
            .map(|(year, publications)| YearGroup { year, publications })
            .collect())
    }
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write denied")]
    Denied,
}

/// System clipboard, provided by the embedding client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Result of a copy action, shown once to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    pub copied: bool,
    pub message: &'static str,
}

/// Copy a record's BibTeX (or the placeholder) to the clipboard.
///
/// Never fails: a clipboard error becomes a failure message.
pub async fn copy_bibtex(clipboard: &dyn Clipboard, record: &PublicationRecord) -> CopyOutcome {
    match clipboard.write_text(record.bibtex_or_placeholder()).await {
        Ok(()) => CopyOutcome {
            copied: true,
            message: COPY_SUCCESS_MESSAGE,
        },
        Err(e) => {
            tracing::warn!("BibTeX copy failed: {}", e);
            CopyOutcome {
                copied: false,
                message: COPY_FAILURE_MESSAGE,
            }
        }
    }
}

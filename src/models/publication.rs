//! Publication records and the normalizer for raw HAL search documents.
//!
//! The search service is best effort and unversioned: every field of a raw
//! document is optional and decoded leniently, so a malformed field only
//! degrades that field to its default instead of failing the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{formats::PreferOne, serde_as, DefaultOnError, OneOrMany};
use utoipa::ToSchema;

/// Title used when the document carries none
pub const UNTITLED: &str = "Untitled";

/// URL used when the document carries none
pub const MISSING_URL: &str = "#";

/// Displayed in place of BibTeX when the document carries none
pub const BIBTEX_UNAVAILABLE: &str = "BibTeX not available.";

/// Venue label when neither a journal nor a conference is known
pub const UNKNOWN_VENUE: &str = "N/A";

/// Fields requested from the search service, in request order
pub const REQUESTED_FIELDS: [&str; 9] = [
    "uri_s",
    "authFullName_s",
    "title_s",
    "docType_s",
    "producedDate_s",
    "journalTitle_s",
    "conferenceTitle_s",
    "label_bibtex",
    "citationFull_s",
];

/// Document as returned by the search service.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    /// Either a single title or one title per language
    #[serde(default, rename = "title_s")]
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferOne>>>")]
    pub titles: Option<Vec<String>>,

    #[serde(default, rename = "producedDate_s")]
    #[serde_as(as = "DefaultOnError")]
    pub produced_date: Option<String>,

    #[serde(default, rename = "docType_s")]
    #[serde_as(as = "DefaultOnError")]
    pub doc_type: Option<String>,

    #[serde(default, rename = "uri_s")]
    #[serde_as(as = "DefaultOnError")]
    pub uri: Option<String>,

    #[serde(default, rename = "authFullName_s")]
    #[serde_as(as = "DefaultOnError<Option<OneOrMany<_, PreferOne>>>")]
    pub authors: Option<Vec<String>>,

    #[serde(default, rename = "journalTitle_s")]
    #[serde_as(as = "DefaultOnError")]
    pub journal_title: Option<String>,

    #[serde(default, rename = "conferenceTitle_s")]
    #[serde_as(as = "DefaultOnError")]
    pub conference_title: Option<String>,

    #[serde(default, rename = "label_bibtex")]
    #[serde_as(as = "DefaultOnError")]
    pub bibtex: Option<String>,

    #[serde(default, rename = "citationFull_s")]
    #[serde_as(as = "DefaultOnError")]
    pub citation_full: Option<String>,
}

/// Publication type derived from the HAL document type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DocType {
    Journal,
    Conference,
    Other,
}

impl DocType {
    /// Map a HAL `docType_s` code; anything unknown is `Other`
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ART") => DocType::Journal,
            Some("COMM") => DocType::Conference,
            _ => DocType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocType::Journal => "Journal",
            DocType::Conference => "Conference",
            DocType::Other => "Other",
        }
    }

    /// Parse a display label, as used by the type filter
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Journal" => Some(DocType::Journal),
            "Conference" => Some(DocType::Conference),
            "Other" => Some(DocType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Normalized publication
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PublicationRecord {
    pub title: String,
    /// Publication year, 0 when unknown
    pub year: u32,
    pub doc_type: DocType,
    pub url: String,
    pub authors: Vec<String>,
    pub journal_title: Option<String>,
    pub conference_title: Option<String>,
    pub bibtex: Option<String>,
    pub citation_full_raw: Option<String>,
}

impl PublicationRecord {
    /// Conference title, else journal title, else `N/A`
    pub fn venue(&self) -> &str {
        self.conference_title
            .as_deref()
            .or(self.journal_title.as_deref())
            .unwrap_or(UNKNOWN_VENUE)
    }

    /// Authors joined by a space, as matched by the authors filter
    pub fn authors_text(&self) -> String {
        self.authors.join(" ")
    }

    pub fn bibtex_or_placeholder(&self) -> &str {
        self.bibtex.as_deref().unwrap_or(BIBTEX_UNAVAILABLE)
    }
}

impl From<RawRecord> for PublicationRecord {
    fn from(raw: RawRecord) -> Self {
        let title = raw
            .titles
            .and_then(|titles| non_empty(titles.into_iter().next()))
            .unwrap_or_else(|| UNTITLED.to_string());

        Self {
            title,
            year: parse_year(raw.produced_date.as_deref()),
            doc_type: DocType::from_code(raw.doc_type.as_deref()),
            url: raw.uri.unwrap_or_else(|| MISSING_URL.to_string()),
            authors: raw.authors.unwrap_or_default(),
            journal_title: non_empty(raw.journal_title),
            conference_title: non_empty(raw.conference_title),
            bibtex: non_empty(raw.bibtex),
            citation_full_raw: non_empty(raw.citation_full),
        }
    }
}

/// Normalize one raw document. Never fails: a document that is not an
/// object normalizes to an all-defaults record.
pub fn normalize(doc: &Value) -> PublicationRecord {
    RawRecord::deserialize(doc).unwrap_or_default().into()
}

/// Normalize the `response.docs` array of a search payload, preserving order.
///
/// Returns `None` when the payload has no such array.
pub fn normalize_all(payload: &Value) -> Option<Vec<PublicationRecord>> {
    let docs = payload.pointer("/response/docs")?.as_array()?;
    Some(docs.iter().map(normalize).collect())
}

/// Year from the first four characters of a produced date
fn parse_year(date: Option<&str>) -> u32 {
    date.map(|d| {
        d.chars()
            .take(4)
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
    })
    .and_then(|digits| digits.parse().ok())
    .unwrap_or(0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

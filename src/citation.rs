//! Citation formatting
//!
//! Two strategies, picked by what the search service supplied: the HAL
//! preformatted citation (`citationFull_s`) is cleaned of its markup when
//! present, otherwise an APA-style citation is synthesized from the record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::publication::PublicationRecord;

/// Full anchor element; group 1 is the href target
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a [^>]*href=["']([^"']+)["'][^>]*>.*?</a>"#).expect("valid anchor regex")
});

static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<i>(.*?)</i>").expect("valid italic regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Citation dialog content for one publication
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Citation {
    /// Human-readable citation
    pub citation: String,
    /// Raw BibTeX, or a placeholder when the record has none
    pub bibtex: String,
}

/// Build the citation dialog content for a record
pub fn cite(publication: &PublicationRecord) -> Citation {
    let citation = match publication.citation_full_raw.as_deref() {
        Some(raw) => clean_full_citation(raw),
        None => format_apa(publication),
    };

    Citation {
        citation,
        bibtex: publication.bibtex_or_placeholder().to_string(),
    }
}

/// Synthesize an APA-style citation: `Authors (year). Title. Source.`
pub fn format_apa(publication: &PublicationRecord) -> String {
    let source = publication
        .journal_title
        .clone()
        .or_else(|| publication.conference_title.clone())
        .unwrap_or_else(|| format!("Retrieved from {}", publication.url));

    format!(
        "{} ({}). {}. {}.",
        join_authors(&publication.authors),
        publication.year,
        publication.title,
        source
    )
}

/// `A` for one author, `A, B, & C` for several
fn join_authors(authors: &[String]) -> String {
    match authors {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, & {}", init.join(", "), last),
    }
}

/// Clean a HAL preformatted citation.
///
/// Italic tags are unwrapped, anchors are dropped with their text,
/// whitespace is collapsed and trailing periods removed. The target of the
/// first anchor, if any, is appended at the end.
pub fn clean_full_citation(raw: &str) -> String {
    let first_link = ANCHOR_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let cleaned = ITALIC_RE.replace_all(raw, "$1");
    let cleaned = ANCHOR_RE.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_RE.replace_all(&cleaned, " ");
    let cleaned = cleaned
        .trim()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());

    match first_link {
        Some(link) => format!("{} {}", cleaned, link),
        None => cleaned.to_string(),
    }
}

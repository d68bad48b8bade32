//! Table-of-contents highlighting: which section is currently in view

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::watch;

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Heading of the table of contents itself, never tracked
const TOC_HEADING: &str = "Table of Contents";

/// Part of the viewport, as fractions of its height, in which a section
/// counts as visible: from 20% above the top edge down to mid-height.
const BAND_ABOVE: f64 = 0.2;
const BAND_BELOW: f64 = 0.5;

/// Anchor id for a heading: lowercase, whitespace runs replaced by `-`
pub fn heading_anchor(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

/// A tracked heading and the vertical extent of its section
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub text: String,
    /// 2 or 3
    pub level: u8,
    pub top: f64,
    pub bottom: f64,
}

impl Section {
    fn intersects(&self, top: f64, bottom: f64) -> bool {
        self.top < bottom && self.bottom > top
    }
}

/// Determines the active section and notifies subscribers when it changes
pub struct VisibilityTracker {
    sections: Vec<Section>,
    active: watch::Sender<Option<String>>,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityTracker {
    pub fn new() -> Self {
        let (active, _) = watch::channel(None);
        Self {
            sections: Vec::new(),
            active,
        }
    }

    /// Register a heading; `id` defaults to [`heading_anchor`] of the text.
    ///
    /// Sections stay ordered by their top offset. Returns `None` for the
    /// table-of-contents heading, which is not tracked.
    pub fn register(
        &mut self,
        id: Option<&str>,
        text: &str,
        level: u8,
        top: f64,
        bottom: f64,
    ) -> Option<&Section> {
        if text.trim() == TOC_HEADING {
            return None;
        }

        let section = Section {
            id: id.map(str::to_string).unwrap_or_else(|| heading_anchor(text)),
            text: text.to_string(),
            level,
            top,
            bottom,
        };
        let pos = self.sections.partition_point(|s| s.top <= section.top);
        self.sections.insert(pos, section);
        self.sections.get(pos)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.active.subscribe()
    }

    /// Recompute against an explicit visible band.
    ///
    /// The first section in document order intersecting the band wins. When
    /// none does, the previous active section is kept.
    pub fn update(&self, band_top: f64, band_bottom: f64) -> Option<String> {
        if let Some(hit) = self
            .sections
            .iter()
            .find(|s| s.intersects(band_top, band_bottom))
        {
            let id = hit.id.clone();
            self.active.send_if_modified(|current| {
                if current.as_deref() == Some(id.as_str()) {
                    return false;
                }
                *current = Some(id.clone());
                true
            });
        }
        self.active()
    }

    /// Recompute after a scroll or layout event
    pub fn on_scroll(&self, scroll_top: f64, viewport_height: f64) -> Option<String> {
        self.update(
            scroll_top - BAND_ABOVE * viewport_height,
            scroll_top + BAND_BELOW * viewport_height,
        )
    }
}

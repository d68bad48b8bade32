//! Page chrome state: viewport mode, theme and section visibility.
//!
//! Each value has a single owner that pushes changes to subscribers through
//! a `tokio::sync::watch` channel, so views never query global state.
//! The server itself renders no pages: these types are library API for the
//! rendering client, configured from the `presentation` section.

pub mod presentation;
pub mod visibility;

pub use presentation::{Presentation, PresentationContext, Theme, ViewportMode};
pub use visibility::{heading_anchor, Section, VisibilityTracker};

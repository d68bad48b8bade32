//! Viewport mode and colour theme

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::watch;

use crate::config::PresentationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    /// Small screens: stacked navigation, compact theme toggle
    Compact,
    Wide,
}

impl ViewportMode {
    pub fn from_width(width: u32, breakpoint: u32) -> Self {
        if width <= breakpoint {
            ViewportMode::Compact
        } else {
            ViewportMode::Wide
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub viewport: ViewportMode,
    pub theme: Theme,
}

/// Owner of the current [`Presentation`]
pub struct PresentationContext {
    breakpoint: u32,
    sender: watch::Sender<Presentation>,
}

impl PresentationContext {
    pub fn new(config: &PresentationConfig, initial_width: u32) -> Self {
        let theme = config.default_theme.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid default theme, using light: {}", e);
            Theme::Light
        });
        let initial = Presentation {
            viewport: ViewportMode::from_width(initial_width, config.compact_breakpoint),
            theme,
        };
        let (sender, _) = watch::channel(initial);

        Self {
            breakpoint: config.compact_breakpoint,
            sender,
        }
    }

    pub fn current(&self) -> Presentation {
        *self.sender.borrow()
    }

    /// Observer notified whenever the presentation actually changes
    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.sender.subscribe()
    }

    /// Report a new viewport width; returns whether the mode changed
    pub fn resize(&self, width: u32) -> bool {
        let viewport = ViewportMode::from_width(width, self.breakpoint);
        self.sender.send_if_modified(|p| {
            if p.viewport == viewport {
                return false;
            }
            tracing::debug!("Viewport mode changed to {:?}", viewport);
            p.viewport = viewport;
            true
        })
    }

    /// Returns whether the theme changed
    pub fn set_theme(&self, theme: Theme) -> bool {
        self.sender.send_if_modified(|p| {
            if p.theme == theme {
                return false;
            }
            p.theme = theme;
            true
        })
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.current().theme.toggled();
        self.set_theme(theme);
        theme
    }
}

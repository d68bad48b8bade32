//! Configuration management for the homepage server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::{profile::Profile, student::Student};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Upstream HAL search endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct HalConfig {
    pub search_url: String,
    /// Free-text author query, sent as `q`
    pub query: String,
    pub timeout_seconds: u64,
}

/// Shared-cache policy attached to the proxied publications payload
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub s_maxage_seconds: u64,
    pub stale_while_revalidate_seconds: u64,
}

impl CacheConfig {
    /// Value of the `Cache-Control` header
    pub fn header_value(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.s_maxage_seconds, self.stale_while_revalidate_seconds
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PresentationConfig {
    /// Widths at or below this are rendered in compact mode
    pub compact_breakpoint: u32,
    pub default_theme: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub hal: HalConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix HOMEPAGE_)
            .add_source(
                Environment::with_prefix("HOMEPAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override the author query from HAL_QUERY env var if present
            .set_override_option("hal.query", env::var("HAL_QUERY").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            hal: HalConfig::default(),
            cache: CacheConfig::default(),
            browser: BrowserConfig::default(),
            presentation: PresentationConfig::default(),
            profile: Profile::default(),
            students: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            search_url: "https://api.archives-ouvertes.fr/search/".to_string(),
            query: "ammar mian".to_string(),
            timeout_seconds: 15,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            s_maxage_seconds: 604_800,
            stale_while_revalidate_seconds: 3_600,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint: 640,
            default_theme: "light".to_string(),
        }
    }
}

//! Homepage profile card data

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

/// One entry of the positions timeline
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntry {
    pub date: String,
    pub title: String,
    pub description: String,
}

/// Homepage owner profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    /// Full name, also used to emphasize the owner among publication authors
    pub name: String,
    pub position: String,
    pub contact: String,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub news: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Ammar Mian".to_string(),
            position: "Associate Professor at Université Savoie Mont Blanc".to_string(),
            contact: "ammar.mian at univ-smb.fr".to_string(),
            links: Vec::new(),
            interests: Vec::new(),
            news: Vec::new(),
            timeline: Vec::new(),
        }
    }
}

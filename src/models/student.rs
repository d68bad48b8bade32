//! Supervised students

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;

/// Kind of supervision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StudentKind {
    #[serde(rename = "Master")]
    Master,
    #[serde(rename = "Ph.D")]
    PhD,
    #[serde(rename = "Post-Doc")]
    PostDoc,
}

impl StudentKind {
    pub fn label(&self) -> &'static str {
        match self {
            StudentKind::Master => "Master",
            StudentKind::PhD => "Ph.D",
            StudentKind::PostDoc => "Post-Doc",
        }
    }
}

impl FromStr for StudentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Master" => Ok(StudentKind::Master),
            "Ph.D" => Ok(StudentKind::PhD),
            "Post-Doc" => Ok(StudentKind::PostDoc),
            other => Err(AppError::BadRequest(format!(
                "Unknown student type '{}', expected Master, Ph.D or Post-Doc",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StudentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Student entry, as configured under `[[students]]`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub name: String,
    pub start_date: NaiveDate,
    pub funding: String,
    #[serde(rename = "type")]
    pub kind: StudentKind,
    /// Defense date, absent while ongoing
    #[serde(default)]
    pub defended: Option<NaiveDate>,
    pub subject: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Student {
    /// Keywords joined by a space, as matched by the keywords filter
    pub fn keywords_text(&self) -> String {
        self.keywords.join(" ")
    }
}

/// Students listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct StudentQuery {
    /// Substring of the thesis/internship subject
    pub subject: Option<String>,
    /// Substring of the space-joined keywords
    pub keywords: Option<String>,
    /// Exact kind label: `Master`, `Ph.D` or `Post-Doc`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

//! Job posting models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Salary period stored when a posting does not name one
pub const DEFAULT_SALARY_TYPE: &str = "Year";

/// Creator summary embedded in job responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub profile_picture: Option<String>,
}

/// Job posting as returned by the API, creator populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: f64,
    pub salary_type: String,
    pub negotiable: bool,
    pub job_type: Vec<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub created_by: Creator,
    pub likes: Vec<Uuid>,
    pub applicants: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.contains(&user_id)
    }

    pub fn has_applicant(&self, user_id: Uuid) -> bool {
        self.applicants.contains(&user_id)
    }
}

/// Salary as sent by clients. Form inputs often arrive as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Amount(f64),
    Text(String),
}

impl Salary {
    /// Numeric value, if the input holds one
    pub fn amount(&self) -> Option<f64> {
        let amount = match self {
            Salary::Amount(value) => Some(*value),
            Salary::Text(text) => text.trim().parse::<f64>().ok(),
        };
        amount.filter(|value| value.is_finite())
    }
}

impl From<f64> for Salary {
    fn from(value: f64) -> Self {
        Salary::Amount(value)
    }
}

/// Payload of the create-job endpoint
///
/// Every field is optional on the wire so that a missing field is reported
/// by name instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Salary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiable: Option<bool>,
}

/// Validated job fields ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: f64,
    pub salary_type: String,
    pub negotiable: bool,
    pub job_type: Vec<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
}

/// Query string of the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Comma-separated tag list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Normalized search filter. Empty parts are not applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub title: Option<String>,
}

impl JobFilter {
    pub fn from_query(query: &SearchQuery) -> Self {
        let tags = query
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            tags,
            location: non_blank(query.location.as_deref()),
            title: non_blank(query.title.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.location.is_none() && self.title.is_none()
    }

    /// Whether a job satisfies every supplied part of the filter
    pub fn matches(&self, job: &Job) -> bool {
        let tags_match = self.tags.is_empty() || job.tags.iter().any(|tag| self.tags.contains(tag));
        let location_match = self
            .location
            .as_deref()
            .is_none_or(|needle| contains_ignore_case(&job.location, needle));
        let title_match = self
            .title
            .as_deref()
            .is_none_or(|needle| contains_ignore_case(&job.title, needle));

        tags_match && location_match && title_match
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

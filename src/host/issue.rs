//! Citizen issue records and where they go

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::host::error::HostError;

/// A reported issue routed to a public authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub gs_division: String,
    pub ds_division: String,
    pub urgency_score: f64,
    pub status_id: i64,
    pub authority_id: i64,
    pub category_id: i64,

    /// Image links grouped per attachment
    #[serde(default)]
    pub image_urls: Vec<Vec<String>>,
}

impl Issue {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            gs_division: String::new(),
            ds_division: String::new(),
            urgency_score: 0.0,
            status_id: 0,
            authority_id: 0,
            category_id: 0,
            image_urls: Vec::new(),
        }
    }

    /// Set the Grama Niladhari and Divisional Secretariat divisions
    pub fn with_divisions(mut self, gs_division: impl Into<String>, ds_division: impl Into<String>) -> Self {
        self.gs_division = gs_division.into();
        self.ds_division = ds_division.into();
        self
    }

    pub fn with_urgency(mut self, urgency_score: f64) -> Self {
        self.urgency_score = urgency_score;
        self
    }

    pub fn with_classification(mut self, status_id: i64, authority_id: i64, category_id: i64) -> Self {
        self.status_id = status_id;
        self.authority_id = authority_id;
        self.category_id = category_id;
        self
    }

    pub fn with_image_urls(mut self, image_urls: Vec<Vec<String>>) -> Self {
        self.image_urls = image_urls;
        self
    }

    /// Check the record is well formed
    pub fn validate(&self) -> Result<(), HostError> {
        if self.title.trim().is_empty() {
            return Err(HostError::InvalidIssue("title is empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(HostError::InvalidIssue("description is empty".into()));
        }
        if !self.urgency_score.is_finite() {
            return Err(HostError::InvalidIssue(format!(
                "urgency score {} is not a number",
                self.urgency_score
            )));
        }
        Ok(())
    }
}

/// Destination for created issues
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueSink: Send + Sync {
    async fn record(&self, issue: &Issue) -> anyhow::Result<()>;
}

/// Logs each issue and keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingIssueSink;

#[async_trait]
impl IssueSink for LoggingIssueSink {
    async fn record(&self, issue: &Issue) -> anyhow::Result<()> {
        let record = serde_json::to_string_pretty(issue)?;
        info!("Issue data to be created:\n{}", record);
        Ok(())
    }
}

//! Dashboard aggregate computed by the server

use serde::{Deserialize, Serialize};

/// Read-only summary counts plus the most recent tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(default)]
    pub test_count: u64,
    #[serde(default)]
    pub textbook_count: u64,
    #[serde(default)]
    pub note_count: u64,
    #[serde(default)]
    pub recent_tests: Vec<RecentTest>,
}

/// Summary row for a recently created test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTest {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub question_count: u64,
}

impl RecentTest {
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
            .unwrap_or("General")
    }
}

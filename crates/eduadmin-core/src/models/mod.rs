//! Record types for the resources the console manages
//!
//! Every record is owned by the remote API; these are disposable copies.
//! Wire names follow the server (camelCase, `_id` identifiers). Missing
//! optional text fields default to empty strings here so the screens never
//! see undefined values.

mod assessment;
mod dashboard;
mod note;
mod textbook;

pub use assessment::{parse_options, Question, QuestionDraft, Test, TestDraft};
pub use dashboard::{DashboardMetrics, RecentTest};
pub use note::{Note, NoteDraft};
pub use textbook::{Textbook, TextbookDraft};

use serde::{Deserialize, Deserializer};

/// Accepts a JSON string or number and yields its text form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null(()) => String::new(),
    })
}

//! Test and question records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question nested under a test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Expected to be one of `options`; the server decides.
    #[serde(default)]
    pub correct_answer: String,
}

/// A test with its ordered questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form values for creating or editing a test
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestDraft {
    /// Present when editing an existing test
    #[serde(skip)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

impl TestDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            questions: Vec::new(),
        }
    }

    /// Prefills the edit form from a loaded test.
    pub fn from_test(test: &Test) -> Self {
        Self {
            id: Some(test.id.clone()),
            title: test.title.clone(),
            description: test.description.clone(),
            questions: Vec::new(),
        }
    }
}

/// Form values for adding a question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionDraft {
    /// Builds a draft from the raw form fields; `options` is comma separated.
    pub fn from_form(
        question_text: impl Into<String>,
        options: &str,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            options: parse_options(options),
            correct_answer: correct_answer.into(),
        }
    }
}

/// Splits a comma separated option list into trimmed, non-empty entries.
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(ToString::to_string)
        .collect()
}

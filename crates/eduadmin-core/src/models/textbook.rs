//! Textbook records

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// An uploaded textbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Textbook {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub grade_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// Metadata fields of the textbook upload form.
///
/// The file itself travels separately as a [`crate::api::TextbookUpload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextbookDraft {
    /// Present when editing an existing textbook
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub subject: String,
    pub grade_level: String,
}

impl TextbookDraft {
    pub fn from_textbook(textbook: &Textbook) -> Self {
        Self {
            id: Some(textbook.id.clone()),
            title: textbook.title.clone(),
            author: textbook.author.clone(),
            subject: textbook.subject.clone(),
            grade_level: textbook.grade_level.clone(),
        }
    }

    /// Multipart text fields in form order.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("title", self.title.as_str()),
            ("author", self.author.as_str()),
            ("subject", self.subject.as_str()),
            ("gradeLevel", self.grade_level.as_str()),
        ]
    }
}

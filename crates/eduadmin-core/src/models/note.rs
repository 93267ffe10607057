//! Study note records

use serde::{Deserialize, Serialize};

/// A study note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub subject: String,
}

/// Form values for creating or editing a note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub board: String,
    pub class: String,
    pub subject: String,
}

impl NoteDraft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            board: note.board.clone(),
            class: note.class.clone(),
            subject: note.subject.clone(),
        }
    }
}

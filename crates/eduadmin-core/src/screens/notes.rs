//! Notes screen.

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Note, NoteDraft};
use crate::screens::Confirmation;
use crate::search::filter_records;
use crate::session::TokenStore;

pub const DELETE_NOTE_PROMPT: &str = "Are you sure you want to delete this note?";

#[derive(Debug, Default)]
pub struct NotesScreen {
    notes: Vec<Note>,
    search_term: String,
}

impl NotesScreen {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Loaded notes matching the current search term.
    pub fn filtered(&self) -> Vec<&Note> {
        filter_records(&self.notes, &self.search_term)
    }

    pub fn find(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    pub async fn load<S: TokenStore>(&mut self, api: &ApiClient<S>) -> ApiResult<()> {
        match api.list_notes().await {
            Ok(notes) => {
                self.notes = notes;
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Error fetching notes: {}", error);
                Err(error)
            }
        }
    }

    pub fn draft_for(&self, note_id: &str) -> Option<NoteDraft> {
        self.find(note_id).map(NoteDraft::from_note)
    }

    pub async fn save<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        draft: &NoteDraft,
    ) -> ApiResult<()> {
        let result = match draft.id.as_deref() {
            Some(note_id) => api.update_note(note_id, draft).await.map(drop),
            None => api.create_note(draft).await.map(drop),
        };
        if let Err(error) = result {
            tracing::warn!("Save error: {}", error);
            return Err(error);
        }
        let _ = self.load(api).await;
        Ok(())
    }

    pub async fn delete<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        note_id: &str,
        confirmation: &impl Confirmation,
    ) -> ApiResult<bool> {
        if !confirmation.confirm(DELETE_NOTE_PROMPT) {
            return Ok(false);
        }
        if let Err(error) = api.delete_note(note_id).await {
            tracing::warn!("Delete error: {}", error);
            return Err(error);
        }
        let _ = self.load(api).await;
        Ok(true)
    }
}

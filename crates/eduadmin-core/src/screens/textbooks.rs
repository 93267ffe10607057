//! Textbooks screen with multipart upload progress.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::api::{ApiClient, ProgressCallback, TextbookUpload, UploadProgress};
use crate::error::{ApiError, ApiResult};
use crate::models::{Textbook, TextbookDraft};
use crate::screens::Confirmation;
use crate::search::filter_records;
use crate::session::TokenStore;

pub const DELETE_TEXTBOOK_PROMPT: &str = "Are you sure you want to delete this textbook?";

#[derive(Debug, Default)]
pub struct TextbooksScreen {
    textbooks: Vec<Textbook>,
    search_term: String,
    upload_percent: Arc<AtomicU8>,
    uploading: bool,
}

impl TextbooksScreen {
    pub fn textbooks(&self) -> &[Textbook] {
        &self.textbooks
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Loaded textbooks matching the current search term.
    pub fn filtered(&self) -> Vec<&Textbook> {
        filter_records(&self.textbooks, &self.search_term)
    }

    pub fn find(&self, textbook_id: &str) -> Option<&Textbook> {
        self.textbooks
            .iter()
            .find(|textbook| textbook.id == textbook_id)
    }

    pub fn upload_percent(&self) -> u8 {
        self.upload_percent.load(Ordering::Relaxed)
    }

    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub async fn load<S: TokenStore>(&mut self, api: &ApiClient<S>) -> ApiResult<()> {
        match api.list_textbooks().await {
            Ok(textbooks) => {
                self.textbooks = textbooks;
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Error fetching textbooks: {}", error);
                Err(error)
            }
        }
    }

    pub fn draft_for(&self, textbook_id: &str) -> Option<TextbookDraft> {
        self.find(textbook_id).map(TextbookDraft::from_textbook)
    }

    /// Uploads a new textbook or updates an existing one.
    ///
    /// A new textbook without a file is rejected before any request. On
    /// success the dialog state resets and the list reloads; on failure the
    /// last progress value is kept.
    pub async fn save<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        draft: &TextbookDraft,
        upload: Option<&TextbookUpload>,
        observer: Option<ProgressCallback>,
    ) -> ApiResult<()> {
        if upload.is_none() && draft.id.is_none() {
            return Err(ApiError::MissingUploadFile);
        }

        self.uploading = true;
        let on_progress = self.progress_callback(observer);
        let result = match draft.id.as_deref() {
            Some(textbook_id) => api
                .update_textbook(textbook_id, draft, upload, Some(on_progress))
                .await
                .map(drop),
            None => api
                .create_textbook(draft, upload, Some(on_progress))
                .await
                .map(drop),
        };

        if let Err(error) = result {
            tracing::warn!("Save error: {}", error);
            self.uploading = false;
            return Err(error);
        }

        self.close_dialog();
        let _ = self.load(api).await;
        Ok(())
    }

    pub async fn delete<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        textbook_id: &str,
        confirmation: &impl Confirmation,
    ) -> ApiResult<bool> {
        if !confirmation.confirm(DELETE_TEXTBOOK_PROMPT) {
            return Ok(false);
        }
        if let Err(error) = api.delete_textbook(textbook_id).await {
            tracing::warn!("Delete error: {}", error);
            return Err(error);
        }
        let _ = self.load(api).await;
        Ok(true)
    }

    /// Resets upload progress when the dialog closes.
    pub fn close_dialog(&mut self) {
        self.upload_percent.store(0, Ordering::Relaxed);
        self.uploading = false;
    }

    fn progress_callback(&self, observer: Option<ProgressCallback>) -> ProgressCallback {
        let percent = Arc::clone(&self.upload_percent);
        Arc::new(move |progress: UploadProgress| {
            percent.store(progress.percent(), Ordering::Relaxed);
            if let Some(observer) = &observer {
                observer(progress);
            }
        })
    }
}

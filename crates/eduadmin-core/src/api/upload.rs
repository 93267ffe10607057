//! Multipart textbook uploads with progress reporting.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::Body;

use crate::error::{ApiError, ApiResult};
use crate::models::TextbookDraft;

/// Multipart field the server expects the textbook file under.
pub const TEXTBOOK_FILE_FIELD: &str = "pdf";

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Bytes of the file part handed to the transport so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
}

impl UploadProgress {
    /// Rounded percentage, `loaded * 100 / total`.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let loaded = self.loaded.min(self.total);
        let rounded = (loaded * 100 + self.total / 2) / self.total;
        u8::try_from(rounded).unwrap_or(100)
    }
}

pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextbookUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl TextbookUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> ApiResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(ApiError::InvalidConfiguration(
                "Upload path must name a file",
            ))?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub(crate) fn textbook_form(
    draft: &TextbookDraft,
    upload: Option<&TextbookUpload>,
    on_progress: Option<ProgressCallback>,
) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in draft.form_fields() {
        form = form.text(name, value.to_string());
    }

    if let Some(upload) = upload {
        let body = Body::wrap_stream(progress_stream(upload.bytes.clone(), on_progress));
        let part = Part::stream_with_length(body, upload.len())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        form = form.part(TEXTBOOK_FILE_FIELD, part);
    }

    Ok(form)
}

fn progress_stream(
    bytes: Bytes,
    on_progress: Option<ProgressCallback>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
    let total = bytes.len() as u64;
    let mut loaded = 0u64;
    stream::iter(split_chunks(&bytes, UPLOAD_CHUNK_SIZE)).map(move |chunk| {
        loaded += chunk.len() as u64;
        if let Some(callback) = &on_progress {
            callback(UploadProgress { loaded, total });
        }
        Ok(chunk)
    })
}

fn split_chunks(bytes: &Bytes, chunk_size: usize) -> Vec<Bytes> {
    (0..bytes.len())
        .step_by(chunk_size)
        .map(|start| bytes.slice(start..(start + chunk_size).min(bytes.len())))
        .collect()
}

//! REST API client.
//!
//! Single point of outbound HTTP. Every request passes through
//! [`ApiClient::authorize`], which reads the persisted token at call time
//! and attaches it as a bearer credential. Each call is sent once with no
//! retry or timeout. Non-2xx responses become [`ApiError::Api`].

mod upload;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use upload::{ProgressCallback, TextbookUpload, UploadProgress, TEXTBOOK_FILE_FIELD};

use crate::config::{normalize_base_url, ApiConfig};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    DashboardMetrics, Note, NoteDraft, Question, QuestionDraft, Test, TestDraft, Textbook,
    TextbookDraft,
};
use crate::session::TokenStore;
use crate::util::message_excerpt;

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Fields the test edit form sends on update.
#[derive(Serialize)]
struct TestFields<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Clone)]
pub struct ApiClient<S: TokenStore> {
    base_url: String,
    client: Client,
    store: S,
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(base_url: impl AsRef<str>, store: S) -> ApiResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            client: Client::builder().build()?,
            store,
        })
    }

    pub fn from_config(config: &ApiConfig, store: S) -> ApiResult<Self> {
        Self::new(&config.base_url, store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn token_store(&self) -> &S {
        &self.store
    }

    // -- authentication ----------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = self
            .request(Method::POST, "/auth/login")
            .json(&Credentials { username, password });
        self.send_json(request).await
    }

    pub async fn register(&self, username: &str, password: &str) -> ApiResult<serde_json::Value> {
        let request = self
            .request(Method::POST, "/auth/register")
            .json(&Credentials { username, password });
        self.send_json(request).await
    }

    // -- tests and questions -----------------------------------------------

    pub async fn list_tests(&self) -> ApiResult<Vec<Test>> {
        self.send_json(self.request(Method::GET, "/tests")).await
    }

    pub async fn create_test(&self, draft: &TestDraft) -> ApiResult<Test> {
        let request = self.request(Method::POST, "/tests").json(draft);
        self.send_json(request).await
    }

    pub async fn update_test(&self, test_id: &str, draft: &TestDraft) -> ApiResult<Test> {
        let request = self
            .request(Method::PUT, &format!("/tests/{}", encode(test_id)))
            .json(&TestFields {
                title: &draft.title,
                description: &draft.description,
            });
        self.send_json(request).await
    }

    pub async fn delete_test(&self, test_id: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &format!("/tests/{}", encode(test_id)));
        self.send(request).await.map(drop)
    }

    pub async fn add_question(&self, test_id: &str, draft: &QuestionDraft) -> ApiResult<Question> {
        let request = self
            .request(
                Method::POST,
                &format!("/tests/{}/questions", encode(test_id)),
            )
            .json(draft);
        self.send_json(request).await
    }

    pub async fn update_question(
        &self,
        test_id: &str,
        question_id: &str,
        draft: &QuestionDraft,
    ) -> ApiResult<Question> {
        let request = self
            .request(
                Method::PUT,
                &format!(
                    "/tests/{}/questions/{}",
                    encode(test_id),
                    encode(question_id)
                ),
            )
            .json(draft);
        self.send_json(request).await
    }

    pub async fn delete_question(&self, test_id: &str, question_id: &str) -> ApiResult<()> {
        let request = self.request(
            Method::DELETE,
            &format!(
                "/tests/{}/questions/{}",
                encode(test_id),
                encode(question_id)
            ),
        );
        self.send(request).await.map(drop)
    }

    // -- textbooks ---------------------------------------------------------

    pub async fn list_textbooks(&self) -> ApiResult<Vec<Textbook>> {
        self.send_json(self.request(Method::GET, "/textbooks")).await
    }

    /// Uploads a new textbook as multipart form data.
    pub async fn create_textbook(
        &self,
        draft: &TextbookDraft,
        upload: Option<&TextbookUpload>,
        on_progress: Option<ProgressCallback>,
    ) -> ApiResult<Textbook> {
        let form = upload::textbook_form(draft, upload, on_progress)?;
        let request = self.request(Method::POST, "/textbooks").multipart(form);
        self.send_json(request).await
    }

    /// Replaces textbook metadata and, when `upload` is given, its file.
    pub async fn update_textbook(
        &self,
        textbook_id: &str,
        draft: &TextbookDraft,
        upload: Option<&TextbookUpload>,
        on_progress: Option<ProgressCallback>,
    ) -> ApiResult<Textbook> {
        let form = upload::textbook_form(draft, upload, on_progress)?;
        let request = self
            .request(Method::PUT, &format!("/textbooks/{}", encode(textbook_id)))
            .multipart(form);
        self.send_json(request).await
    }

    pub async fn delete_textbook(&self, textbook_id: &str) -> ApiResult<()> {
        let request = self.request(
            Method::DELETE,
            &format!("/textbooks/{}", encode(textbook_id)),
        );
        self.send(request).await.map(drop)
    }

    // -- notes -------------------------------------------------------------

    pub async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.send_json(self.request(Method::GET, "/notes")).await
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        let request = self.request(Method::POST, "/notes").json(draft);
        self.send_json(request).await
    }

    pub async fn update_note(&self, note_id: &str, draft: &NoteDraft) -> ApiResult<Note> {
        let request = self
            .request(Method::PUT, &format!("/notes/{}", encode(note_id)))
            .json(draft);
        self.send_json(request).await
    }

    pub async fn delete_note(&self, note_id: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &format!("/notes/{}", encode(note_id)));
        self.send(request).await.map(drop)
    }

    // -- dashboard ---------------------------------------------------------

    pub async fn dashboard_metrics(&self) -> ApiResult<DashboardMetrics> {
        self.send_json(self.request(Method::GET, "/dashboard/metrics"))
            .await
    }

    // -- plumbing ----------------------------------------------------------

    fn request(&self, method: Method, route: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, route);
        self.client
            .request(method, format!("{}{}", self.base_url, route))
    }

    /// Request interceptor: attaches the persisted token when one exists.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.load_token() {
            Ok(Some(token)) if !token.trim().is_empty() => request.bearer_auth(token.trim()),
            Ok(_) => request,
            Err(error) => {
                tracing::warn!("Sending request without credentials: {}", error);
                request
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self.authorize(request).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status,
                message: parse_api_error(status, &body),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn encode(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id.trim())
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

fn parse_api_error(status: u16, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.error).or(payload.msg) {
            return message_excerpt(&message);
        }
    }

    let trimmed = message_excerpt(body);
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed
    }
}

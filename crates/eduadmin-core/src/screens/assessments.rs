//! Tests screen and its nested question dialog.

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Question, QuestionDraft, Test, TestDraft};
use crate::screens::Confirmation;
use crate::session::TokenStore;

pub const DELETE_TEST_PROMPT: &str = "Are you sure you want to delete this test?";
pub const DELETE_QUESTION_PROMPT: &str = "Delete this question?";

#[derive(Debug, Default)]
pub struct TestsScreen {
    tests: Vec<Test>,
    loading: bool,
}

impl TestsScreen {
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, test_id: &str) -> Option<&Test> {
        self.tests.iter().find(|test| test.id == test_id)
    }

    /// Fetches the test list. On failure the current list is kept.
    pub async fn load<S: TokenStore>(&mut self, api: &ApiClient<S>) -> ApiResult<()> {
        self.loading = true;
        let result = api.list_tests().await;
        self.loading = false;
        match result {
            Ok(tests) => {
                self.tests = tests;
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Error fetching tests: {}", error);
                Err(error)
            }
        }
    }

    /// Prefilled edit form for a loaded test.
    pub fn draft_for(&self, test_id: &str) -> Option<TestDraft> {
        self.find(test_id).map(TestDraft::from_test)
    }

    /// Creates (no id) or updates (id present), then reloads the list.
    pub async fn save<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        draft: &TestDraft,
    ) -> ApiResult<()> {
        let result = match draft.id.as_deref() {
            Some(test_id) => api.update_test(test_id, draft).await.map(drop),
            None => api.create_test(draft).await.map(drop),
        };
        if let Err(error) = result {
            tracing::warn!("Error saving test: {}", error);
            return Err(error);
        }
        self.reload(api).await;
        Ok(())
    }

    /// Deletes after confirmation, then reloads. Returns `false` when the
    /// user declined and nothing was sent.
    pub async fn delete<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        test_id: &str,
        confirmation: &impl Confirmation,
    ) -> ApiResult<bool> {
        if !confirmation.confirm(DELETE_TEST_PROMPT) {
            return Ok(false);
        }
        if let Err(error) = api.delete_test(test_id).await {
            tracing::warn!("Error deleting test: {}", error);
            return Err(error);
        }
        self.reload(api).await;
        Ok(true)
    }

    /// Opens the question dialog seeded with the test's loaded questions.
    pub fn open_questions(&self, test_id: &str) -> Option<QuestionDialog> {
        self.find(test_id)
            .map(|test| QuestionDialog::new(test.id.clone(), test.questions.clone()))
    }

    async fn reload<S: TokenStore>(&mut self, api: &ApiClient<S>) {
        // Failure is already logged by `load`; the stale list stays visible.
        let _ = self.load(api).await;
    }
}

/// Question management for a single test.
///
/// Questions can be added and deleted here; editing is not offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDialog {
    test_id: String,
    questions: Vec<Question>,
}

impl QuestionDialog {
    pub const fn new(test_id: String, questions: Vec<Question>) -> Self {
        Self { test_id, questions }
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Sends the question, appends the server's copy and returns it.
    pub async fn add<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        draft: &QuestionDraft,
    ) -> ApiResult<Question> {
        let question = api
            .add_question(&self.test_id, draft)
            .await
            .inspect_err(|error| tracing::warn!("Error adding question: {}", error))?;
        self.questions.push(question.clone());
        Ok(question)
    }

    /// Deletes after confirmation and drops exactly that question locally.
    pub async fn delete<S: TokenStore>(
        &mut self,
        api: &ApiClient<S>,
        question_id: &str,
        confirmation: &impl Confirmation,
    ) -> ApiResult<bool> {
        if !confirmation.confirm(DELETE_QUESTION_PROMPT) {
            return Ok(false);
        }
        api.delete_question(&self.test_id, question_id)
            .await
            .inspect_err(|error| tracing::warn!("Error deleting question: {}", error))?;
        self.questions.retain(|question| question.id != question_id);
        Ok(true)
    }
}

//! Screen controllers.
//!
//! Each screen owns a disposable copy of one resource list and follows the
//! same cycle: load, idle, mutate, reload. Mutations never patch the list
//! locally; the server's list is fetched again afterwards. The one exception
//! is the question dialog, which appends the created question and removes a
//! deleted one by identifier.

mod assessments;
mod dashboard;
mod notes;
mod textbooks;

pub use assessments::{
    QuestionDialog, TestsScreen, DELETE_QUESTION_PROMPT, DELETE_TEST_PROMPT,
};
pub use dashboard::{DashboardScreen, DashboardState, METRICS_ERROR_MESSAGE};
pub use notes::{NotesScreen, DELETE_NOTE_PROMPT};
pub use textbooks::{TextbooksScreen, DELETE_TEXTBOOK_PROMPT};

/// Interactive confirmation before a destructive action.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms every prompt without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

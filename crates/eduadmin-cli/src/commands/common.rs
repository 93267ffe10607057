use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use eduadmin_core::config::ApiConfig;
use eduadmin_core::models::{DashboardMetrics, Note, Question, Test, Textbook};
use eduadmin_core::screens::Confirmation;
use eduadmin_core::util::{single_line, truncate_with_ellipsis};
use eduadmin_core::{ApiClient, Navigation, Route, RouteGuard, SessionStore};

use crate::auth::ProfileTokenStore;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub profile: Option<String>,
    pub api_url: Option<String>,
    pub token_file: Option<PathBuf>,
}

/// Resolved profile plus its restored session.
pub struct AppContext {
    pub profile_name: String,
    pub token_store: ProfileTokenStore,
    pub session: SessionStore<ProfileTokenStore>,
}

impl AppContext {
    pub fn build(options: &GlobalOptions) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = config.resolve_profile_name(options.profile.as_deref());
        let profile = config.profile(&profile_name).cloned().unwrap_or_default();

        let api_config = ApiConfig::resolve(options.api_url.clone(), profile.api_base_url())?;
        let token_store =
            ProfileTokenStore::resolve(&profile_name, options.token_file.clone(), &profile);
        let api = ApiClient::from_config(&api_config, token_store.clone())?;
        tracing::debug!("Using profile '{}' against {}", profile_name, api.base_url());

        Ok(Self {
            profile_name,
            token_store,
            session: SessionStore::restore(api),
        })
    }

    pub const fn api(&self) -> &ApiClient<ProfileTokenStore> {
        self.session.api()
    }

    /// Runs the route guard for a screen; anything but a render is refused.
    pub fn enter(&self, route: Route) -> Result<(), CliError> {
        match RouteGuard::check(route.path(), &self.session) {
            Navigation::Render(_) => Ok(()),
            Navigation::Redirect(Route::Login) => Err(CliError::NotSignedIn),
            Navigation::Redirect(other) => Err(CliError::Config(format!(
                "{} is not reachable; redirected to {}",
                route.path(),
                other.path()
            ))),
        }
    }
}

/// Prompts on stdin unless `--yes` was given.
///
/// Without a terminal nothing is confirmed, so scripted deletes need `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct PromptConfirmation {
    assume_yes: bool,
}

impl PromptConfirmation {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmation for PromptConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return false;
        }

        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match stdin.lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn normalize_identifier(kind: &'static str, raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyId(kind))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Overwrites `field` only when a replacement was given.
pub fn apply_update(field: &mut String, replacement: Option<String>) {
    if let Some(value) = replacement {
        *field = value;
    }
}

fn preview(value: &str, width: usize) -> String {
    truncate_with_ellipsis(&single_line(value), width)
}

pub fn format_test_lines(tests: &[Test]) -> Vec<String> {
    tests
        .iter()
        .map(|test| {
            format!(
                "{:<24}  {:<32}  {:>3} questions  {}",
                test.id,
                preview(&test.title, 32),
                test.questions.len(),
                preview(&test.description, 40)
            )
        })
        .collect()
}

pub fn format_question_lines(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .map(|question| {
            format!(
                "{:<24}  {}  [{}]  answer: {}",
                question.id,
                preview(&question.question_text, 48),
                question.options.join(", "),
                question.correct_answer
            )
        })
        .collect()
}

pub fn format_textbook_lines(textbooks: &[&Textbook]) -> Vec<String> {
    textbooks
        .iter()
        .map(|textbook| {
            format!(
                "{:<24}  {:<32}  {:<20}  {:<16}  grade {}",
                textbook.id,
                preview(&textbook.title, 32),
                preview(&textbook.author, 20),
                preview(&textbook.subject, 16),
                textbook.grade_level
            )
        })
        .collect()
}

pub fn format_note_lines(notes: &[&Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let tags = [&note.board, &note.class, &note.subject]
                .into_iter()
                .filter(|value| !value.trim().is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" / ");
            format!(
                "{:<24}  {:<32}  {:<28}  {}",
                note.id,
                preview(&note.title, 32),
                tags,
                preview(&note.content, 40)
            )
        })
        .collect()
}

pub fn format_dashboard_lines(metrics: &DashboardMetrics) -> Vec<String> {
    let mut lines = vec![
        format!("Tests:      {}", metrics.test_count),
        format!("Textbooks:  {}", metrics.textbook_count),
        format!("Notes:      {}", metrics.note_count),
        String::new(),
        "Recent tests".to_string(),
    ];
    if metrics.recent_tests.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(metrics.recent_tests.iter().map(|test| {
        format!(
            "  {:<32}  {:<12}  {} questions",
            preview(&test.title, 32),
            test.category_label(),
            test.question_count
        )
    }));
    lines
}

pub fn print_lines(lines: Vec<String>, empty_message: &str) {
    if lines.is_empty() {
        println!("{empty_message}");
    }
    for line in lines {
        println!("{line}");
    }
}

use clap::{CommandFactory, Parser};
use eduadmin_core::models::{DashboardMetrics, Note, RecentTest, Test};
use eduadmin_core::{
    ApiClient, FileTokenStore, Route, SessionStore, TokenStore, UploadProgress,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::auth::ProfileTokenStore;
use crate::cli::{Cli, Commands, CompletionShell, TestCommands, TextbookCommands};
use crate::commands::common::{
    AppContext, apply_update, format_dashboard_lines, format_note_lines, format_test_lines, is_affirmative,
    normalize_identifier,
};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::config::describe_profile;
use crate::commands::dashboard::show_dashboard;
use crate::commands::open::landing_route;
use crate::commands::textbooks::progress_label;
use crate::error::CliError;

fn note(id: &str, title: &str, board: &str, class: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: "Light bends\nwhen it changes medium".to_string(),
        board: board.to_string(),
        class: class.to_string(),
        subject: String::new(),
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from([
        "eduadmin",
        "tests",
        "delete",
        "t1",
        "--yes",
        "--profile",
        "school",
        "--api-url",
        "http://localhost:4000/api",
    ])
    .unwrap();

    assert_eq!(cli.profile.as_deref(), Some("school"));
    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:4000/api"));
    match cli.command {
        Commands::Tests {
            command: TestCommands::Delete { id, yes },
        } => {
            assert_eq!(id, "t1");
            assert!(yes);
        }
        _ => panic!("expected tests delete"),
    }
}

#[test]
fn textbook_create_accepts_file_and_grade() {
    let cli = Cli::try_parse_from([
        "eduadmin",
        "textbooks",
        "create",
        "--title",
        "Physics",
        "--grade-level",
        "10",
        "--file",
        "physics.pdf",
    ])
    .unwrap();

    match cli.command {
        Commands::Textbooks {
            command:
                TextbookCommands::Create {
                    title,
                    grade_level,
                    file,
                    author,
                    ..
                },
        } => {
            assert_eq!(title, "Physics");
            assert_eq!(grade_level, "10");
            assert_eq!(author, "");
            assert_eq!(file.unwrap().to_str(), Some("physics.pdf"));
        }
        _ => panic!("expected textbooks create"),
    }
}

#[test]
fn login_requires_credentials() {
    assert!(Cli::try_parse_from(["eduadmin", "login", "--username", "admin"]).is_err());
}

#[test]
fn normalize_identifier_trims_and_rejects_empty() {
    assert_eq!(normalize_identifier("Test", "  t1 ").unwrap(), "t1");
    assert!(matches!(
        normalize_identifier("Note", "   "),
        Err(CliError::EmptyId("Note"))
    ));
}

#[test]
fn apply_update_only_overwrites_given_values() {
    let mut title = "Algebra I".to_string();
    apply_update(&mut title, None);
    assert_eq!(title, "Algebra I");
    apply_update(&mut title, Some("Algebra II".to_string()));
    assert_eq!(title, "Algebra II");
}

#[test]
fn affirmative_answers() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("no"));
}

#[test]
fn unauthenticated_open_lands_on_login() {
    let landing = landing_route("/tests", false);
    assert_eq!(landing.route, Route::Login);
    assert_eq!(landing.redirected, Some(Route::Login));
}

#[test]
fn unknown_path_settles_on_guarded_screen() {
    let landing = landing_route("/reports", false);
    assert_eq!(landing.route, Route::Login);
    assert_eq!(landing.redirected, Some(Route::Login));

    let landing = landing_route("/reports", true);
    assert_eq!(landing.route, Route::Dashboard);
    assert_eq!(landing.redirected, Some(Route::Dashboard));
}

#[test]
fn authenticated_open_renders_directly() {
    let landing = landing_route("/notes/", true);
    assert_eq!(landing.route, Route::Notes);
    assert_eq!(landing.redirected, None);
}

#[test]
fn test_lines_include_question_count() {
    let tests = vec![Test {
        id: "t1".to_string(),
        title: "Algebra I".to_string(),
        description: "Linear equations".to_string(),
        questions: Vec::new(),
        created_at: None,
    }];
    let lines = format_test_lines(&tests);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("t1"));
    assert!(lines[0].contains("Algebra I"));
    assert!(lines[0].contains("  0 questions"));
}

#[test]
fn note_lines_join_present_tags_and_flatten_content() {
    let notes = [note("n1", "Optics", "CBSE", "10")];
    let refs = notes.iter().collect::<Vec<_>>();
    let lines = format_note_lines(&refs);
    assert!(lines[0].contains("CBSE / 10"));
    assert!(lines[0].contains("Light bends when it changes medium"));
}

#[test]
fn dashboard_lines_use_general_category_fallback() {
    let metrics = DashboardMetrics {
        test_count: 2,
        textbook_count: 1,
        note_count: 0,
        recent_tests: vec![RecentTest {
            id: "t1".to_string(),
            title: "Algebra I".to_string(),
            description: String::new(),
            category: None,
            question_count: 12,
        }],
    };
    let lines = format_dashboard_lines(&metrics);
    assert_eq!(lines[0], "Tests:      2");
    assert!(lines.iter().any(|line| line.contains("General")));
    assert!(lines.iter().any(|line| line.contains("12 questions")));
}

#[test]
fn dashboard_lines_mark_empty_recent_tests() {
    let lines = format_dashboard_lines(&DashboardMetrics::default());
    assert_eq!(lines.last().map(String::as_str), Some("  (none)"));
}

#[test]
fn progress_label_pads_percent() {
    let label = progress_label(UploadProgress {
        loaded: 50,
        total: 200,
    });
    assert_eq!(label, "Uploading...  25%");
}

#[test]
fn describe_profile_defaults() {
    assert_eq!(
        describe_profile(None, None),
        vec![
            "api_base_url: (default)".to_string(),
            "token storage: OS keychain".to_string()
        ]
    );
}

#[test]
fn completions_use_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("eduadmin"));
}

#[test]
fn every_shell_completes_resource_commands() {
    for shell in [CompletionShell::Bash, CompletionShell::Zsh, CompletionShell::Fish] {
        let script = String::from_utf8(render_completions(shell)).unwrap();
        for command in ["textbooks", "notes", "dashboard"] {
            assert!(script.contains(command), "{shell:?} is missing {command}");
        }
    }
}

#[test]
fn completions_output_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fish/completions/eduadmin.fish");
    run_completions(CompletionShell::Fish, Some(&path)).unwrap();
    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("complete -c eduadmin"));
}

fn signed_in_context(server: &MockServer, dir: &tempfile::TempDir) -> AppContext {
    let token_store = ProfileTokenStore::File(FileTokenStore::new(dir.path().join("token")));
    token_store.save_token("cli-token").unwrap();
    let api = ApiClient::new(format!("{}/api", server.uri()), token_store.clone()).unwrap();
    AppContext {
        profile_name: "default".to_string(),
        token_store,
        session: SessionStore::restore(api),
    }
}

#[tokio::test]
async fn dashboard_failure_exits_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/metrics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let context = signed_in_context(&server, &dir);

    let error = show_dashboard(&context, true).await.unwrap_err();
    assert!(matches!(error, CliError::MetricsUnavailable(_)));
    assert_eq!(
        error.to_string(),
        "Error loading metrics. Run `eduadmin dashboard` again to retry."
    );
}

#[tokio::test]
async fn dashboard_success_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "testCount": 1,
            "textbookCount": 0,
            "noteCount": 0,
            "recentTests": []
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let context = signed_in_context(&server, &dir);

    show_dashboard(&context, true).await.unwrap();
}

#[tokio::test]
async fn dashboard_without_session_is_refused() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_store = ProfileTokenStore::File(FileTokenStore::new(dir.path().join("absent")));
    let api = ApiClient::new(format!("{}/api", server.uri()), token_store.clone()).unwrap();
    let context = AppContext {
        profile_name: "default".to_string(),
        token_store,
        session: SessionStore::restore(api),
    };

    let error = show_dashboard(&context, false).await.unwrap_err();
    assert!(matches!(error, CliError::NotSignedIn));
    assert!(server.received_requests().await.unwrap().is_empty());
}

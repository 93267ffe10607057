use eduadmin_core::screens::{NotesScreen, TestsScreen, TextbooksScreen};
use eduadmin_core::{Navigation, Route, RouteGuard};

use crate::commands::common::{
    format_note_lines, format_test_lines, format_textbook_lines, print_lines, AppContext,
    GlobalOptions,
};
use crate::commands::dashboard::show_dashboard;
use crate::error::CliError;

/// Follows the route guard from `path` and renders the screen it settles on.
pub async fn run_open(options: &GlobalOptions, path: &str) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    let landing = landing_route(path, context.session.is_authenticated());
    if let Some(target) = landing.redirected {
        eprintln!("Redirected to {}", target.path());
    }

    match landing.route {
        Route::Login => {
            println!("Sign in with `eduadmin login --username <name> --password <password>`.");
        }
        Route::Dashboard => show_dashboard(&context, false).await?,
        Route::Tests => {
            let mut screen = TestsScreen::default();
            screen.load(context.api()).await?;
            print_lines(format_test_lines(screen.tests()), "No tests yet.");
        }
        Route::Textbooks => {
            let mut screen = TextbooksScreen::default();
            screen.load(context.api()).await?;
            print_lines(
                format_textbook_lines(&screen.filtered()),
                "No textbooks found.",
            );
        }
        Route::Notes => {
            let mut screen = NotesScreen::default();
            screen.load(context.api()).await?;
            print_lines(format_note_lines(&screen.filtered()), "No notes found.");
        }
    }
    Ok(())
}

/// Screen reached from a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub route: Route,
    /// Set when the guard sent the request somewhere else.
    pub redirected: Option<Route>,
}

pub fn landing_route(path: &str, authenticated: bool) -> Landing {
    let route = RouteGuard::resolve(path, authenticated);
    let redirected = match RouteGuard::evaluate(path, authenticated) {
        Navigation::Render(_) => None,
        Navigation::Redirect(_) => Some(route),
    };
    Landing { route, redirected }
}

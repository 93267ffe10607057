use eduadmin_core::screens::{DashboardScreen, DashboardState};
use eduadmin_core::Route;

use crate::commands::common::{format_dashboard_lines, print_lines, AppContext, GlobalOptions};
use crate::error::CliError;

pub async fn run_dashboard(options: &GlobalOptions, as_json: bool) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    show_dashboard(&context, as_json).await
}

pub async fn show_dashboard(context: &AppContext, as_json: bool) -> Result<(), CliError> {
    context.enter(Route::Dashboard)?;

    let mut screen = DashboardScreen::default();
    match screen.refresh(context.api()).await {
        DashboardState::Ready(metrics) if as_json => {
            println!("{}", serde_json::to_string_pretty(metrics)?);
        }
        DashboardState::Ready(metrics) => {
            print_lines(format_dashboard_lines(metrics), "");
        }
        DashboardState::Failed(message) => {
            return Err(CliError::MetricsUnavailable(message.clone()));
        }
        DashboardState::Loading => println!("Loading..."),
    }
    Ok(())
}

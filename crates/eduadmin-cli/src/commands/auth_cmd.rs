use crate::commands::common::{AppContext, GlobalOptions};
use crate::error::CliError;

pub async fn run_login(
    options: &GlobalOptions,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let mut context = AppContext::build(options)?;
    if !context.session.login(username, password).await {
        return Err(CliError::LoginFailed);
    }
    println!(
        "Signed in profile '{}' as {username}",
        context.profile_name
    );
    Ok(())
}

pub fn run_logout(options: &GlobalOptions) -> Result<(), CliError> {
    let mut context = AppContext::build(options)?;
    context.session.logout();
    println!("Signed out profile '{}'", context.profile_name);
    Ok(())
}

pub fn run_status(options: &GlobalOptions) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    let state = if context.session.is_authenticated() {
        "signed in"
    } else {
        "not signed in"
    };
    println!("Profile '{}' is {state}.", context.profile_name);
    println!("API: {}", context.api().base_url());
    println!("Token storage: {}", context.token_store.describe());
    Ok(())
}

/// Creates an account; the current session is left untouched.
pub async fn run_register(
    options: &GlobalOptions,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    let response = context.session.register(username, password).await?;
    let message = response
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Registration successful");
    println!("{message}");
    println!("Run `eduadmin login --username {username} --password <password>` to sign in.");
    Ok(())
}

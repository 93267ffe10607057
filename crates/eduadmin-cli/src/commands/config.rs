use std::path::PathBuf;

use eduadmin_core::config::normalize_base_url;
use eduadmin_core::util::non_blank;

use crate::cli::ConfigCommands;
use crate::commands::common::GlobalOptions;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, options: &GlobalOptions) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_base_url,
            no_activate,
        } => run_config_init(
            options.profile.as_deref(),
            api_base_url,
            options.token_file.clone(),
            no_activate,
        ),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    token_file: Option<PathBuf>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let api_base_url = non_blank(api_base_url)
        .map(|url| normalize_base_url(&url))
        .transpose()?;

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(url) = api_base_url {
        profile.api_base_url = Some(url);
    }
    if let Some(path) = token_file {
        profile.token_file = Some(path);
    }
    let summary = describe_profile(
        profile.api_base_url(),
        profile.token_file.as_ref().map(|path| path.display().to_string()),
    );

    if !no_activate || config.active_profile.is_none() {
        config.active_profile = Some(profile_name.clone());
    }
    let path = config.save().map_err(CliError::Config)?;

    println!("Saved profile '{profile_name}' to {}", path.display());
    for line in summary {
        println!("  {line}");
    }
    if config.active_profile.as_deref() == Some(profile_name.as_str()) {
        println!("Active profile: {profile_name}");
    }
    Ok(())
}

pub fn describe_profile(api_base_url: Option<String>, token_file: Option<String>) -> Vec<String> {
    vec![
        format!(
            "api_base_url: {}",
            api_base_url.as_deref().unwrap_or("(default)")
        ),
        format!(
            "token storage: {}",
            token_file.map_or_else(|| "OS keychain".to_string(), |path| format!("file {path}"))
        ),
    ]
}

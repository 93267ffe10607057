use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use eduadmin_core::models::TextbookDraft;
use eduadmin_core::screens::TextbooksScreen;
use eduadmin_core::{ProgressCallback, Route, TextbookUpload, UploadProgress};

use crate::cli::TextbookCommands;
use crate::commands::common::{
    apply_update, format_textbook_lines, normalize_identifier, print_lines, AppContext,
    GlobalOptions, PromptConfirmation,
};
use crate::error::CliError;

pub async fn run_textbooks(
    options: &GlobalOptions,
    command: TextbookCommands,
) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    context.enter(Route::Textbooks)?;
    let api = context.api();

    let mut screen = TextbooksScreen::default();
    screen.load(api).await?;

    match command {
        TextbookCommands::List { search, json } => {
            screen.set_search_term(search.unwrap_or_default());
            let textbooks = screen.filtered();
            if json {
                println!("{}", serde_json::to_string_pretty(&textbooks)?);
            } else {
                print_lines(format_textbook_lines(&textbooks), "No textbooks found.");
            }
        }
        TextbookCommands::Create {
            title,
            author,
            subject,
            grade_level,
            file,
        } => {
            let upload = read_upload(file.as_deref()).await?;
            let draft = TextbookDraft {
                id: None,
                title,
                author,
                subject,
                grade_level,
            };
            save_with_progress(&mut screen, &context, &draft, upload.as_ref()).await?;
            println!("Uploaded textbook \"{}\"", draft.title);
        }
        TextbookCommands::Update {
            id,
            title,
            author,
            subject,
            grade_level,
            file,
        } => {
            let id = normalize_identifier("Textbook", &id)?;
            let mut draft = screen
                .draft_for(&id)
                .ok_or_else(|| CliError::NotFound("Textbook", id.clone()))?;
            apply_update(&mut draft.title, title);
            apply_update(&mut draft.author, author);
            apply_update(&mut draft.subject, subject);
            apply_update(&mut draft.grade_level, grade_level);
            let upload = read_upload(file.as_deref()).await?;
            save_with_progress(&mut screen, &context, &draft, upload.as_ref()).await?;
            println!("Updated textbook {id}");
        }
        TextbookCommands::Delete { id, yes } => {
            let id = normalize_identifier("Textbook", &id)?;
            if screen.find(&id).is_none() {
                return Err(CliError::NotFound("Textbook", id));
            }
            if !screen
                .delete(api, &id, &PromptConfirmation::new(yes))
                .await?
            {
                return Err(CliError::Cancelled);
            }
            println!("Deleted textbook {id}");
        }
    }

    Ok(())
}

async fn read_upload(path: Option<&Path>) -> Result<Option<TextbookUpload>, CliError> {
    match path {
        Some(path) => Ok(Some(TextbookUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

async fn save_with_progress(
    screen: &mut TextbooksScreen,
    context: &AppContext,
    draft: &TextbookDraft,
    upload: Option<&TextbookUpload>,
) -> Result<(), CliError> {
    let show_progress = upload.is_some();
    let observer: ProgressCallback = Arc::new(move |progress: UploadProgress| {
        if show_progress {
            eprint!("\r{}", progress_label(progress));
            let _ = io::stderr().flush();
        }
    });

    let result = screen
        .save(context.api(), draft, upload, Some(observer))
        .await;
    if show_progress {
        eprintln!();
    }
    Ok(result?)
}

pub fn progress_label(progress: UploadProgress) -> String {
    format!("Uploading... {:>3}%", progress.percent())
}

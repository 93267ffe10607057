use eduadmin_core::models::NoteDraft;
use eduadmin_core::screens::NotesScreen;
use eduadmin_core::Route;

use crate::cli::NoteCommands;
use crate::commands::common::{
    apply_update, format_note_lines, normalize_identifier, print_lines, AppContext,
    GlobalOptions, PromptConfirmation,
};
use crate::error::CliError;

pub async fn run_notes(options: &GlobalOptions, command: NoteCommands) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    context.enter(Route::Notes)?;
    let api = context.api();

    let mut screen = NotesScreen::default();
    screen.load(api).await?;

    match command {
        NoteCommands::List { search, json } => {
            screen.set_search_term(search.unwrap_or_default());
            let notes = screen.filtered();
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else {
                print_lines(format_note_lines(&notes), "No notes found.");
            }
        }
        NoteCommands::Create {
            title,
            content,
            board,
            class,
            subject,
        } => {
            let draft = NoteDraft {
                id: None,
                title,
                content,
                board,
                class,
                subject,
            };
            screen.save(api, &draft).await?;
            println!("Created note \"{}\"", draft.title);
        }
        NoteCommands::Update {
            id,
            title,
            content,
            board,
            class,
            subject,
        } => {
            let id = normalize_identifier("Note", &id)?;
            let mut draft = screen
                .draft_for(&id)
                .ok_or_else(|| CliError::NotFound("Note", id.clone()))?;
            apply_update(&mut draft.title, title);
            apply_update(&mut draft.content, content);
            apply_update(&mut draft.board, board);
            apply_update(&mut draft.class, class);
            apply_update(&mut draft.subject, subject);
            screen.save(api, &draft).await?;
            println!("Updated note {id}");
        }
        NoteCommands::Delete { id, yes } => {
            let id = normalize_identifier("Note", &id)?;
            if screen.find(&id).is_none() {
                return Err(CliError::NotFound("Note", id));
            }
            if !screen
                .delete(api, &id, &PromptConfirmation::new(yes))
                .await?
            {
                return Err(CliError::Cancelled);
            }
            println!("Deleted note {id}");
        }
    }

    Ok(())
}

use eduadmin_core::models::{QuestionDraft, TestDraft};
use eduadmin_core::screens::TestsScreen;
use eduadmin_core::Route;

use crate::cli::{QuestionCommands, TestCommands};
use crate::commands::common::{
    apply_update, format_question_lines, format_test_lines, normalize_identifier, print_lines,
    AppContext, GlobalOptions, PromptConfirmation,
};
use crate::error::CliError;

pub async fn run_tests(options: &GlobalOptions, command: TestCommands) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    context.enter(Route::Tests)?;
    let api = context.api();

    let mut screen = TestsScreen::default();
    screen.load(api).await?;

    match command {
        TestCommands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(screen.tests())?);
            } else {
                print_lines(format_test_lines(screen.tests()), "No tests yet.");
            }
        }
        TestCommands::Create { title, description } => {
            let draft = TestDraft::new(title, description);
            screen.save(api, &draft).await?;
            println!("Created test \"{}\"", draft.title);
        }
        TestCommands::Update {
            id,
            title,
            description,
        } => {
            let id = normalize_identifier("Test", &id)?;
            let mut draft = screen
                .draft_for(&id)
                .ok_or_else(|| CliError::NotFound("Test", id.clone()))?;
            apply_update(&mut draft.title, title);
            apply_update(&mut draft.description, description);
            screen.save(api, &draft).await?;
            println!("Updated test {id}");
        }
        TestCommands::Delete { id, yes } => {
            let id = normalize_identifier("Test", &id)?;
            if screen.find(&id).is_none() {
                return Err(CliError::NotFound("Test", id));
            }
            if !screen
                .delete(api, &id, &PromptConfirmation::new(yes))
                .await?
            {
                return Err(CliError::Cancelled);
            }
            println!("Deleted test {id}");
        }
    }

    Ok(())
}

pub async fn run_questions(
    options: &GlobalOptions,
    command: QuestionCommands,
) -> Result<(), CliError> {
    let context = AppContext::build(options)?;
    context.enter(Route::Tests)?;
    let api = context.api();

    let mut screen = TestsScreen::default();
    screen.load(api).await?;

    let test_id = match &command {
        QuestionCommands::List { test_id, .. }
        | QuestionCommands::Add { test_id, .. }
        | QuestionCommands::Delete { test_id, .. } => normalize_identifier("Test", test_id)?,
    };
    let mut dialog = screen
        .open_questions(&test_id)
        .ok_or_else(|| CliError::NotFound("Test", test_id.clone()))?;

    match command {
        QuestionCommands::List { json, .. } => {
            if json {
                println!("{}", serde_json::to_string_pretty(dialog.questions())?);
            } else {
                print_lines(
                    format_question_lines(dialog.questions()),
                    "No questions yet.",
                );
            }
        }
        QuestionCommands::Add {
            text,
            options,
            answer,
            ..
        } => {
            let draft = QuestionDraft::from_form(text, &options, answer);
            let question = dialog.add(api, &draft).await?;
            println!("{}", question.id);
        }
        QuestionCommands::Delete {
            question_id, yes, ..
        } => {
            let question_id = normalize_identifier("Question", &question_id)?;
            if !dialog
                .questions()
                .iter()
                .any(|question| question.id == question_id)
            {
                return Err(CliError::NotFound("Question", question_id));
            }
            if !dialog
                .delete(api, &question_id, &PromptConfirmation::new(yes))
                .await?
            {
                return Err(CliError::Cancelled);
            }
            println!("Deleted question {question_id}");
        }
    }

    Ok(())
}

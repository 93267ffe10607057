use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "eduadmin")]
#[command(about = "Manage tests, textbooks and study notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for API and session configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// API base URL (overrides EDUADMIN_API_URL and the profile)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Store the session token in this file instead of the OS keychain
    #[arg(long, global = true, value_name = "PATH")]
    pub token_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Clear the stored session token
    Logout,
    /// Show session status for the profile
    Status,
    /// Create an administrator account
    Register {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Navigate to a console path (e.g. /tests) through the route guard
    Open {
        /// Console path
        path: String,
    },
    /// Show dashboard metrics
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage tests
    Tests {
        #[command(subcommand)]
        command: TestCommands,
    },
    /// Manage the questions of a test
    Questions {
        #[command(subcommand)]
        command: QuestionCommands,
    },
    /// Manage textbooks
    Textbooks {
        #[command(subcommand)]
        command: TextbookCommands,
    },
    /// Manage study notes
    Notes {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum TestCommands {
    /// List tests
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a test
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update a test's title or description
    Update {
        /// Test ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a test
    Delete {
        /// Test ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum QuestionCommands {
    /// List the questions of a test
    List {
        /// Test ID
        test_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a question to a test
    Add {
        /// Test ID
        test_id: String,
        /// Question text
        #[arg(long)]
        text: String,
        /// Comma separated options, e.g. "A,B,C"
        #[arg(long)]
        options: String,
        /// Correct answer
        #[arg(long)]
        answer: String,
    },
    /// Delete a question from a test
    Delete {
        /// Test ID
        test_id: String,
        /// Question ID
        question_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TextbookCommands {
    /// List textbooks
    List {
        /// Case-insensitive filter on title, author and subject
        #[arg(long, short)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a new textbook
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        grade_level: String,
        /// File to upload
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Update textbook details and optionally replace its file
    Update {
        /// Textbook ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        grade_level: Option<String>,
        /// Replacement file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Delete a textbook
    Delete {
        /// Textbook ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// List notes
    List {
        /// Case-insensitive filter on title, content, board, class and subject
        #[arg(long, short)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a note
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value = "")]
        class: String,
        #[arg(long, default_value = "")]
        subject: String,
    },
    /// Update a note
    Update {
        /// Note ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        board: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        subject: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    ///
    /// The profile is chosen with `--profile`; `--token-file` is saved as the
    /// profile's token storage.
    Init {
        /// API base URL, e.g. <https://admin.example.com/api>
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

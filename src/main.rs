//! # tudu
//!
//! A personal task tracker for the terminal. tudu combines a scriptable CLI
//! for quick entry with an interactive TUI for day-to-day use.
//!
//! ## Features
//!
//! *   **Tasks**: title, optional description and due date, completion flag.
//! *   **Progress**: aggregate completion shown as a gauge (TUI) or summary (CLI).
//! *   **Search / Sort / Filter**: live substring search over title and
//!     description, sort by creation date, due date, or title, filter by
//!     completion status.
//! *   **Login gate**: a mock credential check (`user` / `password`) that
//!     routes the TUI between the login form and the task list. It is not
//!     access control; CLI task commands work regardless.
//! *   **Data Persistence**: the whole task list is saved as JSON after every
//!     change and restored once at startup.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Run without arguments to launch the interactive UI:
//!
//! ```bash
//! tudu
//! # or explicitly
//! tudu ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Login View**
//! *   `Tab`: Switch field
//! *   `Enter`: Log in
//! *   `Esc`: Quit
//!
//! **Task View**
//! *   `q`: Quit
//! *   `a`: Add new task
//! *   `Space`: Toggle completed
//! *   `d`: Delete selected task
//! *   `n`: Edit title
//! *   `i`: Edit description
//! *   `t`: Edit due date
//! *   `/`: Search
//! *   `s`: Cycle sort (created / due / title)
//! *   `f`: Cycle filter (all / completed / pending)
//! *   `l`: Log out
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Add tasks
//! tudu add "Buy milk" --description "From the corner shop" --due 2025-12-01
//!
//! # List pending tasks; --all includes completed ones
//! tudu list
//! tudu list --all --sort title --search milk
//!
//! # Toggle / remove / edit
//! tudu toggle <ID>
//! tudu remove <ID>
//! tudu edit <ID> --title "Buy oat milk"
//!
//! # Completion progress
//! tudu progress
//!
//! # Session
//! tudu login --username user --password password
//! tudu status
//! tudu logout
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory, one file per key:
//! *   Linux: `~/.local/share/tudu/todos`
//! *   macOS: `~/Library/Application Support/tudu/todos`
//!
//! Override the directory with the `TUDU_DATA` environment variable.
//!
//! A compatibility quirk is preserved from the app this data format comes
//! from: deleting the last remaining task does not persist the now-empty
//! list, so it reappears on the next start. Set `TUDU_PERSIST_EMPTY=1` to
//! persist empty lists like any other state.

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use tudu::commands::*;
use tudu::tui::run_tui;

#[derive(Parser)]
#[command(name = "tudu")]
#[command(about = "Personal task tracker for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Optional description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Due date in YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Show completed tasks too
        #[arg(short, long)]
        all: bool,
        /// Filter by status (all, completed, pending)
        #[arg(short, long)]
        filter: Option<String>,
        /// Sort order (created, due, title)
        #[arg(short, long)]
        sort: Option<String>,
        /// Search in title and description
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Toggle a task's completed flag
    Toggle {
        id: u64,
    },
    /// Remove a task
    Remove {
        id: u64,
    },
    /// Edit a task
    Edit {
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Show aggregate completion progress
    Progress,
    /// Log in with the mock credentials
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the current login state
    Status,
    /// Delete all tasks
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { title, description, due }) => cmd_add(title, description, due, false),
        Some(Commands::List { all, filter, sort, search }) => cmd_list(all, filter, sort, search),
        Some(Commands::Toggle { id }) => cmd_toggle(id, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Edit { id, title, description, due }) => {
            cmd_edit(id, title, description, due, false)
        }
        Some(Commands::Progress) => cmd_progress(),
        Some(Commands::Login { username, password }) => cmd_login(username, password, false),
        Some(Commands::Logout) => cmd_logout(false),
        Some(Commands::Status) => cmd_status(),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "tudu", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}

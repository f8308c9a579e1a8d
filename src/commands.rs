use std::io::{self, Write};

use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::auth::{AuthGate, AuthStatus};
use crate::models::{Todo, TodoDraft};
use crate::storage::{FileStore, KeyValue};
use crate::store::{Action, StoreOptions, TodoStore, TODOS_KEY};
use crate::views::{self, SortOption, StatusFilter};

/// Opens the file-backed store and runs the one-time restore.
///
/// The empty-write guard is on unless `TUDU_PERSIST_EMPTY` is set, matching
/// the behavior the stored data has always seen.
pub fn open_store() -> TodoStore<FileStore> {
    let options = StoreOptions {
        skip_empty_writes: std::env::var_os("TUDU_PERSIST_EMPTY").is_none(),
    };
    let mut store = TodoStore::with_options(FileStore::new(), options);
    store.restore();
    store
}

pub fn open_auth() -> AuthGate<FileStore> {
    let mut gate = AuthGate::new(FileStore::new());
    gate.resolve();
    gate
}

fn parse_due(due: &str, silent: bool) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", due, e); }
            None
        }
    }
}

/// Adds a new task. The title must be non-empty after trimming; that check
/// lives here, at the UI boundary, so the store never sees the invalid add.
pub fn cmd_add(title: String, description: Option<String>, due: Option<String>, silent: bool) {
    if title.trim().is_empty() {
        if !silent { eprintln!("Task title is required."); }
        return;
    }
    let due_date = match due {
        Some(d) => match parse_due(&d, silent) {
            Some(date) => Some(date),
            None => return,
        },
        None => None,
    };

    let mut store = open_store();
    let id = store.add(TodoDraft {
        title,
        description,
        due_date,
    });
    if !silent { println!("Task added (id = {})", id); }
}

/// Toggles a task's completed flag by ID.
pub fn cmd_toggle(id: u64, silent: bool) {
    let mut store = open_store();
    let Some(todo) = store.state().todos.iter().find(|t| t.id == id) else {
        if !silent { eprintln!("Task {} not found.", id); }
        return;
    };
    let was_completed = todo.completed;
    store.dispatch(Action::Toggle(id));
    if !silent {
        if was_completed {
            println!("Task {} marked as pending.", id);
        } else {
            println!("Task {} marked as complete.", id);
        }
    }
}

/// Removes a task by ID.
pub fn cmd_remove(id: u64, silent: bool) {
    let mut store = open_store();
    if !store.state().todos.iter().any(|t| t.id == id) {
        if !silent { eprintln!("Task {} not found.", id); }
        return;
    }
    store.dispatch(Action::Delete(id));
    if !silent { println!("Task {} removed.", id); }
}

/// Edits an existing task. The changed fields are merged into a copy of the
/// current record and the result replaces it wholesale; id and creation date
/// are never touched.
pub fn cmd_edit(
    id: u64,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    silent: bool,
) {
    let mut store = open_store();
    let Some(current) = store.state().todos.iter().find(|t| t.id == id).cloned() else {
        if !silent { eprintln!("Task {} not found.", id); }
        return;
    };

    let mut updated = current;
    if let Some(t) = title {
        if t.trim().is_empty() {
            if !silent { eprintln!("Task title is required."); }
            return;
        }
        updated.title = t;
    }
    if let Some(d) = description {
        updated.description = Some(d);
    }
    if let Some(d) = due {
        match parse_due(&d, silent) {
            Some(date) => updated.due_date = Some(date),
            None => return,
        }
    }

    store.dispatch(Action::Edit(updated));
    if !silent { println!("Task {} updated.", id); }
}

/// Lists tasks in a formatted table.
///
/// Completed tasks are hidden unless `all` is set or an explicit filter asks
/// for them. `filter`, `sort`, and `search` mirror the interactive view
/// options.
pub fn cmd_list(all: bool, filter: Option<String>, sort: Option<String>, search: Option<String>) {
    let status = match filter.as_deref() {
        Some(raw) => match StatusFilter::parse(raw) {
            Some(f) => f,
            None => {
                eprintln!("Unknown filter '{}'. Use all, completed, or pending.", raw);
                return;
            }
        },
        None if all => StatusFilter::All,
        None => StatusFilter::Pending,
    };
    let sort = match sort.as_deref() {
        Some(raw) => match SortOption::parse(raw) {
            Some(s) => s,
            None => {
                eprintln!("Unknown sort '{}'. Use created, due, or title.", raw);
                return;
            }
        },
        None => SortOption::CreationDate,
    };

    let store = open_store();
    let query = search.unwrap_or_default();
    let todos = views::apply(&store.state().todos, &query, status, sort);
    if todos.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in todos {
        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(t.description.clone().unwrap_or_default()),
            Cell::new(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(t.created_at().format("%Y-%m-%d").to_string()),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Prints aggregate completion progress.
pub fn cmd_progress() {
    let store = open_store();
    let todos = &store.state().todos;
    let completed = todos.iter().filter(|t| t.completed).count();
    let ratio = views::progress(todos);
    println!(
        "Completed: {}/{} ({:.1}%)",
        completed,
        todos.len(),
        ratio * 100.0
    );
}

/// Attempts a login with the mock credential check.
pub fn cmd_login(username: String, password: String, silent: bool) {
    let mut gate = open_auth();
    match gate.login(&username, &password) {
        Ok(()) => {
            if !silent { println!("Logged in."); }
        }
        Err(e) => {
            if !silent { eprintln!("Login failed: {}", e); }
        }
    }
}

/// Clears the stored session token.
pub fn cmd_logout(silent: bool) {
    let mut gate = open_auth();
    match gate.logout() {
        Ok(()) => {
            if !silent { println!("Logged out."); }
        }
        Err(e) => {
            if !silent { eprintln!("Logout failed: {}", e); }
        }
    }
}

/// Prints the current login state.
pub fn cmd_status() {
    let gate = open_auth();
    if gate.status() == AuthStatus::LoggedIn {
        println!("Logged in.");
    } else {
        println!("Logged out.");
    }
}

/// Deletes all stored tasks (and nothing else; the session token stays).
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            eprintln!("Aborted.");
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = FileStore::new().remove(TODOS_KEY) {
        eprintln!("Failed to reset tasks: {}", e);
    } else {
        println!("All tasks deleted.");
    }
}

/// Reads the persisted collection directly, without opening a store. Unlike
/// a restore this reflects exactly what is on disk right now.
pub fn load_persisted() -> Vec<Todo> {
    match FileStore::new().get(TODOS_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        _ => Vec::new(),
    }
}

use chrono::NaiveDate;
use ratatui::widgets::TableState;

use crate::auth::{AuthGate, AuthStatus};
use crate::commands::{open_auth, open_store};
use crate::models::{Todo, TodoDraft};
use crate::storage::FileStore;
use crate::store::{Action, TodoStore};
use crate::views::{self, SortOption, StatusFilter};

#[derive(PartialEq)]
pub enum Screen {
    Login,
    Tasks,
}

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Adding,
    Editing,
}

pub enum InputField {
    None,
    Title,
    Description,
    Due,
}

#[derive(PartialEq)]
pub enum LoginField {
    Username,
    Password,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub description: Option<String>,
    pub due: String,
    pub step: usize, // 0: Title, 1: Description, 2: Due
}

pub struct App {
    pub store: TodoStore<FileStore>,
    pub auth: AuthGate<FileStore>,
    pub screen: Screen,
    /// Projection of the collection under the current view options.
    pub visible: Vec<Todo>,
    pub state: TableState,
    pub search: String,
    pub filter: StatusFilter,
    pub sort: SortOption,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub input_error: Option<String>,
    pub target_id: Option<u64>,
    pub add_state: AddState,
    // Login form
    pub login_field: LoginField,
    pub username: String,
    pub password: String,
    pub login_error: Option<String>,
}

impl App {
    /// Creates the app, restores the store, and resolves the auth gate. Both
    /// finish before the first frame, so the UI never renders from an
    /// unrestored store or an unknown login state.
    pub fn new() -> App {
        let store = open_store();
        let auth = open_auth();
        let screen = match auth.status() {
            AuthStatus::LoggedIn => Screen::Tasks,
            _ => Screen::Login,
        };

        let mut app = App {
            store,
            auth,
            screen,
            visible: Vec::new(),
            state: TableState::default(),
            search: String::new(),
            filter: StatusFilter::All,
            sort: SortOption::CreationDate,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            input_error: None,
            target_id: None,
            add_state: AddState::default(),
            login_field: LoginField::Username,
            username: String::new(),
            password: String::new(),
            login_error: None,
        };
        app.refresh();
        app
    }

    /// Recomputes the visible projection and keeps the selection in range.
    pub fn refresh(&mut self) {
        self.visible = views::apply(&self.store.state().todos, &self.search, self.filter, self.sort);
        if self.visible.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.visible.len() {
                self.state.select(Some(self.visible.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn progress(&self) -> f64 {
        views::progress(&self.store.state().todos)
    }

    /// Selects the next task, wrapping around.
    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task, wrapping around.
    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_id(&self) -> Option<u64> {
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|t| t.id)
    }

    /// Flips the completed flag on the selected task.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.dispatch(Action::Toggle(id));
            self.refresh();
        }
    }

    /// Deletes the selected task.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.dispatch(Action::Delete(id));
            self.refresh();
        }
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
        self.input_error = None;
    }

    /// Initiates editing of one field of the selected task, pre-filling the
    /// buffer with its current value.
    pub fn start_edit(&mut self, field: InputField) {
        let Some(i) = self.state.selected() else { return };
        let Some(t) = self.visible.get(i) else { return };
        self.target_id = Some(t.id);
        self.input_buffer = match field {
            InputField::Title => t.title.clone(),
            InputField::Description => t.description.clone().unwrap_or_default(),
            InputField::Due => t.due_date.map(|d| d.to_string()).unwrap_or_default(),
            InputField::None => return,
        };
        self.input_field = field;
        self.input_mode = InputMode::Editing;
        self.input_error = None;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
    }

    /// Handles Enter in the add wizard and the field editor.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Title is the one required field
                if self.input_buffer.trim().is_empty() {
                    self.input_error = Some("Task title is required".into());
                    return;
                }
                self.add_state.title = self.input_buffer.clone();
                self.add_state.step += 1;
                self.input_buffer.clear();
                self.input_error = None;
            }
            1 => {
                if !self.input_buffer.is_empty() {
                    self.add_state.description = Some(self.input_buffer.clone());
                }
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            2 => {
                let due_date = if self.input_buffer.is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(&self.input_buffer, "%Y-%m-%d") {
                        Ok(d) => Some(d),
                        Err(_) => {
                            self.input_error = Some("Use YYYY-MM-DD".into());
                            return;
                        }
                    }
                };
                self.store.add(TodoDraft {
                    title: self.add_state.title.clone(),
                    description: self.add_state.description.clone(),
                    due_date,
                });
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
                self.refresh();
            }
            _ => {}
        }
    }

    fn handle_editing_input(&mut self) {
        let Some(id) = self.target_id else { return };
        let Some(current) = self.store.state().todos.iter().find(|t| t.id == id).cloned() else {
            self.cancel_input();
            return;
        };

        let mut updated = current;
        match self.input_field {
            InputField::Title => {
                if self.input_buffer.trim().is_empty() {
                    self.input_error = Some("Task title is required".into());
                    return;
                }
                updated.title = self.input_buffer.clone();
            }
            InputField::Description => {
                updated.description = if self.input_buffer.is_empty() {
                    None
                } else {
                    Some(self.input_buffer.clone())
                };
            }
            InputField::Due => {
                updated.due_date = if self.input_buffer.is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(&self.input_buffer, "%Y-%m-%d") {
                        Ok(d) => Some(d),
                        Err(_) => {
                            self.input_error = Some("Use YYYY-MM-DD".into());
                            return;
                        }
                    }
                };
            }
            InputField::None => {}
        }
        self.store.dispatch(Action::Edit(updated));
        self.cancel_input();
        self.refresh();
    }

    // Search

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn search_push(&mut self, c: char) {
        self.search.push(c);
        self.refresh();
    }

    pub fn search_pop(&mut self) {
        self.search.pop();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.input_mode = InputMode::Normal;
        self.refresh();
    }

    // View options

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.refresh();
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.refresh();
    }

    // Login form

    pub fn login_switch_field(&mut self) {
        self.login_field = match self.login_field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn login_push(&mut self, c: char) {
        match self.login_field {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn login_pop(&mut self) {
        match self.login_field {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    pub fn login_submit(&mut self) {
        match self.auth.login(&self.username, &self.password) {
            Ok(()) => {
                self.screen = Screen::Tasks;
                self.login_error = None;
                self.password.clear();
                self.refresh();
            }
            Err(e) => {
                self.login_error = Some(e.to_string());
                self.password.clear();
            }
        }
    }

    pub fn logout(&mut self) {
        match self.auth.logout() {
            Ok(()) => {
                self.screen = Screen::Login;
                self.username.clear();
                self.password.clear();
                self.login_field = LoginField::Username;
            }
            Err(e) => {
                self.input_error = Some(format!("Logout failed: {}", e));
            }
        }
    }
}

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::{Todo, TodoDraft};
use crate::storage::KeyValue;

/// Storage key for the whole task collection.
pub const TODOS_KEY: &str = "todos";

/// The actions the store accepts. This enum is the entire mutation surface:
/// UI layers dispatch these and nothing else.
#[derive(Debug, Clone)]
pub enum Action {
    /// Append an already-stamped record to the end of the collection.
    Add(Todo),
    /// Remove the record with the given id; unmatched ids are ignored.
    Delete(u64),
    /// Flip `completed` on the matching record; unmatched ids are ignored.
    Toggle(u64),
    /// Replace the matching record wholesale with the payload. Never inserts:
    /// an unmatched id leaves the collection untouched.
    Edit(Todo),
    /// Replace the entire collection. Used once, at restore time.
    Set(Vec<Todo>),
}

/// The store's state: the ordered task collection and nothing else. Counts,
/// filters, and sorts are computed by readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    pub todos: Vec<Todo>,
}

/// Pure reducer: maps (state, action) to the next state. No I/O, no clocks.
pub fn reduce(state: TodoState, action: Action) -> TodoState {
    let mut todos = state.todos;
    match action {
        Action::Add(todo) => todos.push(todo),
        Action::Delete(id) => todos.retain(|t| t.id != id),
        Action::Toggle(id) => {
            if let Some(t) = todos.iter_mut().find(|t| t.id == id) {
                t.completed = !t.completed;
            }
        }
        Action::Edit(todo) => {
            if let Some(t) = todos.iter_mut().find(|t| t.id == todo.id) {
                *t = todo;
            }
        }
        Action::Set(new_todos) => todos = new_todos,
    }
    TodoState { todos }
}

/// Tunable persistence behavior.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// When true, a write that would persist an empty collection is skipped.
    /// This reproduces the historical guard in the app this store came from:
    /// deleting the last task does not persist the empty list, so a later
    /// restore resurrects it. Kept as the default for compatibility; disable
    /// to persist empty collections like any other state.
    pub skip_empty_writes: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            skip_empty_writes: true,
        }
    }
}

/// Failures surfaced by [`TodoStore::persist_now`]. Regular dispatches never
/// surface these: write failures after a dispatch are logged and swallowed,
/// and in-memory state is kept.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to serialize todos: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write todos: {0}")]
    Write(#[from] std::io::Error),
}

type Subscriber = Box<dyn FnMut(&TodoState)>;

/// The task store: owns the in-memory collection, applies actions through the
/// pure [`reduce`] function, and saves the whole collection to its gateway
/// after every change.
///
/// Single-threaded by design. Dispatch is the only mutation entry point and
/// is expected to be called from one event-handling context, so there is no
/// locking and no internal concurrency.
pub struct TodoStore<S: KeyValue> {
    state: TodoState,
    storage: S,
    options: StoreOptions,
    loading: bool,
    subscribers: Vec<Subscriber>,
}

impl<S: KeyValue> TodoStore<S> {
    pub fn new(storage: S) -> Self {
        TodoStore::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: S, options: StoreOptions) -> Self {
        TodoStore {
            state: TodoState::default(),
            storage,
            options,
            loading: true,
            subscribers: Vec::new(),
        }
    }

    /// Current state, read-only. Presentation concerns (sorting, filtering)
    /// belong to the caller; see [`crate::views`].
    pub fn state(&self) -> &TodoState {
        &self.state
    }

    /// True until [`restore`](Self::restore) has run. Callers should not
    /// render store-dependent views while loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Registers a callback invoked with the new state after every dispatch.
    pub fn subscribe(&mut self, f: impl FnMut(&TodoState) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// One-time restore of the persisted collection. A missing key or
    /// unparseable value means no prior data: the collection stays empty.
    /// Either way the store is considered ready afterwards. Restore itself
    /// never writes back to storage.
    pub fn restore(&mut self) {
        match self.storage.get(TODOS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Todo>>(&raw) {
                Ok(todos) => {
                    debug!(count = todos.len(), "restored todos from storage");
                    self.state = reduce(std::mem::take(&mut self.state), Action::Set(todos));
                }
                Err(e) => warn!("failed to parse stored todos, starting empty: {e}"),
            },
            Ok(None) => debug!("no stored todos, starting empty"),
            Err(e) => warn!("failed to read stored todos, starting empty: {e}"),
        }
        self.loading = false;
    }

    /// Applies an action, notifies subscribers, then saves the collection.
    /// Write failures are logged and swallowed; in-memory state is not
    /// rolled back.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
        for sub in &mut self.subscribers {
            sub(&self.state);
        }
        if self.state.todos.is_empty() && self.options.skip_empty_writes {
            debug!("skipping persist of empty todo collection");
            return;
        }
        if let Err(e) = self.persist_now() {
            warn!("failed to persist todos: {e}");
        }
    }

    /// Stamps the draft with a fresh id and creation date, then dispatches
    /// [`Action::Add`].
    ///
    /// Ids are wall-clock milliseconds, as the collection has always used,
    /// but bumped past the current maximum so two adds within the same
    /// millisecond cannot collide.
    pub fn add(&mut self, draft: TodoDraft) -> u64 {
        let id = self.next_id();
        self.dispatch(Action::Add(draft.into_todo(id)));
        id
    }

    /// Serializes and writes the collection unconditionally, bypassing the
    /// empty-write guard. Exposed for callers that need a definite save.
    pub fn persist_now(&self) -> Result<(), PersistError> {
        let raw = serde_json::to_string(&self.state.todos)?;
        self.storage.set(TODOS_KEY, &raw)?;
        Ok(())
    }

    fn next_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let max_existing = self.state.todos.iter().map(|t| t.id).max().unwrap_or(0);
        now.max(max_existing + 1)
    }
}

//! Read-only projections over the task collection.
//!
//! Search text, sort option, and status filter are view state owned by
//! whichever UI is presenting the list; none of it is persisted and none of
//! it touches the store. The functions here work on a copy of the collection
//! and leave the stored insertion order alone.

use chrono::NaiveDate;

use crate::models::Todo;

/// Completion filter applied before searching and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "completed" | "done" => Some(StatusFilter::Completed),
            "pending" | "open" => Some(StatusFilter::Pending),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::All,
        }
    }
}

/// Presentation order for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Newest first.
    #[default]
    CreationDate,
    /// Soonest first; tasks without a due date sort before dated ones.
    DueDate,
    /// Case-insensitive alphabetical.
    Title,
}

impl SortOption {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "created" | "creation" | "creationdate" => Some(SortOption::CreationDate),
            "due" | "duedate" => Some(SortOption::DueDate),
            "title" => Some(SortOption::Title),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::CreationDate => "Created",
            SortOption::DueDate => "Due",
            SortOption::Title => "Title",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortOption::CreationDate => SortOption::DueDate,
            SortOption::DueDate => SortOption::Title,
            SortOption::Title => SortOption::CreationDate,
        }
    }
}

/// Case-insensitive substring match over title and description.
pub fn matches_search(todo: &Todo, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    todo.title.to_lowercase().contains(&q)
        || todo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&q))
}

/// Filters, searches, and sorts a copy of the collection for display.
pub fn apply(todos: &[Todo], query: &str, filter: StatusFilter, sort: SortOption) -> Vec<Todo> {
    let mut out: Vec<Todo> = todos
        .iter()
        .filter(|t| match filter {
            StatusFilter::All => true,
            StatusFilter::Completed => t.completed,
            StatusFilter::Pending => !t.completed,
        })
        .filter(|t| matches_search(t, query))
        .cloned()
        .collect();

    match sort {
        SortOption::CreationDate => {
            out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }
        SortOption::DueDate => {
            // absent due dates coerce to the earliest representable date, so
            // undated tasks lead the list
            let key = |t: &Todo| t.due_date.unwrap_or(NaiveDate::MIN);
            out.sort_by(|a, b| key(a).cmp(&key(b)));
        }
        SortOption::Title => {
            out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        }
    }
    out
}

/// Fraction of the collection that is completed, 0.0 for an empty list.
pub fn progress(todos: &[Todo]) -> f64 {
    if todos.is_empty() {
        return 0.0;
    }
    let completed = todos.iter().filter(|t| t.completed).count();
    completed as f64 / todos.len() as f64
}

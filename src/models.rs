use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single task record.
///
/// Field names are serialized in camelCase so the persisted JSON matches the
/// format the store has always written under the `todos` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, assigned once at creation and never reassigned.
    pub id: u64,
    /// The task title. Non-empty after trimming; validated before dispatch.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional due date, stored as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Timestamp when the task was created (RFC 3339). Set once, never
    /// mutated by edits.
    pub creation_date: String,
}

/// The caller-supplied part of a new task, before the store stamps an `id`
/// and `creation_date` onto it.
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        TodoDraft {
            title: title.into(),
            ..TodoDraft::default()
        }
    }

    /// Turns the draft into a full record with the given id, stamped with the
    /// current time.
    pub fn into_todo(self, id: u64) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            completed: false,
            creation_date: Utc::now().to_rfc3339(),
        }
    }
}

impl Todo {
    /// Parses `creation_date` back into a timestamp, falling back to the Unix
    /// epoch for values written by hand or by older builds.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.creation_date)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_default()
    }
}

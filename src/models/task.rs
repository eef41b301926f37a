use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending,
    /// Task is currently being worked on.
    Running,
    /// Task is finished.
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Input payload for creating or fully updating a task.
///
/// The text fields default to empty strings when absent so the Task Service
/// can report a missing-fields error itself instead of a generic
/// deserialization failure. `due_date` arrives as an RFC 3339 string and is
/// parsed by the service, which owns the invalid-date error. Unknown fields
/// are rejected at the boundary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    /// Optional on creation, where it defaults to `pending`. A full update
    /// must supply it explicitly.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Query parameters accepted by the task listing endpoint.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

/// A task row joined with its creator, as fetched from the store.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i32,
    pub created_by_name: String,
}

/// The creator reference embedded in a task response: id and name only,
/// never the full user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creator {
    pub id: i32,
    pub name: String,
}

/// A task as returned by the API, with `createdBy` resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub created_by: Creator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            due_date: record.due_date,
            status: record.status,
            created_by: Creator {
                id: record.created_by,
                name: record.created_by_name,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

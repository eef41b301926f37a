//!
//! # Task Service
//!
//! The core of the application: every task operation passes through here,
//! which is where the validation and ownership rules live.
//!
//! - creation validates title/description/due date, requires the due date to
//!   lie in the future, and stamps the caller as `created_by`;
//! - listing is partitioned by ownership, with the admin override seeing all
//!   rows, and sorted only by whitelisted fields;
//! - fetch/update/delete share one id-and-ownership check: a malformed id
//!   and a missing row produce the same 404, a foreign task produces 403
//!   unless the caller is an admin.
//!
//! Update deliberately does not re-check that the due date is in the future;
//! the source system only applies that rule at creation, which allows
//! correcting a task whose deadline has already passed.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{ListQuery, Task, TaskInput, TaskRecord, TaskStatus};
use crate::store::{Sort, SortField, SortOrder, TaskStore};

pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: TaskStore::new(pool),
        }
    }

    /// Creates a task owned by the caller.
    ///
    /// Status is optional and defaults to `pending`. The due date must be
    /// strictly in the future.
    pub async fn create(
        &self,
        input: TaskInput,
        caller: &AuthenticatedUser,
    ) -> Result<Task, AppError> {
        let (due_date, status) = validate_create(&input, Utc::now())?;

        let id = Uuid::new_v4();
        self.store
            .insert(id, &input.title, &input.description, due_date, status, caller.id)
            .await?;

        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Created task missing on re-read".into()))?;

        Ok(Task::from(record))
    }

    /// Lists the tasks visible to the caller: all of them for an admin, only
    /// their own otherwise.
    pub async fn list(
        &self,
        query: &ListQuery,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<Task>, AppError> {
        let sort = parse_sort(query)?;
        let owner = if caller.is_admin {
            None
        } else {
            Some(caller.id)
        };

        let records = self.store.find_visible(owner, sort).await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    pub async fn get(&self, id: &str, caller: &AuthenticatedUser) -> Result<Task, AppError> {
        let record = self.fetch_authorized(id, caller).await?;
        Ok(Task::from(record))
    }

    /// Overwrites title, description, due date, and status. `created_by` is
    /// never altered.
    pub async fn update(
        &self,
        id: &str,
        input: TaskInput,
        caller: &AuthenticatedUser,
    ) -> Result<Task, AppError> {
        let record = self.fetch_authorized(id, caller).await?;
        let (due_date, status) = validate_update(&input)?;

        self.store
            .update(record.id, &input.title, &input.description, due_date, status)
            .await?;

        let record = self
            .store
            .find_by_id(record.id)
            .await?
            .ok_or_else(|| AppError::Internal("Updated task missing on re-read".into()))?;

        Ok(Task::from(record))
    }

    /// Permanently removes a task. There is no soft delete.
    pub async fn delete(&self, id: &str, caller: &AuthenticatedUser) -> Result<(), AppError> {
        let record = self.fetch_authorized(id, caller).await?;
        self.store.delete(record.id).await?;
        Ok(())
    }

    /// The shared id-and-ownership gate for get/update/delete.
    async fn fetch_authorized(
        &self,
        id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<TaskRecord, AppError> {
        let id = parse_task_id(id)?;
        let record = self.store.find_by_id(id).await?.ok_or_else(task_not_found)?;
        authorize(&record, caller)?;
        Ok(record)
    }
}

/// The single authorization rule: the task's owner, or any admin.
fn is_owner_or_admin(record: &TaskRecord, caller: &AuthenticatedUser) -> bool {
    record.created_by == caller.id || caller.is_admin
}

fn authorize(record: &TaskRecord, caller: &AuthenticatedUser) -> Result<(), AppError> {
    if is_owner_or_admin(record, caller) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You are not allowed to access this task".into(),
        ))
    }
}

/// A malformed id gets the same 404 as a missing row, so the response never
/// signals whether an id exists.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| task_not_found())
}

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

fn validate_create(
    input: &TaskInput,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, TaskStatus), AppError> {
    let due_date = validate_fields(input)?;
    if due_date <= now {
        return Err(AppError::Validation("Due date must be in the future".into()));
    }
    Ok((due_date, input.status.unwrap_or(TaskStatus::Pending)))
}

/// Unlike creation, a full update requires an explicit status and accepts a
/// due date in the past.
fn validate_update(input: &TaskInput) -> Result<(DateTime<Utc>, TaskStatus), AppError> {
    let due_date = validate_fields(input)?;
    let status = input
        .status
        .ok_or_else(|| AppError::Validation("All fields are required".into()))?;
    Ok((due_date, status))
}

fn validate_fields(input: &TaskInput) -> Result<DateTime<Utc>, AppError> {
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.due_date.trim().is_empty()
    {
        return Err(AppError::Validation("All fields are required".into()));
    }
    parse_due_date(&input.due_date)
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| AppError::Validation("Invalid due date".into()))
}

/// Builds the sort from the query string. An empty `sortField` (the client
/// sends `?sortField=` when no option is chosen) means the natural order;
/// anything outside the whitelist is rejected. Order defaults to descending.
fn parse_sort(query: &ListQuery) -> Result<Option<Sort>, AppError> {
    let field = match query.sort_field.as_deref() {
        None | Some("") => return Ok(None),
        Some("dueDate") => SortField::DueDate,
        Some("status") => SortField::Status,
        Some(_) => return Err(AppError::Validation("Invalid sort field".into())),
    };

    let order = match query.sort_order.as_deref() {
        None | Some("") => SortOrder::Desc,
        Some("asc") => SortOrder::Asc,
        Some("desc") => SortOrder::Desc,
        Some(_) => return Err(AppError::Validation("Invalid sort order".into())),
    };

    Ok(Some(Sort { field, order }))
}

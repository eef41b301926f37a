use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{TaskRecord, TaskStatus};

/// Fields a task can be sorted by. The ORDER BY clause is built only from
/// these closed enums, never from raw query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DueDate,
    Status,
}

impl SortField {
    fn column(&self) -> &'static str {
        match self {
            SortField::DueDate => "t.due_date",
            SortField::Status => "t.status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    /// The `id` tiebreak keeps the ordering deterministic so flipping the
    /// order flag reverses it cleanly.
    fn order_by(&self) -> String {
        format!(
            " ORDER BY {} {}, t.id ASC",
            self.field.column(),
            self.order.keyword()
        )
    }
}

const SELECT_TASK: &str =
    "SELECT t.id, t.title, t.description, t.due_date, t.status, t.created_at, t.updated_at,
            t.created_by, u.name AS created_by_name
     FROM tasks t
     JOIN users u ON u.id = t.created_by";

/// The Task Store: persistence for task records, joined with the creator so
/// every fetched row already carries the `{id, name}` reference the API
/// exposes.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
        due_date: chrono::DateTime<chrono::Utc>,
        status: TaskStatus,
        created_by: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tasks (id, title, description, due_date, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(status)
        .bind(created_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetches the tasks visible to a caller: all rows when `owner` is
    /// `None` (the admin path), otherwise only rows created by that user.
    /// Without a sort the store's natural order is returned.
    pub async fn find_visible(
        &self,
        owner: Option<i32>,
        sort: Option<Sort>,
    ) -> Result<Vec<TaskRecord>, sqlx::Error> {
        let mut sql = String::from(SELECT_TASK);
        if owner.is_some() {
            sql.push_str(" WHERE t.created_by = $1");
        }
        if let Some(sort) = sort {
            sql.push_str(&sort.order_by());
        }

        let mut query = sqlx::query_as::<_, TaskRecord>(&sql);
        if let Some(owner) = owner {
            query = query.bind(owner);
        }
        query.fetch_all(&self.pool).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TaskRecord>, sqlx::Error> {
        let sql = format!("{} WHERE t.id = $1", SELECT_TASK);
        sqlx::query_as::<_, TaskRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Overwrites the mutable fields of a task. `created_by` is never part
    /// of the update.
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
        due_date: chrono::DateTime<chrono::Utc>,
        status: TaskStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE tasks
             SET title = $1, description = $2, due_date = $3, status = $4, updated_at = now()
             WHERE id = $5",
        )
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

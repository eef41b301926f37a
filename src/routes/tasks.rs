use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{ListQuery, TaskInput},
    service::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Lists the tasks visible to the authenticated caller.
///
/// Admins see every task; everyone else sees only their own. Supports
/// `sortField` (`dueDate` or `status`) with `sortOrder` (`asc`/`desc`,
/// default `desc`); without a sort field the store's natural order is
/// returned.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, creators resolved to `{id, name}`.
/// - `400 Bad Request`: unknown sort field or order.
/// - `401 Unauthorized`: missing or invalid session token.
/// - `500 Internal Server Error`: database failure.
#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    query: web::Query<ListQuery>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = service.list(&query, &caller).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated caller.
///
/// ## Request body:
/// `{title, description, dueDate, status?}` — all strings, `dueDate` in
/// RFC 3339, `status` one of `pending`/`running`/`completed` and defaulting
/// to `pending`.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: missing fields, unparseable date, or a due date not
///   in the future.
/// - `401 Unauthorized` / `500 Internal Server Error`.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    task_data: web::Json<TaskInput>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service.create(task_data.into_inner(), &caller).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task by id.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: malformed id or no such task (indistinguishable).
/// - `403 Forbidden`: the caller is neither the owner nor an admin.
/// - `401 Unauthorized` / `500 Internal Server Error`.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<String>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service.get(&task_id, &caller).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Fully updates a task: title, description, due date, and status are all
/// required and overwritten in place. The creator never changes.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: missing fields or unparseable date.
/// - `404 Not Found` / `403 Forbidden` / `401 Unauthorized` / `500`.
#[put("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<String>,
    task_data: web::Json<TaskInput>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .update(&task_id, task_data.into_inner(), &caller)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Permanently deletes a task.
///
/// ## Responses:
/// - `200 OK`: `{message}` confirmation.
/// - `404 Not Found` / `403 Forbidden` / `401 Unauthorized` / `500`.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<String>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    service.delete(&task_id, &caller).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully"
    })))
}

pub mod task;
pub mod user;

pub use task::{Creator, ListQuery, Task, TaskInput, TaskRecord, TaskStatus};
pub use user::UserRecord;

pub mod tasks;
pub mod users;

pub use tasks::{Sort, SortField, SortOrder, TaskStore};
pub use users::UserStore;

pub mod sessions;
pub mod tasks;

pub use sessions::{Session, SessionService};
pub use tasks::TaskService;

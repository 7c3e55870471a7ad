//! Database Models

// Serde helpers
pub mod serde_helpers;

// Directory
pub mod employee;

// Tasks
pub mod task;

// Re-exports
pub use employee::{
    ChangePasswordRequest, Employee, EmployeeCreate, EmployeeId, EmployeeRef, EmployeeUpdate, Role,
};
pub use task::{
    AssigneeRef, Comment, CommentView, Task, TaskCreate, TaskPriority, TaskResponse, TaskStatus,
    TaskUpdate,
};

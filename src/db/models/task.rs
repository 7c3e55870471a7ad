//! Task Model
//!
//! Tasks own their comments by value: a comment is never an independently
//! addressable record, and deleting a task takes its comments with it.

use super::employee::EmployeeRef;
use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surrealdb::RecordId;

/// Task status: fully connected state machine, no terminal state.
/// Wire values match the original API ("In Progress" with a space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Comment embedded in a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    #[serde(with = "serde_helpers::record_id")]
    pub created_by: RecordId,
    pub created_at: DateTime<Utc>,
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    /// Weak reference; deleting the employee leaves this dangling
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub assigned_to: Option<RecordId>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Create task payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    pub title: String,
    pub description: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub assigned_to: Option<RecordId>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
}

/// Update task payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub assigned_to: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    /// Policy for Employee-role actors: the request must carry a status
    /// change, and nothing but the status is applied.
    ///
    /// Returns `None` when no status is present, so the caller rejects the
    /// request as forbidden rather than applying an empty patch.
    pub fn restrict_to_status(self) -> Option<TaskUpdate> {
        self.status.map(|status| TaskUpdate {
            status: Some(status),
            ..TaskUpdate::default()
        })
    }
}

/// Assignee resolved at read time, never the full employee record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Comment with its author's name resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub text: String,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Task as returned by read endpoints, with assignee and comment authors
/// resolved against the employee directory
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssigneeRef>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    pub comments: Vec<CommentView>,
}

impl TaskResponse {
    /// Resolve references against the directory. Dangling references (the
    /// employee was deleted) resolve to no assignee / no author name.
    pub fn resolve(task: Task, directory: &HashMap<String, EmployeeRef>) -> Self {
        let assigned_to = task
            .assigned_to
            .map(|id| id.to_string())
            .and_then(|id| directory.get(&id))
            .map(|emp| AssigneeRef {
                id: emp.id.to_string(),
                name: emp.name.clone(),
                email: emp.email.clone(),
            });

        let comments = task
            .comments
            .into_iter()
            .map(|c| {
                let created_by = c.created_by.to_string();
                let created_by_name = directory.get(&created_by).map(|emp| emp.name.clone());
                CommentView {
                    id: c.id,
                    text: c.text,
                    created_by,
                    created_by_name,
                    created_at: c.created_at,
                }
            })
            .collect();

        Self {
            id: task.id.map(|id| id.to_string()).unwrap_or_default(),
            title: task.title,
            description: task.description,
            assigned_to,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            comments,
        }
    }
}

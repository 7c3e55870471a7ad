//! Task Repository
//!
//! Comment mutations are read-modify-write on the owning task document; the
//! store's per-document atomicity is the only concurrency guarantee (no
//! version check, so concurrent writers can lose updates).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Comment, Task, TaskCreate, TaskUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "task";

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tasks
    pub async fn find_all(&self) -> RepoResult<Vec<Task>> {
        let tasks: Vec<Task> = self
            .base
            .db()
            .query("SELECT * FROM task ORDER BY dueDate")
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// Find tasks assigned to one employee
    pub async fn find_assigned_to(&self, employee_id: &str) -> RepoResult<Vec<Task>> {
        let employee_owned = employee_id.to_string();
        let tasks: Vec<Task> = self
            .base
            .db()
            .query("SELECT * FROM task WHERE assignedTo = $employee ORDER BY dueDate")
            .bind(("employee", employee_owned))
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// Find task by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Task>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let task: Option<Task> = self.base.db().select(thing).await?;
        Ok(task)
    }

    /// Create a new task
    pub async fn create(&self, data: TaskCreate) -> RepoResult<Task> {
        let task = Task {
            id: None,
            title: data.title,
            description: data.description,
            assigned_to: data.assigned_to,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            comments: Vec::new(),
        };

        let created: Option<Task> = self.base.db().create(TABLE).content(task).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    /// Partial update: only fields present in `data` are touched
    pub async fn update(&self, id: &str, data: TaskUpdate) -> RepoResult<Task> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    /// Hard delete a task; its embedded comments die with it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Append a comment to a task
    pub async fn add_comment(&self, id: &str, comment: Comment) -> RepoResult<Task> {
        let task = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;

        let mut comments = task.comments;
        comments.push(comment);
        self.set_comments(id, comments).await
    }

    /// Remove a single comment by id; siblings are unaffected
    pub async fn remove_comment(&self, id: &str, comment_id: &str) -> RepoResult<Task> {
        let task = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;

        if !task.comments.iter().any(|c| c.id == comment_id) {
            return Err(RepoError::NotFound(format!(
                "Comment {} not found",
                comment_id
            )));
        }

        let comments: Vec<Comment> = task
            .comments
            .into_iter()
            .filter(|c| c.id != comment_id)
            .collect();
        self.set_comments(id, comments).await
    }

    async fn set_comments(&self, id: &str, comments: Vec<Comment>) -> RepoResult<Task> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET comments = $comments RETURN AFTER")
            .bind(("thing", thing))
            .bind(("comments", comments))
            .await?;
        let updated: Option<Task> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }
}

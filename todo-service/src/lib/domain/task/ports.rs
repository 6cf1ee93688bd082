use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskCommand;
use crate::domain::task::models::TaskId;
use crate::domain::user::models::UserId;

/// Port for task operations, always scoped to an owning user. The HTTP
/// boundary passes the authenticated principal's user id; a task owned by
/// someone else is indistinguishable from a missing one.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task for the user.
    ///
    /// # Errors
    /// * `UserNotFound` - owning user does not exist
    /// * `DatabaseError` - database operation failed
    async fn create_task(&self, user_id: &UserId, command: TaskCommand)
        -> Result<Task, TaskError>;

    /// Retrieve one of the user's tasks.
    ///
    /// # Errors
    /// * `UserNotFound` - owning user does not exist
    /// * `TaskNotFound` - no such task for this user
    async fn get_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<Task, TaskError>;

    /// Retrieve all tasks of the user.
    async fn list_tasks(&self, user_id: &UserId) -> Result<Vec<Task>, TaskError>;

    /// Replace a task's title and description.
    ///
    /// # Errors
    /// * `UserNotFound` - owning user does not exist
    /// * `TaskNotFound` - no such task for this user
    async fn update_task(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
        command: TaskCommand,
    ) -> Result<Task, TaskError>;

    /// Delete one of the user's tasks.
    ///
    /// # Errors
    /// * `UserNotFound` - owning user does not exist
    /// * `TaskNotFound` - no such task for this user
    async fn delete_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for the task aggregate.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Persist a new task.
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// Retrieve a task by id, scoped to its owner. None when the task
    /// does not exist or belongs to another user.
    async fn find_by_id_and_user(
        &self,
        id: &TaskId,
        user_id: &UserId,
    ) -> Result<Option<Task>, TaskError>;

    /// Retrieve all tasks owned by the user.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Task>, TaskError>;

    /// Update an existing task.
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// Remove a task from storage.
    async fn delete(&self, id: &TaskId) -> Result<(), TaskError>;
}

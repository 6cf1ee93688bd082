use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskCommand;
use crate::domain::task::models::TaskId;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Task service. Resolves the owning user before any single-task
/// operation; listing skips the check and simply returns an empty set
/// for an unknown user.
pub struct TaskService<TR, UR>
where
    TR: TaskRepository,
    UR: UserRepository,
{
    tasks: Arc<TR>,
    users: Arc<UR>,
}

impl<TR, UR> TaskService<TR, UR>
where
    TR: TaskRepository,
    UR: UserRepository,
{
    pub fn new(tasks: Arc<TR>, users: Arc<UR>) -> Self {
        Self { tasks, users }
    }

    async fn ensure_user_exists(&self, user_id: &UserId) -> Result<(), TaskError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(TaskError::from)?
            .map(|_| ())
            .ok_or(TaskError::UserNotFound(user_id.to_string()))
    }
}

#[async_trait]
impl<TR, UR> TaskServicePort for TaskService<TR, UR>
where
    TR: TaskRepository,
    UR: UserRepository,
{
    async fn create_task(
        &self,
        user_id: &UserId,
        command: TaskCommand,
    ) -> Result<Task, TaskError> {
        self.ensure_user_exists(user_id).await?;

        let task = Task::new(*user_id, command.title, command.description);
        self.tasks.create(task).await
    }

    async fn get_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<Task, TaskError> {
        self.ensure_user_exists(user_id).await?;

        self.tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id.to_string()))
    }

    async fn list_tasks(&self, user_id: &UserId) -> Result<Vec<Task>, TaskError> {
        self.tasks.list_by_user(user_id).await
    }

    async fn update_task(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
        command: TaskCommand,
    ) -> Result<Task, TaskError> {
        self.ensure_user_exists(user_id).await?;

        let mut task = self
            .tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id.to_string()))?;

        task.title = command.title;
        task.description = command.description;

        self.tasks.update(task).await
    }

    async fn delete_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<(), TaskError> {
        self.ensure_user_exists(user_id).await?;

        let task = self
            .tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id.to_string()))?;

        self.tasks.delete(&task.id).await
    }
}

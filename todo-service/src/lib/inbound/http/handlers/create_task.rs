use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<TaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    state
        .task_service
        .create_task(&current_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body carrying the writable task fields, shared by create
/// and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRequest {
    title: String,
    description: String,
}

#[derive(Debug, Clone, Error)]
pub enum ParseTaskRequestError {
    #[error("Task title is required")]
    BlankTitle,

    #[error("Task description is required")]
    BlankDescription,
}

impl TaskRequest {
    pub fn try_into_command(self) -> Result<TaskCommand, ParseTaskRequestError> {
        if self.title.trim().is_empty() {
            return Err(ParseTaskRequestError::BlankTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ParseTaskRequestError::BlankDescription);
        }
        Ok(TaskCommand {
            title: self.title,
            description: self.description,
        })
    }
}

impl From<ParseTaskRequestError> for ApiError {
    fn from(err: ParseTaskRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Task response shared by the task endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_id: String,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            user_id: task.user_id.to_string(),
        }
    }
}

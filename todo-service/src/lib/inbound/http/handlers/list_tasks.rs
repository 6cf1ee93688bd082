use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::create_task::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    state
        .task_service
        .list_tasks(&current_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|tasks| {
            ApiSuccess::new(
                StatusCode::OK,
                tasks.iter().map(TaskData::from).collect::<Vec<_>>(),
            )
        })
}

use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    assignments::{
        dto::{AssignmentResponse, CreateAssignmentRequest},
        repo,
    },
    error::ApiError,
    state::AppState,
};

pub fn tag_routes() -> Router<AppState> {
    Router::new().route("/tag", post(create_assignment))
}

/// Tags a user to a project. Deliberately open: the endpoint takes no
/// credentials, and every failure collapses to one generic message.
#[instrument(skip(state, payload))]
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssignmentRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let assignment = repo::insert(&state.db, payload.user, payload.project)
        .await
        .map_err(|e| {
            warn!(error = %e, user = %payload.user, project = %payload.project, "tagging failed");
            ApiError::validation(
                "tagging failed, please check you have entered right username and project_id",
            )
        })?;

    info!(assignment_id = %assignment.id, user = %assignment.user_id, "user tagged to project");
    Ok(Json(assignment.into()))
}

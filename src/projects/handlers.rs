use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    projects::{
        dto::{CreateProjectRequest, ProjectKey, ProjectResponse, UpdateProjectRequest},
        repo,
    },
    state::AppState,
};

pub fn collection_routes() -> Router<AppState> {
    Router::new().route("/project", get(list_projects).post(create_project))
}

pub fn detail_routes() -> Router<AppState> {
    Router::new().route(
        "/project/:project_id",
        get(get_project).put(update_project).delete(delete_project),
    )
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = repo::list_all(&state.db).await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    payload.validate()?;

    let project = repo::insert(&state.db, &payload.name, &payload.description, &payload.project_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                warn!(project_key = %payload.project_id, "duplicate project key");
                ApiError::Conflict(format!(
                    "Project is already present with project ID: {}",
                    payload.project_id
                ))
            }
            other => other.into(),
        })?;

    info!(project_id = %project.id, project_key = %project.project_id, %user_id, "project created");
    Ok(Json(project.into()))
}

#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(key): Path<ProjectKey>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = repo::find_by_key(&state.db, &key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project not found with ID: {key}")))?;
    Ok(Json(project.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(key): Path<ProjectKey>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    payload.validate()?;

    let current = repo::find_by_key(&state.db, &key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project not found with ID: {key}")))?;

    let updated = repo::update(&state.db, &current, &payload).await?;
    info!(project_id = %updated.id, project_key = %updated.project_id, %user_id, "project updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(key): Path<ProjectKey>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = repo::delete_by_key(&state.db, &key).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("Project not found with ID: {key}")));
    }

    info!(project_key = %key, %user_id, "project deleted");
    Ok(Json(json!({ "message": "success" })))
}

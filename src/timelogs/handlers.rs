use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    assignments,
    auth::{
        extractors::AuthUser,
        repo_types::User,
        services::resolve_identity,
        Identity,
    },
    error::ApiError,
    projects,
    state::AppState,
    timelogs::{
        dto::{DeleteTimelogRequest, TimelogPayload, TimelogResponse},
        repo,
        rules::{check_assigned_project, check_self_edit, TimelogAction},
    },
};

pub fn collection_routes() -> Router<AppState> {
    Router::new().route("/timelog", get(list_timelogs).post(create_timelog))
}

pub fn detail_routes() -> Router<AppState> {
    Router::new().route(
        "/timelogdetail/:id",
        put(update_timelog).delete(delete_timelog),
    )
}

/// Self-edit and assignment checks shared by create and update. The
/// claimed user comes from the payload; the assignment from the caller.
async fn authorize_write(
    state: &AppState,
    caller: &Identity,
    payload: &TimelogPayload,
    action: TimelogAction,
) -> Result<(), ApiError> {
    let claimed = User::find_by_id(&state.db, payload.user)
        .await?
        .ok_or_else(|| ApiError::validation("user not found"))?;
    check_self_edit(caller, &claimed.username, action)?;

    let assignment = assignments::repo::find_for_user(&state.db, caller.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotAcceptable(format!(
                "user {} has no project assignment",
                caller.username
            ))
        })?;
    check_assigned_project(caller, assignment.project_id, payload.project)
}

#[instrument(skip(state))]
pub async fn list_timelogs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<TimelogResponse>>, ApiError> {
    let identity = resolve_identity(&state.db, user_id).await?;

    let assignment = assignments::repo::find_for_user(&state.db, identity.id)
        .await?
        .ok_or_else(|| {
            warn!(username = %identity.username, "timelog list without assignment");
            ApiError::NotFound(format!(
                "no project assignment for user {}",
                identity.username
            ))
        })?;

    // Scope by the project's business key, not its internal reference
    let project = projects::repo::find_by_id(&state.db, assignment.project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("assigned project no longer exists".into()))?;

    let logs = repo::list_for_project_key(&state.db, &project.project_id).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_timelog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<TimelogPayload>,
) -> Result<Json<TimelogResponse>, ApiError> {
    let identity = resolve_identity(&state.db, user_id).await?;
    authorize_write(&state, &identity, &payload, TimelogAction::Add).await?;
    payload.validate()?;

    let log = repo::insert(&state.db, &payload).await.map_err(|e| match e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            ApiError::validation("user or project does not exist")
        }
        other => other.into(),
    })?;

    info!(timelog_id = %log.id, username = %identity.username, "timelog created");
    Ok(Json(log.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_timelog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TimelogPayload>,
) -> Result<Json<TimelogResponse>, ApiError> {
    let echo = serde_json::to_value(&payload).unwrap_or_default();
    match try_update(&state, user_id, id, &payload).await {
        Ok(log) => Ok(Json(log.into())),
        Err(e) => {
            warn!(timelog_id = %id, error = %e, "timelog update rejected");
            Err(e.collapse(echo))
        }
    }
}

async fn try_update(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    payload: &TimelogPayload,
) -> Result<repo::Timelog, ApiError> {
    let identity = resolve_identity(&state.db, user_id).await?;
    authorize_write(state, &identity, payload, TimelogAction::Edit).await?;
    payload.validate()?;

    repo::update(&state.db, id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("timelog not found with id: {id}")))
}

#[instrument(skip(state, payload))]
pub async fn delete_timelog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeleteTimelogRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let echo = serde_json::to_value(&payload).unwrap_or_default();
    match try_delete(&state, user_id, id, &payload).await {
        Ok(()) => Ok((StatusCode::NO_CONTENT, Json(json!({ "message": "success" })))),
        Err(e) => {
            warn!(timelog_id = %id, error = %e, "timelog delete rejected");
            Err(e.collapse(echo))
        }
    }
}

async fn try_delete(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    payload: &DeleteTimelogRequest,
) -> Result<(), ApiError> {
    let identity = resolve_identity(&state.db, user_id).await?;

    let claimed = User::find_by_id(&state.db, payload.user)
        .await?
        .ok_or_else(|| ApiError::validation("user not found"))?;
    check_self_edit(&identity, &claimed.username, TimelogAction::Delete)?;

    // Delete does not re-check the project assignment
    let removed = repo::delete_by_id(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("timelog not found with id: {id}")));
    }

    info!(timelog_id = %id, username = %identity.username, "timelog deleted");
    Ok(())
}

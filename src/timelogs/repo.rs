use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::projects::dto::ProjectKey;
use crate::timelogs::dto::TimelogPayload;

#[derive(Debug, Clone, FromRow)]
pub struct Timelog {
    pub id: Uuid,
    pub work_hours: Decimal,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub log_date: String,
    pub created_at: OffsetDateTime,
}

/// All timelogs whose project carries the given business key.
pub async fn list_for_project_key(
    db: &PgPool,
    key: &ProjectKey,
) -> Result<Vec<Timelog>, sqlx::Error> {
    sqlx::query_as::<_, Timelog>(
        r#"
        SELECT t.id, t.work_hours, t.project_id, t.user_id, t.log_date, t.created_at
        FROM timelogs t
        JOIN projects p ON p.id = t.project_id
        WHERE p.project_id = $1
        ORDER BY t.created_at
        "#,
    )
    .bind(key)
    .fetch_all(db)
    .await
}

pub async fn insert(db: &PgPool, payload: &TimelogPayload) -> Result<Timelog, sqlx::Error> {
    sqlx::query_as::<_, Timelog>(
        r#"
        INSERT INTO timelogs (work_hours, project_id, user_id, log_date)
        VALUES ($1, $2, $3, $4)
        RETURNING id, work_hours, project_id, user_id, log_date, created_at
        "#,
    )
    .bind(payload.work_hours)
    .bind(payload.project)
    .bind(payload.user)
    .bind(&payload.date)
    .fetch_one(db)
    .await
}

/// Overwrite all fields of the row; `None` when the id does not exist.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    payload: &TimelogPayload,
) -> Result<Option<Timelog>, sqlx::Error> {
    sqlx::query_as::<_, Timelog>(
        r#"
        UPDATE timelogs
        SET work_hours = $1, project_id = $2, user_id = $3, log_date = $4
        WHERE id = $5
        RETURNING id, work_hours, project_id, user_id, log_date, created_at
        "#,
    )
    .bind(payload.work_hours)
    .bind(payload.project)
    .bind(payload.user)
    .bind(&payload.date)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Returns the number of rows removed.
pub async fn delete_by_id(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM timelogs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

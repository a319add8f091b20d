use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// The single project a user is allowed to log time against. One row per
/// user, enforced by the unique constraint.
#[derive(Debug, Clone, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: OffsetDateTime,
}

pub async fn find_for_user(db: &PgPool, user_id: Uuid) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        r#"
        SELECT id, user_id, project_id, created_at
        FROM assignments
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &PgPool, user_id: Uuid, project_id: Uuid) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        r#"
        INSERT INTO assignments (user_id, project_id)
        VALUES ($1, $2)
        RETURNING id, user_id, project_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(project_id)
    .fetch_one(db)
    .await
}

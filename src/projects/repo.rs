use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::projects::dto::{ProjectKey, UpdateProjectRequest};

#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub project_id: ProjectKey,
    pub created_at: OffsetDateTime,
}

pub async fn list_all(db: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, project_id, created_at
        FROM projects
        ORDER BY created_at
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_by_key(db: &PgPool, key: &ProjectKey) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, project_id, created_at
        FROM projects
        WHERE project_id = $1
        "#,
    )
    .bind(key)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, project_id, created_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &PgPool,
    name: &str,
    description: &str,
    key: &ProjectKey,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (name, description, project_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, project_id, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(key)
    .fetch_one(db)
    .await
}

/// Apply the provided fields on top of the stored row and persist.
pub async fn update(
    db: &PgPool,
    current: &Project,
    changes: &UpdateProjectRequest,
) -> Result<Project, sqlx::Error> {
    let name = changes.name.as_deref().unwrap_or(&current.name);
    let description = changes
        .description
        .as_deref()
        .unwrap_or(&current.description);
    let key = changes.project_id.as_ref().unwrap_or(&current.project_id);

    sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET name = $1, description = $2, project_id = $3
        WHERE id = $4
        RETURNING id, name, description, project_id, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(key)
    .bind(current.id)
    .fetch_one(db)
    .await
}

/// Delete by business key. Dependent timelogs and assignments go with the
/// project via the schema's cascades. Returns the number of rows removed.
pub async fn delete_by_key(db: &PgPool, key: &ProjectKey) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM projects
        WHERE project_id = $1
        "#,
    )
    .bind(key)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

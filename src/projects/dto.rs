use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::projects::repo::Project;

/// Externally chosen project identifier (the "business key"). Distinct
/// from the internal row id; the two are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProjectKey(pub String);

impl std::fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub project_id: ProjectKey,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_fields(
            Some(self.name.as_str()),
            Some(self.description.as_str()),
            Some(&self.project_id),
        )
    }
}

/// PUT body; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<ProjectKey>,
}

impl UpdateProjectRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_fields(
            self.name.as_deref(),
            self.description.as_deref(),
            self.project_id.as_ref(),
        )
    }
}

fn check_fields(
    name: Option<&str>,
    description: Option<&str>,
    project_id: Option<&ProjectKey>,
) -> Result<(), ApiError> {
    if let Some(name) = name {
        if name.is_empty() || name.len() > 150 {
            return Err(ApiError::validation(
                "name must be between 1 and 150 characters",
            ));
        }
    }
    if let Some(description) = description {
        if description.len() > 500 {
            return Err(ApiError::validation(
                "description must be at most 500 characters",
            ));
        }
    }
    if let Some(key) = project_id {
        if key.0.is_empty() || key.0.len() > 25 {
            return Err(ApiError::validation(
                "project_id must be between 1 and 25 characters",
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub project_id: ProjectKey,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            project_id: p.project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, description: &str, key: &str) -> CreateProjectRequest {
        CreateProjectRequest {
            name: name.into(),
            description: description.into(),
            project_id: ProjectKey(key.into()),
        }
    }

    #[test]
    fn accepts_in_bounds_fields() {
        assert!(request("Billing rewrite", "Q3 effort", "PROJ1").validate().is_ok());
    }

    #[test]
    fn rejects_out_of_bounds_fields() {
        assert!(request("", "d", "PROJ1").validate().is_err());
        assert!(request(&"n".repeat(151), "d", "PROJ1").validate().is_err());
        assert!(request("n", &"d".repeat(501), "PROJ1").validate().is_err());
        assert!(request("n", "d", "").validate().is_err());
        assert!(request("n", "d", &"K".repeat(26)).validate().is_err());
    }

    #[test]
    fn update_only_checks_provided_fields() {
        let update = UpdateProjectRequest {
            name: None,
            description: None,
            project_id: Some(ProjectKey("PROJ2".into())),
        };
        assert!(update.validate().is_ok());

        let update = UpdateProjectRequest {
            name: Some("n".repeat(151)),
            description: None,
            project_id: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn project_key_serializes_as_a_bare_string() {
        let key = ProjectKey("PROJ1".into());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"PROJ1\"");
        let back: ProjectKey = serde_json::from_str("\"PROJ1\"").unwrap();
        assert_eq!(back, key);
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assignments::repo::Assignment;

/// Tagging body: both fields are internal references.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub user: Uuid,
    pub project: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub user: Uuid,
    pub project: Uuid,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            user: a.user_id,
            project: a.project_id,
        }
    }
}

use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelogAction {
    Add,
    Edit,
    Delete,
}

impl TimelogAction {
    fn verb(self) -> &'static str {
        match self {
            TimelogAction::Add => "add",
            TimelogAction::Edit => "edit",
            TimelogAction::Delete => "delete",
        }
    }
}

/// The self-edit rule: the payload's claimed user must be the caller.
/// Usernames compare case-insensitively after trimming. Note this checks
/// the request's claimed user, never the stored row's owner.
pub fn check_self_edit(
    caller: &Identity,
    claimed_username: &str,
    action: TimelogAction,
) -> Result<(), ApiError> {
    let caller_name = caller.username.trim().to_lowercase();
    let claimed_name = claimed_username.trim().to_lowercase();
    if caller_name == claimed_name {
        Ok(())
    } else {
        Err(ApiError::NotAcceptable(format!(
            "you can only {} your own timelogs",
            action.verb()
        )))
    }
}

/// The assignment rule: the payload's project must be the caller's
/// currently assigned project. Internal references compared, not business
/// keys.
pub fn check_assigned_project(
    caller: &Identity,
    assigned_project: Uuid,
    claimed_project: Uuid,
) -> Result<(), ApiError> {
    if assigned_project == claimed_project {
        Ok(())
    } else {
        Err(ApiError::NotAcceptable(format!(
            "user {} can only log time against their allocated project",
            caller.username
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            username: "alice".into(),
        }
    }

    #[test]
    fn self_edit_accepts_exact_match() {
        assert!(check_self_edit(&alice(), "alice", TimelogAction::Add).is_ok());
    }

    #[test]
    fn self_edit_ignores_case_and_whitespace() {
        assert!(check_self_edit(&alice(), "  Alice ", TimelogAction::Edit).is_ok());
        let caller = Identity {
            id: Uuid::new_v4(),
            username: " ALICE".into(),
        };
        assert!(check_self_edit(&caller, "alice", TimelogAction::Delete).is_ok());
    }

    #[test]
    fn self_edit_denies_other_users_with_the_action_verb() {
        let err = check_self_edit(&alice(), "bob", TimelogAction::Edit).unwrap_err();
        match err {
            ApiError::NotAcceptable(msg) => {
                assert_eq!(msg, "you can only edit your own timelogs")
            }
            other => panic!("expected NotAcceptable, got {other:?}"),
        }

        let err = check_self_edit(&alice(), "bob", TimelogAction::Delete).unwrap_err();
        assert!(err.to_string().contains("delete"));
    }

    #[test]
    fn assigned_project_accepts_matching_reference() {
        let project = Uuid::new_v4();
        assert!(check_assigned_project(&alice(), project, project).is_ok());
    }

    #[test]
    fn assigned_project_denies_any_other_reference() {
        let err =
            check_assigned_project(&alice(), Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        match err {
            ApiError::NotAcceptable(msg) => assert!(msg.contains("alice")),
            other => panic!("expected NotAcceptable, got {other:?}"),
        }
    }
}

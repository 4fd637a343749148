use axum::http::StatusCode;
use thiserror::Error;
use tracing::{info, warn};

use crate::database::ActivityDirectory;
use crate::models::Directory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student {email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },
    #[error("Student {email} is not registered for {activity}")]
    NotRegistered { activity: String, email: String },
    #[error("Activity {activity} is full ({max_participants} participants)")]
    ActivityFull {
        activity: String,
        max_participants: u32,
    },
    #[error("Email is required")]
    InvalidEmail,
}

impl ActivityError {
    pub fn status(&self) -> StatusCode {
        match self {
            ActivityError::NotFound => StatusCode::NOT_FOUND,
            ActivityError::AlreadyRegistered { .. }
            | ActivityError::NotRegistered { .. }
            | ActivityError::ActivityFull { .. }
            | ActivityError::InvalidEmail => StatusCode::BAD_REQUEST,
        }
    }
}

/// Whether `max_participants` rejects signups or is only informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityPolicy {
    pub enforce: bool,
}

impl CapacityPolicy {
    pub fn enforced() -> Self {
        Self { enforce: true }
    }
}

pub fn list_activities(directory: &ActivityDirectory) -> Directory {
    directory.snapshot()
}

pub fn signup(
    directory: &ActivityDirectory,
    policy: CapacityPolicy,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityError> {
    let email = email.trim();

    let outcome = directory
        .with_activity_mut(activity_name, |activity| {
            require_email(email)?;
            if activity.has_participant(email) {
                return Err(ActivityError::AlreadyRegistered {
                    activity: activity_name.to_string(),
                    email: email.to_string(),
                });
            }
            if policy.enforce && activity.is_full() {
                return Err(ActivityError::ActivityFull {
                    activity: activity_name.to_string(),
                    max_participants: activity.max_participants,
                });
            }
            activity.participants.push(email.to_string());
            Ok(activity.participants.len())
        })
        .unwrap_or(Err(ActivityError::NotFound));

    match outcome {
        Ok(count) => {
            info!(activity = %activity_name, email = %email, participants = count, "signup");
            Ok(format!("Signed up {} for {}", email, activity_name))
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %email, error = %e, "signup rejected");
            Err(e)
        }
    }
}

pub fn unregister(
    directory: &ActivityDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityError> {
    let email = email.trim();

    let outcome = directory
        .with_activity_mut(activity_name, |activity| {
            require_email(email)?;
            let Some(pos) = activity.participants.iter().position(|p| p == email) else {
                return Err(ActivityError::NotRegistered {
                    activity: activity_name.to_string(),
                    email: email.to_string(),
                });
            };
            activity.participants.remove(pos);
            Ok(activity.participants.len())
        })
        .unwrap_or(Err(ActivityError::NotFound));

    match outcome {
        Ok(count) => {
            info!(activity = %activity_name, email = %email, participants = count, "unregister");
            Ok(format!("Unregistered {} from {}", email, activity_name))
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %email, error = %e, "unregister rejected");
            Err(e)
        }
    }
}

fn require_email(email: &str) -> Result<(), ActivityError> {
    if email.is_empty() {
        return Err(ActivityError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;

    fn directory() -> ActivityDirectory {
        let mut map = Directory::new();
        map.insert(
            "Chess Club".to_string(),
            Activity::new("Chess", "Fridays", 2).with_participants(["michael@mergington.edu"]),
        );
        ActivityDirectory::new(map)
    }

    #[test]
    fn signup_appends_in_order() {
        let dir = directory();
        let msg = signup(&dir, CapacityPolicy::default(), "Chess Club", "new@mergington.edu")
            .unwrap();
        assert_eq!(msg, "Signed up new@mergington.edu for Chess Club");
        assert_eq!(
            dir.get("Chess Club").unwrap().participants,
            vec!["michael@mergington.edu", "new@mergington.edu"]
        );
    }

    #[test]
    fn signup_unknown_activity_is_checked_before_duplicates() {
        let dir = directory();
        let err = signup(&dir, CapacityPolicy::default(), "Chess", "michael@mergington.edu")
            .unwrap_err();
        assert_eq!(err, ActivityError::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_signup_is_an_error_not_a_noop() {
        let dir = directory();
        let err = signup(&dir, CapacityPolicy::default(), "Chess Club", "michael@mergington.edu")
            .unwrap_err();
        assert!(err.to_string().contains("already signed up"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 1);
    }

    #[test]
    fn capacity_is_descriptive_unless_enforced() {
        let dir = directory();
        signup(&dir, CapacityPolicy::default(), "Chess Club", "a@mergington.edu").unwrap();
        signup(&dir, CapacityPolicy::default(), "Chess Club", "b@mergington.edu").unwrap();
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 3);

        let err = signup(&dir, CapacityPolicy::enforced(), "Chess Club", "c@mergington.edu")
            .unwrap_err();
        assert!(err.to_string().contains("is full"));
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 3);
    }

    #[test]
    fn unregister_removes_the_email() {
        let dir = directory();
        let msg = unregister(&dir, "Chess Club", "michael@mergington.edu").unwrap();
        assert_eq!(msg, "Unregistered michael@mergington.edu from Chess Club");
        assert!(dir.get("Chess Club").unwrap().participants.is_empty());
    }

    #[test]
    fn unregister_non_member_fails() {
        let dir = directory();
        let err = unregister(&dir, "Chess Club", "nobody@mergington.edu").unwrap_err();
        assert!(err.to_string().contains("not registered"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unregister_unknown_activity_fails() {
        let dir = directory();
        let err = unregister(&dir, "Nonexistent Club", "michael@mergington.edu").unwrap_err();
        assert_eq!(err, ActivityError::NotFound);
    }

    #[test]
    fn blank_email_is_rejected() {
        let dir = directory();
        let err = signup(&dir, CapacityPolicy::default(), "Chess Club", "   ").unwrap_err();
        assert_eq!(err, ActivityError::InvalidEmail);

        let err = signup(&dir, CapacityPolicy::default(), "Nonexistent Club", "").unwrap_err();
        assert_eq!(err, ActivityError::NotFound);
    }
}

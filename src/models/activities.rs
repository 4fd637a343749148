use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Activity name -> record, in seed order.
pub type Directory = IndexMap<String, Activity>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Signup order, emails are unique.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: u32) -> Self {
        Self {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spots_left_saturates_when_over_capacity() {
        let a = Activity::new("x", "y", 1).with_participants(["a@x", "b@x"]);
        assert_eq!(a.spots_left(), 0);
        assert!(a.is_full());
    }

    #[test]
    fn participants_default_to_empty_when_missing_from_json() {
        let a: Activity = serde_json::from_str(
            r#"{"description":"d","schedule":"s","max_participants":3}"#,
        )
        .unwrap();
        assert!(a.participants.is_empty());
        assert_eq!(a.spots_left(), 3);
    }

    #[test]
    fn serializes_the_four_public_fields() {
        let a = Activity::new("d", "s", 2).with_participants(["a@x"]);
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "description": "d",
                "schedule": "s",
                "max_participants": 2,
                "participants": ["a@x"]
            })
        );
    }
}

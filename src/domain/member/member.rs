use chrono::{DateTime, Utc};
use serde::Serialize;

/// Member entity
///
/// A person on the roster, optionally assigned to a team through
/// `team_id`. This is a plain data holder: referential consistency with
/// the team table is enforced by the database schema, not by this struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    /// Storage-assigned identifier; `None` until the first save.
    pub id: Option<i64>,
    pub username: String,
    pub age: i64,
    /// Back-reference to the owning team, if any.
    pub team_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Creates a transient member that has not been persisted yet.
    pub fn new(username: impl Into<String>, age: i64, team_id: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username: username.into(),
            age,
            team_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_is_transient() {
        let member = Member::new("memberA", 10, None);

        assert_eq!(member.id, None);
        assert_eq!(member.username, "memberA");
        assert_eq!(member.age, 10);
        assert_eq!(member.team_id, None);
    }

    #[test]
    fn new_member_timestamps_match() {
        let member = Member::new("memberA", 10, Some(1));

        assert_eq!(member.created_at, member.updated_at);
    }
}

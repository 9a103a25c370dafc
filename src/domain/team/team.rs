use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::member::Member;

/// Team entity
///
/// Members reference a team through `Member::team_id`; the collection
/// side is loaded explicitly via the repository, never implicitly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    /// Storage-assigned identifier; `None` until the first save.
    pub id: Option<i64>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a transient team that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A team with its member collection loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_team_is_transient() {
        let team = Team::new("teamA");

        assert_eq!(team.id, None);
        assert_eq!(team.name, "teamA");
        assert_eq!(team.created_at, team.updated_at);
    }
}

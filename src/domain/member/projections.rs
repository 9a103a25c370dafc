use serde::Serialize;

use crate::domain::member::Member;
use crate::domain::team::Team;

/// Narrow read model: one member row joined with its team's name.
///
/// Fetched as a three-column projection, never assembled from full
/// entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSummary {
    pub id: i64,
    pub username: String,
    pub team_name: Option<String>,
}

/// A member with its team resolved in the same query.
///
/// This is the eager-loading read shape; plain `find_*` methods return
/// members with `team_id` only and leave the team to a follow-up lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

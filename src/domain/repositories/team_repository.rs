use async_trait::async_trait;

use crate::domain::member::Member;
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::team::{Team, TeamWithMembers};

/// Repository trait for teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Saves a team: insert when `id` is `None`, update otherwise.
    async fn save(&self, team: Team) -> RepositoryResult<Team>;

    /// Finds a team by id.
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>>;

    /// Finds a team by exact name (lowest id wins on duplicates).
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;

    /// All teams, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Team>>;

    /// Total team count.
    async fn count(&self) -> RepositoryResult<u64>;

    /// Deletes one team; `NotFound` when the id matches nothing.
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Members belonging to the team, ordered by id.
    async fn find_members(&self, team_id: i64) -> RepositoryResult<Vec<Member>>;

    /// The team plus its member collection, loaded explicitly.
    async fn find_with_members(&self, id: i64) -> RepositoryResult<Option<TeamWithMembers>>;
}

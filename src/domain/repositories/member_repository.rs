use async_trait::async_trait;

use crate::domain::member::{Member, MemberExample, MemberSpec, MemberSummary, MemberWithTeam};
use crate::domain::query::{Page, PageRequest};
use crate::domain::repositories::errors::RepositoryResult;

/// Repository trait for members
///
/// Every query the service runs against the member table is declared
/// here; implementations own the SQL. Methods come in the same flavors
/// the service needs them: whole entities, narrow projections, a counted
/// page, a bulk statement, and eager joins.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Saves a member: insert when `id` is `None`, update otherwise.
    ///
    /// Returns the persisted entity carrying its id and fresh
    /// `updated_at`. Updating an id that matches no row is `NotFound`.
    async fn save(&self, member: Member) -> RepositoryResult<Member>;

    /// Finds a member by id.
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>>;

    /// All members, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    /// Total member count.
    async fn count(&self) -> RepositoryResult<u64>;

    /// Deletes one member; `NotFound` when the id matches nothing.
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// All members with exactly this username.
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// First member (lowest id) with this username, if any.
    async fn find_first_by_username(&self, username: &str) -> RepositoryResult<Option<Member>>;

    /// Members with this username strictly older than `age`.
    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i64,
    ) -> RepositoryResult<Vec<Member>>;

    /// Members matching both username and age exactly.
    async fn find_by_username_and_age(
        &self,
        username: &str,
        age: i64,
    ) -> RepositoryResult<Vec<Member>>;

    /// Members whose username is in the given list.
    ///
    /// An empty list short-circuits to an empty result.
    async fn find_by_username_in(&self, usernames: &[String]) -> RepositoryResult<Vec<Member>>;

    /// All usernames — a single-column projection.
    async fn find_usernames(&self) -> RepositoryResult<Vec<String>>;

    /// All members as `MemberSummary` rows (username plus joined team name).
    async fn find_member_summaries(&self) -> RepositoryResult<Vec<MemberSummary>>;

    /// Summaries restricted to one username.
    async fn find_summaries_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberSummary>>;

    /// One page of members of the given age plus the total match count.
    async fn find_by_age(&self, age: i64, page: &PageRequest) -> RepositoryResult<Page<Member>>;

    /// Bumps the age of every member at least `min_age` old by one.
    ///
    /// A single UPDATE statement; returns the number of affected rows.
    async fn raise_age_of_at_least(&self, min_age: i64) -> RepositoryResult<u64>;

    /// All members with their teams loaded in the same query.
    async fn find_all_with_team(&self) -> RepositoryResult<Vec<MemberWithTeam>>;

    /// Members of one username with their teams loaded in the same query.
    async fn find_with_team_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberWithTeam>>;

    /// Reads under the database write lock, so concurrent writers queue
    /// behind the call until it commits.
    async fn find_by_username_for_update(&self, username: &str)
        -> RepositoryResult<Vec<Member>>;

    /// Members matching a composed [`MemberSpec`] filter tree.
    async fn find_all_matching(&self, spec: &MemberSpec) -> RepositoryResult<Vec<Member>>;

    /// Members matching the non-`None` fields of the probe.
    async fn find_all_by_example(&self, example: &MemberExample)
        -> RepositoryResult<Vec<Member>>;
}

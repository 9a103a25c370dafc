use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::member::Member;
use crate::domain::repositories::{RepositoryError, RepositoryResult, TeamRepository};
use crate::domain::team::{Team, TeamWithMembers};

/// SQLite implementation of `TeamRepository`
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Creates a new SqliteTeamRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn save(&self, mut team: Team) -> RepositoryResult<Team> {
        team.updated_at = Utc::now();
        match team.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO teams (name, created_at, updated_at) VALUES (?, ?, ?)",
                )
                .bind(&team.name)
                .bind(team.created_at)
                .bind(team.updated_at)
                .execute(&self.pool)
                .await?;

                team.id = Some(result.last_insert_rowid());
                Ok(team)
            }
            Some(id) => {
                let result =
                    sqlx::query("UPDATE teams SET name = ?, updated_at = ? WHERE id = ?")
                        .bind(&team.name)
                        .bind(team.updated_at)
                        .bind(id)
                        .execute(&self.pool)
                        .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound { entity: "team", id });
                }
                Ok(team)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, created_at, updated_at FROM teams WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Team::from))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, created_at, updated_at FROM teams
             WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Team::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, created_at, updated_at FROM teams ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { entity: "team", id });
        }
        Ok(())
    }

    async fn find_members(&self, team_id: i64) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id, created_at, updated_at
             FROM members WHERE team_id = ? ORDER BY id",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_with_members(&self, id: i64) -> RepositoryResult<Option<TeamWithMembers>> {
        let Some(team) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let members = self.find_members(id).await?;

        Ok(Some(TeamWithMembers { team, members }))
    }
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: Some(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    username: String,
    age: i64,
    team_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: Some(row.id),
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

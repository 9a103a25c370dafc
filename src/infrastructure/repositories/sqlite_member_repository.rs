use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::member::{Member, MemberExample, MemberSpec, MemberSummary, MemberWithTeam};
use crate::domain::query::{Page, PageRequest, Sort, SortDirection};
use crate::domain::repositories::{MemberRepository, RepositoryError, RepositoryResult};
use crate::domain::team::Team;

const MEMBER_SELECT: &str =
    "SELECT id, username, age, team_id, created_at, updated_at FROM members";

const MEMBER_TEAM_SELECT: &str = "SELECT m.id, m.username, m.age, m.team_id, m.created_at, \
     m.updated_at, t.id AS team_row_id, t.name AS team_name, \
     t.created_at AS team_created_at, t.updated_at AS team_updated_at \
     FROM members m LEFT JOIN teams t ON t.id = m.team_id";

/// SQLite implementation of `MemberRepository`
///
/// All SQL lives here, runtime-bound and parameterized; identifiers only
/// ever come from fixed allow-lists, values only ever from binds.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    /// Creates a new SqliteMemberRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_members(&self, sql: &str, binds: &[SqlBind]) -> RepositoryResult<Vec<Member>> {
        let mut query = sqlx::query_as::<_, MemberRow>(sql);
        for bind in binds {
            query = match bind {
                SqlBind::Text(text) => query.bind(text.as_str()),
                SqlBind::Int(value) => query.bind(*value),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn save(&self, mut member: Member) -> RepositoryResult<Member> {
        member.updated_at = Utc::now();
        match member.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO members (username, age, team_id, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&member.username)
                .bind(member.age)
                .bind(member.team_id)
                .bind(member.created_at)
                .bind(member.updated_at)
                .execute(&self.pool)
                .await?;

                member.id = Some(result.last_insert_rowid());
                Ok(member)
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE members SET username = ?, age = ?, team_id = ?, updated_at = ?
                     WHERE id = ?",
                )
                .bind(&member.username)
                .bind(member.age)
                .bind(member.team_id)
                .bind(member.updated_at)
                .bind(id)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound {
                        entity: "member",
                        id,
                    });
                }
                Ok(member)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id, created_at, updated_at
             FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Member::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let sql = format!("{MEMBER_SELECT} ORDER BY id");
        self.fetch_members(&sql, &[]).await
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "member",
                id,
            });
        }
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let sql = format!("{MEMBER_SELECT} WHERE username = ? ORDER BY id");
        self.fetch_members(&sql, &[SqlBind::text(username)]).await
    }

    async fn find_first_by_username(&self, username: &str) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id, created_at, updated_at
             FROM members WHERE username = ? ORDER BY id LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Member::from))
    }

    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i64,
    ) -> RepositoryResult<Vec<Member>> {
        let sql = format!("{MEMBER_SELECT} WHERE username = ? AND age > ? ORDER BY id");
        self.fetch_members(&sql, &[SqlBind::text(username), SqlBind::Int(age)])
            .await
    }

    async fn find_by_username_and_age(
        &self,
        username: &str,
        age: i64,
    ) -> RepositoryResult<Vec<Member>> {
        let sql = format!("{MEMBER_SELECT} WHERE username = ? AND age = ? ORDER BY id");
        self.fetch_members(&sql, &[SqlBind::text(username), SqlBind::Int(age)])
            .await
    }

    async fn find_by_username_in(&self, usernames: &[String]) -> RepositoryResult<Vec<Member>> {
        // `IN ()` is a syntax error in SQLite; nothing can match anyway.
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; usernames.len()].join(", ");
        let sql = format!("{MEMBER_SELECT} WHERE username IN ({placeholders}) ORDER BY id");
        let binds: Vec<SqlBind> = usernames.iter().map(SqlBind::text).collect();
        self.fetch_members(&sql, &binds).await
    }

    async fn find_usernames(&self) -> RepositoryResult<Vec<String>> {
        let usernames = sqlx::query_scalar("SELECT username FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(usernames)
    }

    async fn find_member_summaries(&self) -> RepositoryResult<Vec<MemberSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT m.id, m.username, t.name AS team_name
             FROM members m LEFT JOIN teams t ON t.id = m.team_id
             ORDER BY m.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MemberSummary::from).collect())
    }

    async fn find_summaries_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT m.id, m.username, t.name AS team_name
             FROM members m LEFT JOIN teams t ON t.id = m.team_id
             WHERE m.username = ?
             ORDER BY m.id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MemberSummary::from).collect())
    }

    async fn find_by_age(&self, age: i64, page: &PageRequest) -> RepositoryResult<Page<Member>> {
        let order = order_clause(page.sort())?;
        let sql = format!("{MEMBER_SELECT} WHERE age = ? ORDER BY {order} LIMIT ? OFFSET ?");
        let content = self
            .fetch_members(
                &sql,
                &[
                    SqlBind::Int(age),
                    SqlBind::Int(page.limit()),
                    SqlBind::Int(page.offset()),
                ],
            )
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE age = ?")
            .bind(age)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(content, page, total as u64))
    }

    async fn raise_age_of_at_least(&self, min_age: i64) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE members SET age = age + 1, updated_at = ? WHERE age >= ?")
            .bind(Utc::now())
            .bind(min_age)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_all_with_team(&self) -> RepositoryResult<Vec<MemberWithTeam>> {
        let sql = format!("{MEMBER_TEAM_SELECT} ORDER BY m.id");
        let rows = sqlx::query_as::<_, MemberTeamRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MemberTeamRow::into_member_with_team).collect())
    }

    async fn find_with_team_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<MemberWithTeam>> {
        let sql = format!("{MEMBER_TEAM_SELECT} WHERE m.username = ? ORDER BY m.id");
        let rows = sqlx::query_as::<_, MemberTeamRow>(&sql)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MemberTeamRow::into_member_with_team).collect())
    }

    async fn find_by_username_for_update(
        &self,
        username: &str,
    ) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.pool.acquire().await?;

        // An immediate transaction takes the database write lock before
        // reading; concurrent writers block until the commit below.
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let fetched = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id, created_at, updated_at
             FROM members WHERE username = ? ORDER BY id",
        )
        .bind(username)
        .fetch_all(&mut *conn)
        .await;

        let end = if fetched.is_ok() { "COMMIT" } else { "ROLLBACK" };
        sqlx::query(end).execute(&mut *conn).await?;

        Ok(fetched?.into_iter().map(Member::from).collect())
    }

    async fn find_all_matching(&self, spec: &MemberSpec) -> RepositoryResult<Vec<Member>> {
        let mut clause = String::new();
        let mut binds = Vec::new();
        render_spec(spec, &mut clause, &mut binds);

        let sql = format!("{MEMBER_TEAM_SELECT} WHERE {clause} ORDER BY m.id");
        let rows = {
            let mut query = sqlx::query_as::<_, MemberTeamRow>(&sql);
            for bind in &binds {
                query = match bind {
                    SqlBind::Text(text) => query.bind(text.as_str()),
                    SqlBind::Int(value) => query.bind(*value),
                };
            }
            query.fetch_all(&self.pool).await?
        };

        Ok(rows
            .into_iter()
            .map(|row| row.into_member_with_team().member)
            .collect())
    }

    async fn find_all_by_example(
        &self,
        example: &MemberExample,
    ) -> RepositoryResult<Vec<Member>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut binds: Vec<SqlBind> = Vec::new();

        if let Some(username) = &example.username {
            conditions.push("m.username = ?");
            binds.push(SqlBind::text(username));
        }
        if let Some(age) = example.age {
            conditions.push("m.age = ?");
            binds.push(SqlBind::Int(age));
        }
        if let Some(team_name) = &example.team_name {
            conditions.push("t.name = ?");
            binds.push(SqlBind::text(team_name));
        }

        let mut sql = String::from(MEMBER_TEAM_SELECT);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY m.id");

        let rows = {
            let mut query = sqlx::query_as::<_, MemberTeamRow>(&sql);
            for bind in &binds {
                query = match bind {
                    SqlBind::Text(text) => query.bind(text.as_str()),
                    SqlBind::Int(value) => query.bind(*value),
                };
            }
            query.fetch_all(&self.pool).await?
        };

        Ok(rows
            .into_iter()
            .map(|row| row.into_member_with_team().member)
            .collect())
    }
}

/// One bound query parameter; keeps dynamically assembled SQL fully
/// parameterized.
#[derive(Debug, Clone, PartialEq)]
enum SqlBind {
    Text(String),
    Int(i64),
}

impl SqlBind {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

fn order_clause(sort: Option<&Sort>) -> RepositoryResult<String> {
    let Some(sort) = sort else {
        return Ok("id ASC".to_string());
    };

    // Identifiers never come from the caller; unknown fields are rejected.
    let column = match sort.field.as_str() {
        "id" => "id",
        "username" => "username",
        "age" => "age",
        other => return Err(RepositoryError::UnsupportedSortField(other.to_string())),
    };
    let direction = match sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };

    Ok(format!("{column} {direction}"))
}

fn render_spec(spec: &MemberSpec, sql: &mut String, binds: &mut Vec<SqlBind>) {
    match spec {
        MemberSpec::UsernameEquals(username) => {
            sql.push_str("m.username = ?");
            binds.push(SqlBind::text(username));
        }
        MemberSpec::TeamNameEquals(name) => {
            sql.push_str("t.name = ?");
            binds.push(SqlBind::text(name));
        }
        MemberSpec::AgeAtLeast(age) => {
            sql.push_str("m.age >= ?");
            binds.push(SqlBind::Int(*age));
        }
        MemberSpec::And(left, right) => {
            sql.push('(');
            render_spec(left, sql, binds);
            sql.push_str(" AND ");
            render_spec(right, sql, binds);
            sql.push(')');
        }
        MemberSpec::Or(left, right) => {
            sql.push('(');
            render_spec(left, sql, binds);
            sql.push_str(" OR ");
            render_spec(right, sql, binds);
            sql.push(')');
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

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    username: String,
    team_name: Option<String>,
}

impl From<SummaryRow> for MemberSummary {
    fn from(row: SummaryRow) -> Self {
        MemberSummary {
            id: row.id,
            username: row.username,
            team_name: row.team_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MemberTeamRow {
    id: i64,
    username: String,
    age: i64,
    team_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    team_row_id: Option<i64>,
    team_name: Option<String>,
    team_created_at: Option<DateTime<Utc>>,
    team_updated_at: Option<DateTime<Utc>>,
}

impl MemberTeamRow {
    fn into_member_with_team(self) -> MemberWithTeam {
        let team = match (
            self.team_row_id,
            self.team_name,
            self.team_created_at,
            self.team_updated_at,
        ) {
            (Some(id), Some(name), Some(created_at), Some(updated_at)) => Some(Team {
                id: Some(id),
                name,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        MemberWithTeam {
            member: Member {
                id: Some(self.id),
                username: self.username,
                age: self.age,
                team_id: self.team_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            team,
        }
    }
}

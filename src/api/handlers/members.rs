use axum::extract::{Path, State};
use sqlx::SqlitePool;

use crate::api::errors::ApiError;
use crate::api::extract::ResolvedMember;
use crate::domain::repositories::MemberRepository;
use crate::infrastructure::repositories::SqliteMemberRepository;

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Look up a member and return its username
///
/// GET /members/:id
pub async fn get_member_username(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<String, ApiError> {
    let repository = SqliteMemberRepository::new(pool);
    let member = repository
        .find_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Member not found: {}", id)))?;

    Ok(member.username)
}

/// Same lookup, with the path id resolved into an entity by the
/// `ResolvedMember` extractor before the handler runs
///
/// GET /members2/:id
pub async fn get_resolved_member_username(ResolvedMember(member): ResolvedMember) -> String {
    member.username
}

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use sqlx::SqlitePool;

use crate::api::errors::ApiError;
use crate::domain::member::Member;
use crate::domain::repositories::MemberRepository;
use crate::infrastructure::repositories::SqliteMemberRepository;

/// Path-to-entity extractor for member routes.
///
/// Resolves the `{id}` path segment into a loaded `Member` before the
/// handler runs, so a handler can take `ResolvedMember(member)` instead
/// of an id plus a lookup. Rejects with 404 when the id matches nothing.
pub struct ResolvedMember(pub Member);

#[async_trait]
impl FromRequestParts<SqlitePool> for ResolvedMember {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        pool: &SqlitePool,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, pool)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid member id: {}", e)))?;

        let repository = SqliteMemberRepository::new(pool.clone());
        let member = repository
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("Member not found: {}", id)))?;

        Ok(Self(member))
    }
}

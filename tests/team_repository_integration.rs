//! Integration tests for the team repository

use roster_api::domain::member::Member;
use roster_api::domain::repositories::{MemberRepository, RepositoryError, TeamRepository};
use roster_api::domain::team::Team;
use roster_api::infrastructure::db;
use roster_api::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};
use sqlx::SqlitePool;

async fn setup_test_db() -> SqlitePool {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    db::init_schema(&pool)
        .await
        .expect("Failed to apply schema");

    pool
}

#[tokio::test]
async fn test_save_and_find() {
    let pool = setup_test_db().await;
    let repo = SqliteTeamRepository::new(pool.clone());

    let saved = repo.save(Team::new("teamA")).await.expect("save team");
    assert!(saved.id.is_some());

    let by_id = repo
        .find_by_id(saved.id.unwrap())
        .await
        .expect("find by id")
        .expect("team should exist");
    assert_eq!(by_id.name, "teamA");

    let by_name = repo
        .find_by_name("teamA")
        .await
        .expect("find by name")
        .expect("team should exist");
    assert_eq!(by_name.id, saved.id);

    assert!(repo
        .find_by_name("missing")
        .await
        .expect("find missing name")
        .is_none());
}

#[tokio::test]
async fn test_crud_counts() {
    let pool = setup_test_db().await;
    let repo = SqliteTeamRepository::new(pool.clone());

    let team_a = repo.save(Team::new("teamA")).await.expect("save teamA");
    repo.save(Team::new("teamB")).await.expect("save teamB");

    let all = repo.find_all().await.expect("find all");
    assert_eq!(all.len(), 2);
    assert_eq!(repo.count().await.expect("count"), 2);

    repo.delete(team_a.id.unwrap()).await.expect("delete teamA");
    assert_eq!(repo.count().await.expect("count after delete"), 1);

    let err = repo.delete(team_a.id.unwrap()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { entity: "team", .. }));
}

#[tokio::test]
async fn test_rename_through_save() {
    let pool = setup_test_db().await;
    let repo = SqliteTeamRepository::new(pool.clone());

    let mut team = repo.save(Team::new("teamA")).await.expect("save team");
    team.name = "teamA-renamed".to_string();
    repo.save(team.clone()).await.expect("rename team");

    assert_eq!(repo.count().await.expect("count"), 1, "rename must not insert");
    let found = repo
        .find_by_id(team.id.unwrap())
        .await
        .expect("find renamed")
        .expect("team should exist");
    assert_eq!(found.name, "teamA-renamed");
}

#[tokio::test]
async fn test_member_collection_loading() {
    let pool = setup_test_db().await;
    let team_repo = SqliteTeamRepository::new(pool.clone());
    let member_repo = SqliteMemberRepository::new(pool.clone());

    let team = team_repo.save(Team::new("teamA")).await.expect("save team");
    let empty_team = team_repo.save(Team::new("teamB")).await.expect("save teamB");

    member_repo
        .save(Member::new("member1", 10, team.id))
        .await
        .expect("save member1");
    member_repo
        .save(Member::new("member2", 20, team.id))
        .await
        .expect("save member2");

    let members = team_repo
        .find_members(team.id.unwrap())
        .await
        .expect("find members");
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].username, "member1");
    assert_eq!(members[1].username, "member2");

    let with_members = team_repo
        .find_with_members(team.id.unwrap())
        .await
        .expect("find with members")
        .expect("team should exist");
    assert_eq!(with_members.team.name, "teamA");
    assert_eq!(with_members.members.len(), 2);

    let lonely = team_repo
        .find_with_members(empty_team.id.unwrap())
        .await
        .expect("find empty team")
        .expect("team should exist");
    assert!(lonely.members.is_empty());

    assert!(team_repo
        .find_with_members(4242)
        .await
        .expect("find missing team")
        .is_none());
}

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use tasklane_application::{ProjectRoleRepository, RoleAssignmentChanges};
use tasklane_core::{AppError, RoleRuleViolation};
use tasklane_domain::{AccountId, ProjectId, ProjectRole, RoleAssignment};

use super::PostgresProjectRoleRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres project role tests: {error}");
    }

    Some(pool)
}

async fn insert_project(pool: &PgPool) -> ProjectId {
    let project_id = ProjectId::new();
    let insert = sqlx::query("INSERT INTO projects (id, name) VALUES ($1, 'Role Project')")
        .bind(project_id.as_uuid())
        .execute(pool)
        .await;
    assert!(insert.is_ok());
    project_id
}

async fn insert_account(pool: &PgPool) -> AccountId {
    let account_id = AccountId::new();
    let insert = sqlx::query(
        r#"
        INSERT INTO accounts (id, email, username, password_hash)
        VALUES ($1, $2, $3, 'hash')
        "#,
    )
    .bind(account_id.as_uuid())
    .bind(format!("{account_id}@example.com"))
    .bind(account_id.to_string())
    .execute(pool)
    .await;
    assert!(insert.is_ok());
    account_id
}

fn single(insert: RoleAssignment) -> RoleAssignmentChanges {
    let mut changes = RoleAssignmentChanges::new();
    changes.insert(insert);
    changes
}

#[tokio::test]
async fn duplicate_rows_and_second_owner_are_rejected() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProjectRoleRepository::new(pool.clone());
    let project_id = insert_project(&pool).await;
    let alice = insert_account(&pool).await;
    let bob = insert_account(&pool).await;

    let owner = RoleAssignment::new(project_id, alice, ProjectRole::Owner);
    assert!(repository.commit_changes(single(owner)).await.is_ok());

    let duplicate = repository.commit_changes(single(owner)).await;
    assert!(matches!(
        duplicate,
        Err(AppError::RoleRule(RoleRuleViolation::ProjectRolesAlreadyExists))
    ));

    let second_owner = repository
        .commit_changes(single(RoleAssignment::new(
            project_id,
            bob,
            ProjectRole::Owner,
        )))
        .await;
    assert!(matches!(second_owner, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn ownership_moves_inside_one_commit() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProjectRoleRepository::new(pool.clone());
    let project_id = insert_project(&pool).await;
    let alice = insert_account(&pool).await;
    let bob = insert_account(&pool).await;

    let mut seed = RoleAssignmentChanges::new();
    seed.insert(RoleAssignment::new(project_id, alice, ProjectRole::Owner))
        .insert(RoleAssignment::new(project_id, bob, ProjectRole::Member));
    assert!(repository.commit_changes(seed).await.is_ok());

    let mut transfer = RoleAssignmentChanges::new();
    transfer
        .delete(RoleAssignment::new(project_id, alice, ProjectRole::Owner))
        .insert(RoleAssignment::new(project_id, alice, ProjectRole::Member))
        .insert(RoleAssignment::new(project_id, bob, ProjectRole::Owner));
    assert!(repository.commit_changes(transfer).await.is_ok());

    let owners = repository
        .list_assignments_with_role(project_id, ProjectRole::Owner)
        .await
        .unwrap_or_default();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].account_id, bob);

    let alice_roles = repository
        .list_roles(project_id, alice)
        .await
        .unwrap_or_default();
    assert_eq!(alice_roles, vec![ProjectRole::Member]);
}

#[tokio::test]
async fn failed_commit_leaves_no_partial_writes() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProjectRoleRepository::new(pool.clone());
    let project_id = insert_project(&pool).await;
    let alice = insert_account(&pool).await;
    let bob = insert_account(&pool).await;

    let owner = RoleAssignment::new(project_id, alice, ProjectRole::Owner);
    assert!(repository.commit_changes(single(owner)).await.is_ok());

    let mut changes = RoleAssignmentChanges::new();
    changes
        .insert(RoleAssignment::new(project_id, bob, ProjectRole::Member))
        .insert(owner);
    assert!(repository.commit_changes(changes).await.is_err());

    let bob_roles = repository
        .list_roles(project_id, bob)
        .await
        .unwrap_or_default();
    assert!(bob_roles.is_empty());

    let projects = repository
        .list_projects_for_account(alice)
        .await
        .unwrap_or_default();
    assert_eq!(projects, vec![project_id]);
}

use chrono::Utc;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use tasklane_application::{BoardRepository, ProjectRepository, TaskRepository};
use tasklane_core::AppError;
use tasklane_domain::{Board, BoardId, Project, ProjectId, Task, TaskId, TaskStatus};

use super::PostgresProjectRepository;

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
        panic!("failed to run migrations for postgres project tests: {error}");
    }

    Some(pool)
}

fn project(name: &str) -> Project {
    Project {
        id: ProjectId::new(),
        name: name.to_owned(),
        description: None,
        created_at: Utc::now(),
    }
}

fn board(project_id: ProjectId, name: &str, position: i32) -> Board {
    Board {
        id: BoardId::new(),
        project_id,
        name: name.to_owned(),
        position,
    }
}

#[tokio::test]
async fn boards_are_listed_by_position_and_scoped_to_project() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProjectRepository::new(pool);
    let first = project("First");
    let second = project("Second");
    assert!(repository.create_project(first.clone()).await.is_ok());
    assert!(repository.create_project(second.clone()).await.is_ok());

    let done = board(first.id, "Done", 1);
    let backlog = board(first.id, "Backlog", 0);
    assert!(repository.create_board(done.clone()).await.is_ok());
    assert!(repository.create_board(backlog.clone()).await.is_ok());

    let names = repository
        .list_boards(first.id)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|board| board.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Backlog".to_owned(), "Done".to_owned()]);

    let foreign = repository.find_board(second.id, done.id).await;
    assert!(matches!(foreign, Ok(None)));

    let rename_foreign = repository.rename_board(second.id, done.id, "Hijack").await;
    assert!(matches!(rename_foreign, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleting_project_cascades_to_boards_and_tasks() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProjectRepository::new(pool);
    let doomed = project("Doomed");
    assert!(repository.create_project(doomed.clone()).await.is_ok());

    let backlog = board(doomed.id, "Backlog", 0);
    assert!(repository.create_board(backlog.clone()).await.is_ok());

    let now = Utc::now();
    let task = Task {
        id: TaskId::new(),
        project_id: doomed.id,
        board_id: backlog.id,
        title: "Archive".to_owned(),
        description: Some("before shutdown".to_owned()),
        status: TaskStatus::InProgress,
        assignee_id: None,
        created_at: now,
        updated_at: now,
    };
    assert!(repository.create_task(task.clone()).await.is_ok());

    let stored = repository.find_task(doomed.id, task.id).await;
    assert_eq!(
        stored.ok().flatten().map(|task| task.status),
        Some(TaskStatus::InProgress)
    );

    assert!(repository.delete_project(doomed.id).await.is_ok());
    assert!(matches!(repository.find_project(doomed.id).await, Ok(None)));
    assert!(matches!(
        repository.find_task(doomed.id, task.id).await,
        Ok(None)
    ));
    assert!(
        repository
            .list_boards(doomed.id)
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

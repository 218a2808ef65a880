use super::*;

#[derive(Debug, FromRow)]
struct TaskRow {
    id: uuid::Uuid,
    project_id: uuid::Uuid,
    board_id: uuid::Uuid,
    title: String,
    description: Option<String>,
    status: String,
    assignee_id: Option<uuid::Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_str(&row.status).map_err(|_| {
            AppError::Internal(format!(
                "invalid task status '{}' stored in database",
                row.status
            ))
        })?;

        Ok(Self {
            id: TaskId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            board_id: BoardId::from_uuid(row.board_id),
            title: row.title,
            description: row.description,
            status,
            assignee_id: row.assignee_id.map(AccountId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TaskRepository for PostgresProjectRepository {
    async fn list_tasks(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT
                id, project_id, board_id, title, description, status,
                assignee_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1 AND board_id = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(board_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list tasks: {error}")))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_task(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT
                id, project_id, board_id, title, description, status,
                assignee_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find task: {error}")))?;

        row.map(Task::try_from).transpose()
    }

    async fn create_task(&self, task: Task) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, project_id, board_id, title, description, status,
                assignee_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(task.project_id.as_uuid())
        .bind(task.board_id.as_uuid())
        .bind(task.title)
        .bind(task.description)
        .bind(task.status.as_str())
        .bind(task.assignee_id.map(|assignee| assignee.as_uuid()))
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create task: {error}")))?;

        Ok(())
    }

    async fn update_task(&self, task: Task) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET
                board_id = $3,
                title = $4,
                description = $5,
                status = $6,
                assignee_id = $7,
                updated_at = $8
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(task.project_id.as_uuid())
        .bind(task.id.as_uuid())
        .bind(task.board_id.as_uuid())
        .bind(task.title)
        .bind(task.description)
        .bind(task.status.as_str())
        .bind(task.assignee_id.map(|assignee| assignee.as_uuid()))
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update task: {error}")))?;

        ensure_affected(result.rows_affected(), "task", task.id)
    }

    async fn delete_task(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1 AND id = $2")
            .bind(project_id.as_uuid())
            .bind(task_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete task: {error}")))?;

        ensure_affected(result.rows_affected(), "task", task_id)
    }
}

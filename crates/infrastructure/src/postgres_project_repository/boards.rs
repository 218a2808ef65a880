use super::*;

#[derive(Debug, FromRow)]
struct BoardRow {
    id: uuid::Uuid,
    project_id: uuid::Uuid,
    name: String,
    position: i32,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Self {
            id: BoardId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            name: row.name,
            position: row.position,
        }
    }
}

#[async_trait]
impl BoardRepository for PostgresProjectRepository {
    async fn list_boards(&self, project_id: ProjectId) -> AppResult<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT id, project_id, name, position
            FROM boards
            WHERE project_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list boards: {error}")))?;

        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn find_board(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
    ) -> AppResult<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT id, project_id, name, position
            FROM boards
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(board_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find board: {error}")))?;

        Ok(row.map(Board::from))
    }

    async fn create_board(&self, board: Board) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO boards (id, project_id, name, position)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(board.id.as_uuid())
        .bind(board.project_id.as_uuid())
        .bind(board.name)
        .bind(board.position)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create board: {error}")))?;

        Ok(())
    }

    async fn rename_board(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        name: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE boards
            SET name = $3
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(board_id.as_uuid())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to rename board: {error}")))?;

        ensure_affected(result.rows_affected(), "board", board_id)
    }

    async fn delete_board(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM boards WHERE project_id = $1 AND id = $2")
            .bind(project_id.as_uuid())
            .bind(board_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete board: {error}")))?;

        ensure_affected(result.rows_affected(), "board", board_id)
    }
}

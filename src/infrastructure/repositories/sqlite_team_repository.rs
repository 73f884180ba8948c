use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::repositories::{RepositoryResult, TeamRepository};
use crate::domain::team::Team;

/// SQLite implementation of TeamRepository
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
    async fn save(&self, team: &mut Team) -> RepositoryResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO teams (id, name)
            VALUES (?, ?)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name
            "#,
        )
        .bind(team.id())
        .bind(team.name().to_string())
        .execute(&self.pool)
        .await?;

        let id = match team.id() {
            Some(id) => id,
            None => {
                let id = result.last_insert_rowid();
                team.assign_id(id);
                id
            }
        };

        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM teams WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, name)| Team::from_persistence(id, name)))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM teams WHERE name = ? ORDER BY id")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Team::from_persistence(id, name))
            .collect())
    }

    async fn find_member_ids(&self, team_id: i64) -> RepositoryResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM members WHERE team_id = ? ORDER BY id")
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }
}

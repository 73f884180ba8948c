use async_trait::async_trait;
use sqlx::SqlitePool;

use super::member_sql;
use crate::domain::member::Member;
use crate::domain::repositories::{MemberRepository, RepositoryResult};
use crate::domain::search::{
    AgeStatistics, MemberDto, MemberPredicate, MemberSearchCondition, MemberTeamDto, Page,
    PageRequest, TeamAgeAverage,
};

/// SQLite implementation of MemberRepository
///
/// Searches are assembled at runtime with sqlx's `QueryBuilder`; every
/// condition value is sent as a bound parameter.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::from_persistence(row.id, row.username, row.age, row.team_id)
    }
}

impl SqliteMemberRepository {
    /// Creates a new SqliteMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for SQLite
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_content(
        &self,
        predicates: &[MemberPredicate],
        page: Option<&PageRequest>,
    ) -> RepositoryResult<Vec<MemberTeamDto>> {
        let mut query = member_sql::content_query(predicates, page)?;
        tracing::debug!(sql = query.sql(), "Member search content query");

        let rows = query
            .build_query_as::<MemberTeamDto>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, predicates: &[MemberPredicate]) -> RepositoryResult<u64> {
        let mut query = member_sql::count_query(predicates);
        tracing::debug!(sql = query.sql(), "Member search count query");

        let total: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn save(&self, member: &mut Member) -> RepositoryResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO members (id, username, age, team_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                username = excluded.username,
                age = excluded.age,
                team_id = excluded.team_id
            "#,
        )
        .bind(member.id())
        .bind(member.username().map(str::to_string))
        .bind(member.age())
        .bind(member.team_id())
        .execute(&self.pool)
        .await?;

        let id = match member.id() {
            Some(id) => id,
            None => {
                let id = result.last_insert_rowid();
                member.assign_id(id);
                id
            }
        };

        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Member::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id FROM members ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            "SELECT id, username, age, team_id FROM members WHERE username = ? ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_all_summaries(&self) -> RepositoryResult<Vec<MemberDto>> {
        let rows = sqlx::query_as::<_, MemberDto>("SELECT username, age FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeamDto>> {
        if condition.is_unconstrained() {
            tracing::warn!("Unfiltered member search without paging returns every member");
        }

        self.fetch_content(&condition.predicates(), None).await
    }

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>> {
        let predicates = condition.predicates();
        let content = self.fetch_content(&predicates, Some(page)).await?;
        let total = self.count(&predicates).await?;

        Ok(Page::new(content, page, total))
    }

    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>> {
        let predicates = condition.predicates();
        let content = self.fetch_content(&predicates, Some(page)).await?;

        let predicates = &predicates;
        Page::assemble(content, page, move || self.count(predicates)).await
    }

    async fn age_statistics(&self) -> RepositoryResult<AgeStatistics> {
        let stats = sqlx::query_as::<_, AgeStatistics>(
            r#"
            SELECT
                COUNT(*) AS count,
                SUM(age) AS sum,
                AVG(age) AS average,
                MAX(age) AS max,
                MIN(age) AS min
            FROM members
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn average_age_by_team(&self) -> RepositoryResult<Vec<TeamAgeAverage>> {
        let rows = sqlx::query_as::<_, TeamAgeAverage>(
            r#"
            SELECT t.name AS team_name, AVG(m.age) AS average_age
            FROM members m
            JOIN teams t ON m.team_id = t.id
            GROUP BY t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

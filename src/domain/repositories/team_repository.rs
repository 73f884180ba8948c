use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::team::Team;

/// Repository trait for teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert or update a team, assigning its id on first save
    async fn save(&self, team: &mut Team) -> RepositoryResult<i64>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>>;

    /// Find all teams with the given name
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>>;

    /// IDs of the members that reference the team, in insertion order
    async fn find_member_ids(&self, team_id: i64) -> RepositoryResult<Vec<i64>>;
}

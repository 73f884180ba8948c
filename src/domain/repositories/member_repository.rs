use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::search::{
    AgeStatistics, MemberDto, MemberSearchCondition, MemberTeamDto, Page, PageRequest,
    TeamAgeAverage,
};

/// Repository trait for members and member searches
///
/// Searches always left join members to teams, so members without a team
/// are part of every result they match.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert or update a member, assigning its id on first save
    async fn save(&self, member: &mut Member) -> RepositoryResult<i64>;

    /// Find a member by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>>;

    /// All members in insertion order
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    /// All members with exactly this username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Username and age of every member
    async fn find_all_summaries(&self) -> RepositoryResult<Vec<MemberDto>>;

    /// Every row matching the condition, unpaged
    ///
    /// An unconstrained condition returns the whole table; prefer
    /// [`search_page_complex`](Self::search_page_complex) for user input.
    async fn search(&self, condition: &MemberSearchCondition)
        -> RepositoryResult<Vec<MemberTeamDto>>;

    /// One page of matches, always counting the total with a second query
    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>>;

    /// One page of matches, counting only when the total cannot be
    /// derived from the page content
    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>>;

    /// Count, sum, average, max and min of member ages
    async fn age_statistics(&self) -> RepositoryResult<AgeStatistics>;

    /// Average age per team, ordered by team name
    async fn average_age_by_team(&self) -> RepositoryResult<Vec<TeamAgeAverage>>;
}

use serde::Serialize;

/// Member joined with its (optional) team
///
/// Team fields are `None` when the member has no team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Username and age of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

/// Aggregates over every member's age
///
/// Sum, average and bounds are `None` when there are no members.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AgeStatistics {
    pub count: i64,
    pub sum: Option<i64>,
    pub average: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

/// Average member age for one team
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub average_age: f64,
}

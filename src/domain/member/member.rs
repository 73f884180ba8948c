use crate::domain::team::Team;

/// Member entity
///
/// A member optionally belongs to one team. The association is kept as a
/// foreign key value only; the team is resolved by query when needed.
///
/// # Invariants
/// - Age cannot be negative
/// - A member can only join a team that has already been persisted
///
/// # Example
/// ```
/// use member_query_api::domain::member::Member;
/// use member_query_api::domain::team::Team;
///
/// let team = Team::from_persistence(1, "teamA".to_string());
/// let member = Member::new(Some("member1".to_string()), 10, Some(&team))
///     .expect("valid member");
///
/// assert_eq!(member.username(), Some("member1"));
/// assert_eq!(member.team_id(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Option<i64>,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl Member {
    /// Creates a new, not yet persisted member
    ///
    /// # Arguments
    /// * `username` - Optional display name
    /// * `age` - Member's age (cannot be negative)
    /// * `team` - Team to join, must already have an id
    pub fn new(username: Option<String>, age: i32, team: Option<&Team>) -> Result<Self, String> {
        if age < 0 {
            return Err("Age cannot be negative".to_string());
        }

        let mut member = Self {
            id: None,
            username,
            age,
            team_id: None,
        };

        if let Some(team) = team {
            member.change_team(team)?;
        }

        Ok(member)
    }

    /// Creates a member without a team
    pub fn without_team(username: impl Into<String>, age: i32) -> Result<Self, String> {
        Self::new(Some(username.into()), age, None)
    }

    /// Moves the member to another team
    ///
    /// # Returns
    /// * `Err(String)` - If the team has not been saved yet
    pub fn change_team(&mut self, team: &Team) -> Result<(), String> {
        let team_id = team
            .id()
            .ok_or_else(|| "Team must be persisted before members can join".to_string())?;

        self.team_id = Some(team_id);
        Ok(())
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Records the id assigned by the store
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Reconstructs a Member from persistence layer data
    pub fn from_persistence(
        id: i64,
        username: Option<String>,
        age: i32,
        team_id: Option<i64>,
    ) -> Self {
        Self {
            id: Some(id),
            username,
            age,
            team_id,
        }
    }
}

/// Team entity
///
/// A named group of members. The team does not own a member collection:
/// the members of a team are resolved with
/// [`TeamRepository::find_member_ids`](crate::domain::repositories::TeamRepository::find_member_ids).
///
/// # Invariants
/// - Name cannot be empty or blank
/// - Id is assigned by the store on first save and never changes afterwards
///
/// # Example
/// ```
/// use member_query_api::domain::team::Team;
///
/// let team = Team::new("teamA").expect("valid team");
///
/// assert_eq!(team.name(), "teamA");
/// assert!(team.id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Option<i64>,
    name: String,
}

impl Team {
    /// Creates a new, not yet persisted team
    ///
    /// # Returns
    /// * `Ok(Team)` - New team without an id
    /// * `Err(String)` - If the name is blank
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        Ok(Self { id: None, name })
    }

    /// Returns the team's ID, `None` until saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records the id assigned by the store
    ///
    /// Only to be used by repository implementations after an insert.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Bypasses validation since the row was validated when stored.
    pub fn from_persistence(id: i64, name: String) -> Self {
        Self { id: Some(id), name }
    }
}

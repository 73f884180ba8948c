use super::projection::MemberTeamDto;

/// A single filter clause over the member/team join
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    /// `member.username = value`
    UsernameEq(String),
    /// `team.name = value`
    TeamNameEq(String),
    /// `member.age >= value`
    AgeGoe(i32),
    /// `member.age <= value`
    AgeLoe(i32),
}

impl MemberPredicate {
    /// Evaluates the predicate against an already joined row
    ///
    /// SQL semantics apply: a comparison with a missing username or team
    /// name is never true.
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        match self {
            MemberPredicate::UsernameEq(username) => row.username.as_deref() == Some(username),
            MemberPredicate::TeamNameEq(name) => row.team_name.as_deref() == Some(name),
            MemberPredicate::AgeGoe(bound) => row.age >= *bound,
            MemberPredicate::AgeLoe(bound) => row.age <= *bound,
        }
    }
}

/// Accumulates predicates that are combined with `AND`
///
/// An empty builder matches every row.
///
/// # Example
/// ```
/// use member_query_api::domain::search::{MemberPredicate, PredicateBuilder};
///
/// let builder = PredicateBuilder::new()
///     .and(MemberPredicate::AgeGoe(10))
///     .and_maybe(None);
///
/// assert_eq!(builder.predicates(), &[MemberPredicate::AgeGoe(10)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateBuilder {
    predicates: Vec<MemberPredicate>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause to the conjunction
    pub fn and(mut self, predicate: MemberPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds a clause when one is given, otherwise leaves the builder unchanged
    pub fn and_maybe(self, predicate: Option<MemberPredicate>) -> Self {
        match predicate {
            Some(predicate) => self.and(predicate),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[MemberPredicate] {
        &self.predicates
    }

    pub fn into_predicates(self) -> Vec<MemberPredicate> {
        self.predicates
    }

    /// True when every accumulated clause holds for the row
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(row))
    }
}

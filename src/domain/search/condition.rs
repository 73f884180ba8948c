use serde::Deserialize;

use super::predicate::{MemberPredicate, PredicateBuilder};
use super::query_value::optional_number;

/// Optional filters for a member search
///
/// Every field is independent. Absent fields, and text fields that are
/// empty or whitespace only, add no constraint. Age bounds given as an
/// empty string are treated as absent.
///
/// # Example
/// ```
/// use member_query_api::domain::search::MemberSearchCondition;
///
/// let condition = MemberSearchCondition {
///     team_name: Some("teamB".to_string()),
///     age_goe: Some(35),
///     ..Default::default()
/// };
///
/// assert_eq!(condition.predicates().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[serde(deserialize_with = "optional_number")]
    pub age_goe: Option<i32>,
    #[serde(deserialize_with = "optional_number")]
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Builds the conjunction of every constraint present in the condition
    pub fn to_builder(&self) -> PredicateBuilder {
        PredicateBuilder::new()
            .and_maybe(has_text(&self.username).map(MemberPredicate::UsernameEq))
            .and_maybe(has_text(&self.team_name).map(MemberPredicate::TeamNameEq))
            .and_maybe(self.age_goe.map(MemberPredicate::AgeGoe))
            .and_maybe(self.age_loe.map(MemberPredicate::AgeLoe))
    }

    /// Returns the predicates this condition contributes, in clause order
    pub fn predicates(&self) -> Vec<MemberPredicate> {
        self.to_builder().into_predicates()
    }

    /// True when no field constrains the search
    pub fn is_unconstrained(&self) -> bool {
        self.to_builder().is_empty()
    }
}

fn has_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

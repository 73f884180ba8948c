// SQL rendering for member searches
// Predicates and sort terms become bound parameters and fixed column names

use sqlx::{QueryBuilder, Sqlite};

use crate::domain::repositories::{RepositoryError, RepositoryResult};
use crate::domain::search::{Direction, MemberPredicate, MemberSortProperty, PageRequest};

const SELECT_MEMBER_TEAM: &str = "SELECT m.id AS member_id, m.username, m.age, \
     t.id AS team_id, t.name AS team_name \
     FROM members m LEFT JOIN teams t ON m.team_id = t.id";

const COUNT_MEMBER_TEAM: &str =
    "SELECT COUNT(*) FROM members m LEFT JOIN teams t ON m.team_id = t.id";

/// Builds the content query, paged when a page request is given
pub fn content_query<'args>(
    predicates: &[MemberPredicate],
    page: Option<&PageRequest>,
) -> RepositoryResult<QueryBuilder<'args, Sqlite>> {
    let mut query = QueryBuilder::new(SELECT_MEMBER_TEAM);
    push_where(&mut query, predicates);

    match page {
        Some(page) => {
            push_order_by(&mut query, page);
            push_limit_offset(&mut query, page)?;
        }
        None => {
            query.push(" ORDER BY m.id ASC");
        }
    }

    Ok(query)
}

/// Builds the query counting every row the predicates match
pub fn count_query<'args>(predicates: &[MemberPredicate]) -> QueryBuilder<'args, Sqlite> {
    let mut query = QueryBuilder::new(COUNT_MEMBER_TEAM);
    push_where(&mut query, predicates);
    query
}

fn push_where(query: &mut QueryBuilder<'_, Sqlite>, predicates: &[MemberPredicate]) {
    if predicates.is_empty() {
        return;
    }

    query.push(" WHERE ");
    let mut clauses = query.separated(" AND ");
    for predicate in predicates {
        match predicate {
            MemberPredicate::UsernameEq(username) => {
                clauses.push("m.username = ");
                clauses.push_bind_unseparated(username.clone());
            }
            MemberPredicate::TeamNameEq(name) => {
                clauses.push("t.name = ");
                clauses.push_bind_unseparated(name.clone());
            }
            MemberPredicate::AgeGoe(bound) => {
                clauses.push("m.age >= ");
                clauses.push_bind_unseparated(*bound);
            }
            MemberPredicate::AgeLoe(bound) => {
                clauses.push("m.age <= ");
                clauses.push_bind_unseparated(*bound);
            }
        }
    }
}

fn push_order_by(query: &mut QueryBuilder<'_, Sqlite>, page: &PageRequest) {
    query.push(" ORDER BY ");
    let mut terms = query.separated(", ");
    for order in page.sort() {
        let direction = match order.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        let nulls = if order.nulls_last { " NULLS LAST" } else { "" };
        terms.push(format!("{} {}{}", column(order.property), direction, nulls));
    }

    // member id keeps pages stable when the requested order has ties
    if !page
        .sort()
        .iter()
        .any(|order| order.property == MemberSortProperty::MemberId)
    {
        terms.push("m.id ASC");
    }
}

fn push_limit_offset(query: &mut QueryBuilder<'_, Sqlite>, page: &PageRequest) -> RepositoryResult<()> {
    // page and size are each u32, so their product can exceed i64::MAX
    let offset = i64::try_from(page.offset())
        .map_err(|_| RepositoryError::Invalid(format!("Page offset too large: {}", page.offset())))?;

    query.push(" LIMIT ");
    query.push_bind(i64::from(page.size()));
    query.push(" OFFSET ");
    query.push_bind(offset);
    Ok(())
}

fn column(property: MemberSortProperty) -> &'static str {
    match property {
        MemberSortProperty::MemberId => "m.id",
        MemberSortProperty::Username => "m.username",
        MemberSortProperty::Age => "m.age",
        MemberSortProperty::TeamId => "t.id",
        MemberSortProperty::TeamName => "t.name",
    }
}

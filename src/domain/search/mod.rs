// Member search module
// Search conditions, predicate assembly, paging and read projections

pub mod condition;
pub mod page;
pub mod predicate;
pub mod projection;
pub mod query_value;

pub use condition::MemberSearchCondition;
pub use page::{Direction, MemberSortProperty, Order, Page, PageRequest};
pub use predicate::{MemberPredicate, PredicateBuilder};
pub use projection::{AgeStatistics, MemberDto, MemberTeamDto, TeamAgeAverage};

// Repository traits (ports)
// Implemented by adapters in the infrastructure layer

pub mod errors;
pub mod member_repository;
pub mod team_repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use member_repository::MemberRepository;
pub use team_repository::TeamRepository;

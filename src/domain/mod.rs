// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod member;
pub mod repositories;
pub mod search;
pub mod team;

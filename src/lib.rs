//! Member Query API Library
//!
//! Members, teams and a dynamic member search over their left join:
//! optional filters are combined into one conjunctive query and results
//! are returned whole or one page at a time.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

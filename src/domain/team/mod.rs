// Team domain module
// Teams do not hold their members; membership is derived from members.team_id

#![allow(clippy::module_inception)]

pub mod team;

pub use team::Team;

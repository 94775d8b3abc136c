//! CLI subcommand implementations

pub mod check;
pub mod list;
pub mod new;
pub mod paths;
pub mod search;
pub mod show;

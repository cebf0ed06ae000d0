//! CLI subcommand implementations.

pub mod cars;
pub mod delete;
pub mod form;
pub mod list;
pub mod reference;

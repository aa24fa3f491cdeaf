//! CLI subcommand implementations.

pub mod draft;
pub mod fetch;
pub mod publish;
pub mod validate;

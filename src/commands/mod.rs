//! CLI commands

pub mod build;
pub mod check;
pub mod clean;
pub mod resolve;
pub mod routes;

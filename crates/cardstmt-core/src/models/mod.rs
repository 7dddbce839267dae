//! Data models: statements, results and configuration.

pub mod config;
pub mod result;
pub mod statement;

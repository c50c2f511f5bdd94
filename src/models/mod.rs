//! Settings models read from the environment.

pub mod config;

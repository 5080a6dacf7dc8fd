pub mod completions;
pub mod config;
pub mod phases;
pub mod plan;

pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod notes;
pub mod open;
pub mod tests_cmd;
pub mod textbooks;

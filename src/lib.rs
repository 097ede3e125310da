// Library interface for testing

pub mod clean;
pub mod cli;
pub mod error;
pub mod executor;
pub mod project;
pub mod utils;

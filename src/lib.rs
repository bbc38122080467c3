pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod identity;
pub mod logging;
pub mod ndjson;
pub mod ranking;
pub mod types;
pub mod viewer;

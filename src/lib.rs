pub mod config;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod risk;
pub mod types;

pub mod cli;
pub mod config;
pub mod csv_writer;
pub mod enricher;
pub mod error;
pub mod github;
pub mod merger;
pub mod models;
pub mod paginator;
pub mod pipeline;
pub mod progress;
pub mod types;

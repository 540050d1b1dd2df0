pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod interactive;
pub mod session;
pub mod views;

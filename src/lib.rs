pub mod annotations;
pub mod cli;
pub mod config;
pub mod document;
pub mod ingest;
pub mod layout;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod settings;
pub mod ui;

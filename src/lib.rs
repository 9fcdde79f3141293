pub mod cache;
pub mod completion;
pub mod config;
pub mod engine;
pub mod logging;
pub mod models;
pub mod prefetch;
pub mod sources;
pub mod text;

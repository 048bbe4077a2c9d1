pub mod config;
pub mod errors;
pub mod gemini;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod routes;
pub mod service;
pub mod store;

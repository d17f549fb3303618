pub mod api;
pub mod backup;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod grouping;
pub mod models;
pub mod session;

pub use error::ConsoleError;

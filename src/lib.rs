pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod readers;
pub mod utils;

pub use error::{LoadError, Result};

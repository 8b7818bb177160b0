pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod state;
pub mod types;
pub mod utils;

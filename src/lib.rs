pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod remote;
pub mod sizing;

pub use config::Config;
pub use error::{Result, SnapkeepError};

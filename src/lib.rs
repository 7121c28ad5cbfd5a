pub mod changes;
pub mod config;
pub mod error;
pub mod gateway;
pub mod merge;
pub mod tags;
pub mod ui;
pub mod version;
pub mod workflow;

pub use error::{GitMergerError, Result};

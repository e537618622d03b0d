pub mod analyzer;
pub mod archive;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod gitlab;
pub mod ui;

pub use error::{ReleaserError, Result};

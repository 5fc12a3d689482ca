//! # WFP Common Library
//!
//! Shared code for the WFP (WebForm Processor) services:
//! - Common error type
//! - TOML configuration loading
//! - SQLite pool bootstrap

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};

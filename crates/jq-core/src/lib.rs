//! # jq-core
//!
//! Core types shared by the JQL navigator crates.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The error taxonomy and `SearchResult` alias
//! - Identifier traits (Id, Identifiable)
//! - Domain entities consumed by the core (users, projects, issue types, versions, groups, options)
//! - Configuration types

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::SearchConfig;
pub use error::*;
pub use traits::*;
pub use types::*;

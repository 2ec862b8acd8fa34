//! libcat: an in-memory library catalog
//!
//! Tracks book titles and their physical instances, registered patrons of
//! three kinds, and the active loans between them. The [`services::Library`]
//! facade is the programmatic surface; [`shell::Shell`] binds a line-oriented
//! command grammar to it.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod shell;

pub use crate::config::AppConfig;
pub use crate::error::{LibraryError, LibraryResult};
pub use crate::services::Library;

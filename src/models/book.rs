//! Book (catalog entry) model

use serde::Serialize;

use super::author::Author;
use crate::error::{LibraryError, LibraryResult};

/// A catalog title with a fixed number of physical instances.
///
/// Only `borrowed_count` changes after construction, and only through the
/// ledger (`check_out` / `check_in` are crate-private).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    isbn: String,
    author: Author,
    title: String,
    instance_count: u32,
    borrowed_count: u32,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        author: Author,
        title: impl Into<String>,
        instance_count: u32,
    ) -> LibraryResult<Self> {
        let isbn = isbn.into();
        let title = title.into();

        if isbn.is_empty() {
            return Err(LibraryError::InvalidArgument("ISBN must not be empty".to_string()));
        }
        if title.is_empty() {
            return Err(LibraryError::InvalidArgument("Title must not be empty".to_string()));
        }
        if instance_count < 1 {
            return Err(LibraryError::InvalidArgument(
                "Instance count should be more than zero".to_string(),
            ));
        }

        Ok(Self {
            isbn,
            author,
            title,
            instance_count,
            borrowed_count: 0,
        })
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    pub fn borrowed_count(&self) -> u32 {
        self.borrowed_count
    }

    /// Number of instances still on the shelf
    pub fn free_count(&self) -> u32 {
        self.instance_count - self.borrowed_count
    }

    pub fn is_available(&self) -> bool {
        self.borrowed_count < self.instance_count
    }

    pub(crate) fn check_out(&mut self) -> LibraryResult<()> {
        if !self.is_available() {
            return Err(LibraryError::BookUnavailable(format!(
                "No instances of '{}' (ISBN {}) available",
                self.title, self.isbn
            )));
        }
        self.borrowed_count += 1;
        Ok(())
    }

    pub(crate) fn check_in(&mut self) -> LibraryResult<()> {
        if self.borrowed_count == 0 {
            return Err(LibraryError::InvariantViolation(format!(
                "No instances of ISBN {} were borrowed, cannot return",
                self.isbn
            )));
        }
        self.borrowed_count -= 1;
        Ok(())
    }
}

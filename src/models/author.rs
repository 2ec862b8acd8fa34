//! Author value object

use serde::Serialize;

use crate::error::{LibraryError, LibraryResult};

/// An author, identified by name alone.
///
/// Two authors with the same name are the same author; equality and hashing
/// follow the name exactly (no case folding).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Author(String);

impl Author {
    pub fn new(name: impl Into<String>) -> LibraryResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LibraryError::InvalidArgument(
                "Author name must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Registry of patrons keyed by email

use std::collections::{hash_map::Entry, HashMap};

use crate::{
    error::{LibraryError, LibraryResult},
    models::Patron,
};

/// Owns every [`Patron`]. Emails are compared case-sensitively.
#[derive(Debug, Default)]
pub struct Registry {
    patrons: HashMap<String, Patron>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, patron: Patron) -> LibraryResult<&Patron> {
        match self.patrons.entry(patron.email().to_string()) {
            Entry::Occupied(_) => Err(LibraryError::DuplicateKey(format!(
                "User with email '{}' already exists",
                patron.email()
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(patron)),
        }
    }

    pub fn remove(&mut self, email: &str) -> LibraryResult<Patron> {
        self.patrons.remove(email).ok_or_else(|| no_such_email(email))
    }

    pub fn find_by_email(&self, email: &str) -> LibraryResult<&Patron> {
        self.patrons.get(email).ok_or_else(|| no_such_email(email))
    }

    pub fn find_by_email_mut(&mut self, email: &str) -> LibraryResult<&mut Patron> {
        self.patrons.get_mut(email).ok_or_else(|| no_such_email(email))
    }

    /// All patrons, ordered by email
    pub fn list(&self) -> Vec<&Patron> {
        let mut patrons: Vec<&Patron> = self.patrons.values().collect();
        patrons.sort_by(|a, b| a.email().cmp(b.email()));
        patrons
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }
}

fn no_such_email(email: &str) -> LibraryError {
    LibraryError::NotFound(format!("No such user with email '{}'", email))
}

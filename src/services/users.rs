//! Patron management service

use crate::{
    error::{LibraryError, LibraryResult},
    models::{Patron, PatronKind},
};

use super::Library;

impl Library {
    pub fn register(
        &mut self,
        kind: PatronKind,
        name: &str,
        email: &str,
    ) -> LibraryResult<&Patron> {
        let patron = self.registry.add(Patron::new(name, email, kind)?)?;
        tracing::info!("Registered {} '{}' <{}>", kind, patron.name(), patron.email());
        Ok(patron)
    }

    /// Remove a patron. Refused while the patron holds any loan.
    pub fn remove_patron(&mut self, email: &str) -> LibraryResult<Patron> {
        let patron = self.registry.find_by_email(email)?;
        if patron.borrowed_books() > 0 {
            return Err(LibraryError::InUse(format!(
                "User '{}' still has {} book(s) on loan",
                email,
                patron.borrowed_books()
            )));
        }

        let patron = self.registry.remove(email)?;
        tracing::info!("Removed user <{}>", patron.email());
        Ok(patron)
    }

    pub fn find_patron(&self, email: &str) -> LibraryResult<&Patron> {
        self.registry.find_by_email(email)
    }

    pub fn list_patrons(&self) -> Vec<&Patron> {
        self.registry.list()
    }
}

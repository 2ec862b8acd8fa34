//! Loan management service

use crate::{
    error::{LibraryError, LibraryResult},
    models::{BorrowingRecord, LoanDetails},
};

use super::Library;

impl Library {
    /// Lend the book with `isbn` to the patron with `email`
    pub fn borrow(&mut self, email: &str, isbn: &str) -> LibraryResult<BorrowingRecord> {
        let patron = self.registry.find_by_email_mut(email)?;
        let book = self.catalog.find_by_isbn_mut(isbn)?;

        let record = self.ledger.borrow(patron, book)?;
        tracing::info!(
            "{} borrowed ISBN {}, due {}",
            record.patron_email,
            record.isbn,
            record.return_due_date
        );
        Ok(record)
    }

    /// Return the book with `isbn` borrowed by the patron with `email`
    pub fn return_loan(&mut self, email: &str, isbn: &str) -> LibraryResult<BorrowingRecord> {
        let patron = self.registry.find_by_email_mut(email)?;
        let book = self.catalog.find_by_isbn_mut(isbn)?;

        let record = self.ledger.return_loan(patron, book)?;
        tracing::info!("{} returned ISBN {}", record.patron_email, record.isbn);
        Ok(record)
    }

    pub fn overdues(&self) -> Vec<&BorrowingRecord> {
        self.ledger.overdues()
    }

    /// Active loans of one patron
    pub fn loans_of(&self, email: &str) -> LibraryResult<Vec<&BorrowingRecord>> {
        self.registry.find_by_email(email)?;
        Ok(self.ledger.loans_of(email))
    }

    pub fn count_active(&self) -> usize {
        self.ledger.len()
    }

    pub fn count_overdue(&self) -> usize {
        self.ledger.count_overdue()
    }

    /// Resolve the patron and book behind a record
    pub fn loan_details(&self, record: &BorrowingRecord) -> LibraryResult<LoanDetails> {
        let dangling = |what: &str| {
            LibraryError::InvariantViolation(format!(
                "Loan of ISBN {} by {} references a missing {}",
                record.isbn, record.patron_email, what
            ))
        };
        let patron = self
            .registry
            .find_by_email(&record.patron_email)
            .map_err(|_| dangling("user"))?;
        let book = self
            .catalog
            .find_by_isbn(&record.isbn)
            .map_err(|_| dangling("book"))?;

        Ok(LoanDetails {
            borrow_date: record.borrow_date,
            return_due_date: record.return_due_date,
            patron_name: patron.name().to_string(),
            patron_email: record.patron_email.clone(),
            isbn: record.isbn.clone(),
            title: book.title().to_string(),
            is_overdue: record.is_overdue(self.current_date()),
        })
    }
}

//! Ledger of active borrowings
//!
//! The ledger is the only place that changes `Book::borrowed_count` and
//! `Patron::borrowed_books`. Every transaction either completes or leaves the
//! ledger, the book and the patron exactly as they were on entry.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::{
    error::{LibraryError, LibraryResult},
    models::{Book, BorrowingRecord, Patron},
};

/// (patron email, isbn)
type LoanKey = (String, String);

#[derive(Debug)]
pub struct Ledger {
    current_date: NaiveDate,
    by_key: HashMap<LoanKey, BorrowingRecord>,
    by_due: BTreeSet<BorrowingRecord>,
}

impl Ledger {
    pub fn new(current_date: NaiveDate) -> Self {
        Self {
            current_date,
            by_key: HashMap::new(),
            by_due: BTreeSet::new(),
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Replace the date used for new loans and for the overdue query.
    /// Existing records are not rewritten.
    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    /// Lend one instance of `book` to `patron`.
    ///
    /// The book is checked before the patron. Callers pass aggregates taken
    /// from the catalog and registry; membership is not re-checked here.
    pub fn borrow(
        &mut self,
        patron: &mut Patron,
        book: &mut Book,
    ) -> LibraryResult<BorrowingRecord> {
        let record = BorrowingRecord::new(self.current_date, patron, book)?;

        book.check_out()?;

        if let Err(err) = patron.check_out() {
            book.check_in()?;
            return Err(err);
        }

        let key = loan_key(patron, book);
        if self.by_key.contains_key(&key) {
            patron.check_in()?;
            book.check_in()?;
            return Err(LibraryError::DuplicateBorrow(format!(
                "{} already has '{}' (ISBN {}) on loan",
                patron.email(),
                book.title(),
                book.isbn()
            )));
        }

        self.by_due.insert(record.clone());
        self.by_key.insert(key, record.clone());
        Ok(record)
    }

    /// Close the active loan of `book` by `patron` and hand back its record
    pub fn return_loan(
        &mut self,
        patron: &mut Patron,
        book: &mut Book,
    ) -> LibraryResult<BorrowingRecord> {
        let key = loan_key(patron, book);
        let record = self.by_key.get(&key).ok_or_else(|| {
            LibraryError::LoanNotFound(format!(
                "No borrowing record found for user '{}' and book '{}'",
                patron.email(),
                book.title()
            ))
        })?;

        if !self.by_due.contains(record) {
            return Err(LibraryError::InvariantViolation(format!(
                "Loan of ISBN {} by {} missing from due-date index",
                book.isbn(),
                patron.email()
            )));
        }
        if book.borrowed_count() == 0 || patron.borrowed_books() == 0 {
            return Err(LibraryError::InvariantViolation(format!(
                "Counters already at zero for loan of ISBN {} by {}",
                book.isbn(),
                patron.email()
            )));
        }

        let record = self
            .by_key
            .remove(&key)
            .ok_or_else(|| LibraryError::InvariantViolation("loan vanished".to_string()))?;
        self.by_due.remove(&record);
        book.check_in()?;
        patron.check_in()?;
        Ok(record)
    }

    /// Loans due strictly before the current date, in due-date order
    pub fn overdues(&self) -> Vec<&BorrowingRecord> {
        self.by_due
            .iter()
            .take_while(|r| r.is_overdue(self.current_date))
            .collect()
    }

    pub fn count_overdue(&self) -> usize {
        self.by_due
            .iter()
            .take_while(|r| r.is_overdue(self.current_date))
            .count()
    }

    /// Active loans of one patron, in due-date order
    pub fn loans_of(&self, email: &str) -> Vec<&BorrowingRecord> {
        self.by_due
            .iter()
            .filter(|r| r.patron_email == email)
            .collect()
    }

    pub fn find(&self, email: &str, isbn: &str) -> Option<&BorrowingRecord> {
        self.by_key.get(&(email.to_string(), isbn.to_string()))
    }

    /// All active loans, in due-date order
    pub fn iter(&self) -> impl Iterator<Item = &BorrowingRecord> {
        self.by_due.iter()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn loan_key(patron: &Patron, book: &Book) -> LoanKey {
    (patron.email().to_string(), book.isbn().to_string())
}

//! Borrowing record model

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::{book::Book, patron::Patron};
use crate::error::{LibraryError, LibraryResult};

/// An active loan of one book instance by one patron.
///
/// Records hold the patron email and book ISBN rather than the aggregates;
/// both are resolved through the registry and catalog when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowingRecord {
    pub borrow_date: NaiveDate,
    pub return_due_date: NaiveDate,
    pub patron_email: String,
    pub isbn: String,
}

/// Loan with patron and book details resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanDetails {
    pub borrow_date: NaiveDate,
    pub return_due_date: NaiveDate,
    pub patron_name: String,
    pub patron_email: String,
    pub isbn: String,
    pub title: String,
    pub is_overdue: bool,
}

impl BorrowingRecord {
    pub(crate) fn new(borrow_date: NaiveDate, patron: &Patron, book: &Book) -> LibraryResult<Self> {
        let return_due_date = borrow_date
            .checked_add_signed(Duration::days(patron.max_return_days() as i64))
            .ok_or_else(|| {
                LibraryError::InvalidArgument(format!(
                    "Due date out of range for loans starting {}",
                    borrow_date
                ))
            })?;

        Ok(Self {
            borrow_date,
            return_due_date,
            patron_email: patron.email().to_string(),
            isbn: book.isbn().to_string(),
        })
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.return_due_date < today
    }
}

/// Lexicographic comparison ignoring case, without allocating
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Ord for BorrowingRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.return_due_date
            .cmp(&other.return_due_date)
            .then_with(|| cmp_ignore_case(&self.patron_email, &other.patron_email))
            .then_with(|| cmp_ignore_case(&self.isbn, &other.isbn))
            // Emails differing only by case belong to distinct patrons.
            .then_with(|| self.patron_email.cmp(&other.patron_email))
            .then_with(|| self.isbn.cmp(&other.isbn))
            .then_with(|| self.borrow_date.cmp(&other.borrow_date))
    }
}

impl PartialOrd for BorrowingRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

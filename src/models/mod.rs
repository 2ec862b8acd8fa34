//! Data models for the library core

pub mod author;
pub mod book;
pub mod loan;
pub mod patron;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use loan::{BorrowingRecord, LoanDetails};
pub use patron::{LoanPolicy, Patron, PatronKind};

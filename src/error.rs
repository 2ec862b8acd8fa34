//! Error types for the library core

use thiserror::Error;

/// Stable error codes reported by the shell alongside each diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DuplicateKey = 1,
    NotFound = 2,
    BookUnavailable = 3,
    PatronLimitExceeded = 4,
    LoanNotFound = 5,
    DuplicateBorrow = 6,
    InvariantViolation = 7,
    InvalidArgument = 8,
    InUse = 9,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Main library error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Book unavailable: {0}")]
    BookUnavailable(String),

    #[error("Patron limit exceeded: {0}")]
    PatronLimitExceeded(String),

    #[error("Loan not found: {0}")]
    LoanNotFound(String),

    #[error("Duplicate borrow: {0}")]
    DuplicateBorrow(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("In use: {0}")]
    InUse(String),
}

impl LibraryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LibraryError::DuplicateKey(_) => ErrorCode::DuplicateKey,
            LibraryError::NotFound(_) => ErrorCode::NotFound,
            LibraryError::BookUnavailable(_) => ErrorCode::BookUnavailable,
            LibraryError::PatronLimitExceeded(_) => ErrorCode::PatronLimitExceeded,
            LibraryError::LoanNotFound(_) => ErrorCode::LoanNotFound,
            LibraryError::DuplicateBorrow(_) => ErrorCode::DuplicateBorrow,
            LibraryError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            LibraryError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            LibraryError::InUse(_) => ErrorCode::InUse,
        }
    }

    /// True when the error reveals a bug rather than a rejected request
    pub fn is_bug(&self) -> bool {
        matches!(self, LibraryError::InvariantViolation(_))
    }
}

/// Result type alias for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

//! Patron model and borrowing policies

use serde::Serialize;

use crate::error::{LibraryError, LibraryResult};

/// Patron kinds. The set is closed; each kind maps to a fixed [`LoanPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatronKind {
    Student,
    Faculty,
    Guest,
}

/// Per-kind borrowing constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    pub max_return_days: u32,
    pub max_books: u32,
}

impl PatronKind {
    pub const fn policy(self) -> LoanPolicy {
        match self {
            PatronKind::Student => LoanPolicy {
                max_return_days: 14,
                max_books: 3,
            },
            PatronKind::Faculty => LoanPolicy {
                max_return_days: 30,
                max_books: 10,
            },
            PatronKind::Guest => LoanPolicy {
                max_return_days: 7,
                max_books: 1,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatronKind::Student => "student",
            PatronKind::Faculty => "faculty",
            PatronKind::Guest => "guest",
        }
    }
}

impl std::fmt::Display for PatronKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for PatronKind {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(PatronKind::Student),
            "faculty" => Ok(PatronKind::Faculty),
            "guest" => Ok(PatronKind::Guest),
            _ => Err(LibraryError::InvalidArgument(format!(
                "Invalid patron kind: {}",
                s
            ))),
        }
    }
}

/// A registered patron. `borrowed_books` is maintained by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patron {
    name: String,
    email: String,
    kind: PatronKind,
    borrowed_books: u32,
}

impl Patron {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        kind: PatronKind,
    ) -> LibraryResult<Self> {
        let email = email.into();
        if email.is_empty() {
            return Err(LibraryError::InvalidArgument("Email must not be empty".to_string()));
        }

        Ok(Self {
            name: name.into(),
            email,
            kind,
            borrowed_books: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn kind(&self) -> PatronKind {
        self.kind
    }

    pub fn borrowed_books(&self) -> u32 {
        self.borrowed_books
    }

    pub fn max_books(&self) -> u32 {
        self.kind.policy().max_books
    }

    pub fn max_return_days(&self) -> u32 {
        self.kind.policy().max_return_days
    }

    pub fn at_limit(&self) -> bool {
        self.borrowed_books >= self.max_books()
    }

    pub(crate) fn check_out(&mut self) -> LibraryResult<()> {
        if self.at_limit() {
            return Err(LibraryError::PatronLimitExceeded(format!(
                "{} isn't allowed to have more than {} book(s)",
                self.email,
                self.max_books()
            )));
        }
        self.borrowed_books += 1;
        Ok(())
    }

    pub(crate) fn check_in(&mut self) -> LibraryResult<()> {
        if self.borrowed_books == 0 {
            return Err(LibraryError::InvariantViolation(format!(
                "{} has no borrowed books, cannot return",
                self.email
            )));
        }
        self.borrowed_books -= 1;
        Ok(())
    }
}

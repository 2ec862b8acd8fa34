//! Library services: the programmatic surface driven by the shell

pub mod catalog;
pub mod clock;
pub mod loans;
pub mod users;

use chrono::NaiveDate;

use crate::repository::{Catalog, Ledger, Registry};

pub use clock::{Clock, SystemClock};

/// Owns the catalog, registry and ledger and resolves ISBNs and emails into
/// the aggregates the ledger works on.
pub struct Library {
    catalog: Catalog,
    registry: Registry,
    ledger: Ledger,
    clock: Box<dyn Clock>,
    date_pinned: bool,
}

impl Library {
    /// Create an empty library whose date follows `clock`
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        Self {
            catalog: Catalog::new(),
            registry: Registry::new(),
            ledger: Ledger::new(today),
            clock,
            date_pinned: false,
        }
    }

    /// Create an empty library with the date pinned to `date`
    pub fn with_date(date: NaiveDate) -> Self {
        let mut library = Self::new(Box::new(SystemClock));
        library.set_current_date(date);
        library
    }

    pub fn current_date(&self) -> NaiveDate {
        self.ledger.current_date()
    }

    /// Pin the current date. The clock is ignored from now on.
    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.date_pinned = true;
        self.ledger.set_current_date(date);
        tracing::info!("Current date set to {}", date);
    }

    pub fn is_date_pinned(&self) -> bool {
        self.date_pinned
    }

    /// Pull today's date from the clock unless the date has been pinned
    pub fn refresh_date(&mut self) {
        if self.date_pinned {
            return;
        }
        let today = self.clock.today();
        if today != self.ledger.current_date() {
            tracing::debug!("Current date advanced to {}", today);
            self.ledger.set_current_date(today);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

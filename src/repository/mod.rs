//! In-memory stores owning the library indexes

pub mod catalog;
pub mod ledger;
pub mod registry;

pub use catalog::Catalog;
pub use ledger::Ledger;
pub use registry::Registry;

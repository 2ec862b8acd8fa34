//! Cross-component invariants checked after a mixed workload

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use libcat::{error::ErrorCode, models::PatronKind, Library};

/// Counters on books and patrons equal the number of ledger records naming them
fn assert_counters_match_ledger(library: &Library) {
    let mut per_book: HashMap<&str, u32> = HashMap::new();
    let mut per_patron: HashMap<&str, u32> = HashMap::new();
    for record in library.ledger().iter() {
        *per_book.entry(record.isbn.as_str()).or_default() += 1;
        *per_patron.entry(record.patron_email.as_str()).or_default() += 1;
        assert!(library.catalog().contains(&record.isbn));
        assert!(library.registry().find_by_email(&record.patron_email).is_ok());
    }

    for book in library.catalog().list() {
        let expected = per_book.get(book.isbn()).copied().unwrap_or(0);
        assert_eq!(book.borrowed_count(), expected, "book {}", book.isbn());
        assert!(book.borrowed_count() <= book.instance_count());
    }
    for patron in library.registry().list() {
        let expected = per_patron.get(patron.email()).copied().unwrap_or(0);
        assert_eq!(patron.borrowed_books(), expected, "patron {}", patron.email());
        assert!(patron.borrowed_books() <= patron.max_books());
    }
}

/// The due-date order and the (patron, book) lookup hold the same records
fn assert_ledger_indexes_agree(library: &Library) {
    let ledger = library.ledger();
    let ordered: Vec<_> = ledger.iter().collect();
    assert_eq!(ordered.len(), ledger.len());
    assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));

    for record in &ordered {
        assert_eq!(ledger.find(&record.patron_email, &record.isbn), Some(*record));
    }
    let per_patron: usize = library
        .registry()
        .list()
        .iter()
        .map(|patron| ledger.loans_of(patron.email()).len())
        .sum();
    assert_eq!(per_patron, ledger.len());
}

/// Everything observable about loans, for comparing state across a failed call
fn snapshot(library: &Library) -> (BTreeSet<(String, String)>, Vec<u32>, Vec<u32>) {
    let loans = library
        .ledger()
        .iter()
        .map(|r| (r.patron_email.clone(), r.isbn.clone()))
        .collect();
    let books = library.catalog().list().iter().map(|b| b.borrowed_count()).collect();
    let patrons = library.registry().list().iter().map(|p| p.borrowed_books()).collect();
    (loans, books, patrons)
}

#[test]
fn test_invariants_hold_through_failures() {
    let mut library = Library::with_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    for (isbn, instances) in [("1", 1), ("2", 2), ("3", 3), ("4", 1)] {
        library.add_book(isbn, &format!("T{}", isbn), "X", instances).unwrap();
    }
    library.register(PatronKind::Student, "S", "s@e.t").unwrap();
    library.register(PatronKind::Guest, "G", "g@e.t").unwrap();
    library.register(PatronKind::Faculty, "F", "f@e.t").unwrap();

    let steps: [(&str, &str, &str, Option<ErrorCode>); 14] = [
        ("borrow", "s@e.t", "1", None),
        ("borrow", "g@e.t", "1", Some(ErrorCode::BookUnavailable)),
        ("borrow", "g@e.t", "2", None),
        ("borrow", "g@e.t", "3", Some(ErrorCode::PatronLimitExceeded)),
        ("borrow", "s@e.t", "2", None),
        ("borrow", "s@e.t", "2", Some(ErrorCode::BookUnavailable)),
        ("borrow", "s@e.t", "3", None),
        ("borrow", "s@e.t", "4", Some(ErrorCode::PatronLimitExceeded)),
        ("return", "f@e.t", "4", Some(ErrorCode::LoanNotFound)),
        ("borrow", "f@e.t", "4", None),
        ("return", "s@e.t", "1", None),
        ("borrow", "f@e.t", "1", None),
        ("remove", "", "2", Some(ErrorCode::InUse)),
        ("return", "g@e.t", "2", None),
    ];

    for (op, email, isbn, expected) in steps {
        let before = snapshot(&library);
        let result = match op {
            "borrow" => library.borrow(email, isbn).map(|_| ()),
            "return" => library.return_loan(email, isbn).map(|_| ()),
            _ => library.remove_book(isbn).map(|_| ()),
        };

        assert_eq!(
            result.as_ref().err().map(|e| e.code()),
            expected,
            "{} {} {}",
            op,
            email,
            isbn
        );
        if result.is_err() {
            assert_eq!(snapshot(&library), before, "{} {} {} changed state", op, email, isbn);
        }
        assert_counters_match_ledger(&library);
        assert_ledger_indexes_agree(&library);
    }

    assert_eq!(library.find_patron("s@e.t").unwrap().borrowed_books(), 2);
    assert_eq!(library.find_patron("g@e.t").unwrap().borrowed_books(), 0);
    assert_eq!(library.find_patron("f@e.t").unwrap().borrowed_books(), 2);
    assert_eq!(library.count_active(), 4);
}

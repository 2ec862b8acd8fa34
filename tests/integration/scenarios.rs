//! End-to-end scenarios through the `Library` surface

use chrono::NaiveDate;
use libcat::{models::PatronKind, Library, LibraryError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn library() -> Library {
    Library::with_date(date(2024, 1, 1))
}

#[test]
fn test_basic_loan_lifecycle() {
    let mut library = library();
    library.add_book("111", "A", "X", 2).unwrap();
    library.register(PatronKind::Student, "S", "s@e.t").unwrap();

    let record = library.borrow("s@e.t", "111").unwrap();
    assert_eq!(record.borrow_date, date(2024, 1, 1));
    assert_eq!(record.return_due_date, date(2024, 1, 15));
    assert_eq!(library.find_book("111").unwrap().borrowed_count(), 1);
    assert_eq!(library.find_patron("s@e.t").unwrap().borrowed_books(), 1);

    library.return_loan("s@e.t", "111").unwrap();
    let book = library.find_book("111").unwrap();
    assert!(book.is_available());
    assert_eq!(book.borrowed_count(), 0);
    assert_eq!(library.find_patron("s@e.t").unwrap().borrowed_books(), 0);
    assert_eq!(library.count_active(), 0);
}

#[test]
fn test_borrow_rollback_on_patron_limit() {
    let mut library = library();
    library.add_book("111", "A", "X", 5).unwrap();
    library.add_book("222", "B", "X", 5).unwrap();
    library.register(PatronKind::Guest, "G", "g@e.t").unwrap();

    library.borrow("g@e.t", "111").unwrap();
    let err = library.borrow("g@e.t", "222").unwrap_err();
    assert!(matches!(err, LibraryError::PatronLimitExceeded(_)));

    assert_eq!(library.find_book("222").unwrap().borrowed_count(), 0);
    assert_eq!(library.find_book("111").unwrap().borrowed_count(), 1);
    assert_eq!(library.find_patron("g@e.t").unwrap().borrowed_books(), 1);
}

#[test]
fn test_overdue_ordering() {
    let mut library = library();
    library.add_book("10", "A", "X", 1).unwrap();
    library.add_book("20", "B", "X", 1).unwrap();
    library.register(PatronKind::Faculty, "F", "f@e.t").unwrap();

    let first = library.borrow("f@e.t", "10").unwrap();
    assert_eq!(first.return_due_date, date(2024, 1, 31));

    library.set_current_date(date(2024, 1, 5));
    let second = library.borrow("f@e.t", "20").unwrap();
    assert_eq!(second.return_due_date, date(2024, 2, 4));

    library.set_current_date(date(2024, 2, 1));
    let overdue = library.overdues();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0], &first);
}

#[test]
fn test_duplicate_isbn_rejected() {
    let mut library = library();
    library.add_book("5", "A", "X", 1).unwrap();

    let err = library.add_book("5", "A2", "Y", 1).unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateKey(_)));

    let book = library.find_book("5").unwrap();
    assert_eq!(book.title(), "A");
    assert_eq!(book.author().name(), "X");
    assert!(library.find_books_by_title("A2").is_err());
    assert!(library.find_books_by_author("Y").is_err());
    assert_eq!(library.find_books_by_title("A").unwrap().len(), 1);
    assert_eq!(library.find_books_by_author("X").unwrap().len(), 1);
}

#[test]
fn test_case_insensitive_tie_break() {
    let mut library = library();
    library.add_book("20", "B", "X", 2).unwrap();
    library.add_book("10", "A", "X", 2).unwrap();
    library.register(PatronKind::Guest, "lower", "a@x.y").unwrap();
    library.register(PatronKind::Guest, "upper", "A@X.Y").unwrap();
    library.register(PatronKind::Guest, "bee", "b@x.y").unwrap();

    library.borrow("b@x.y", "10").unwrap();
    library.borrow("a@x.y", "20").unwrap();
    library.borrow("A@X.Y", "10").unwrap();

    library.set_current_date(date(2024, 2, 1));
    let order: Vec<(&str, &str)> = library
        .overdues()
        .iter()
        .map(|r| (r.patron_email.as_str(), r.isbn.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![("A@X.Y", "10"), ("a@x.y", "20"), ("b@x.y", "10")]
    );
}

#[test]
fn test_return_without_borrow() {
    let mut library = library();
    library.add_book("111", "A", "X", 1).unwrap();
    library.register(PatronKind::Student, "S", "s@e.t").unwrap();

    let err = library.return_loan("s@e.t", "111").unwrap_err();
    assert!(matches!(err, LibraryError::LoanNotFound(_)));
    assert_eq!(library.find_book("111").unwrap().borrowed_count(), 0);
    assert_eq!(library.find_patron("s@e.t").unwrap().borrowed_books(), 0);
}

#[test]
fn test_single_instance_second_borrow_unavailable() {
    let mut library = library();
    library.add_book("111", "A", "X", 1).unwrap();
    library.register(PatronKind::Student, "S", "s@e.t").unwrap();
    library.register(PatronKind::Faculty, "F", "f@e.t").unwrap();

    library.borrow("s@e.t", "111").unwrap();
    let err = library.borrow("f@e.t", "111").unwrap_err();
    assert!(matches!(err, LibraryError::BookUnavailable(_)));
    assert_eq!(library.find_patron("f@e.t").unwrap().borrowed_books(), 0);
}

#[test]
fn test_due_today_is_not_overdue() {
    let mut library = library();
    library.add_book("111", "A", "X", 1).unwrap();
    library.register(PatronKind::Guest, "G", "g@e.t").unwrap();
    library.borrow("g@e.t", "111").unwrap();

    library.set_current_date(date(2024, 1, 8));
    assert!(library.overdues().is_empty());

    library.set_current_date(date(2024, 1, 9));
    assert_eq!(library.overdues().len(), 1);
}

#[test]
fn test_add_then_remove_restores_catalog() {
    let mut library = library();
    library.add_book("1", "A", "X", 1).unwrap();
    library.add_book("2", "B", "Y", 1).unwrap();
    library.remove_book("2").unwrap();

    assert_eq!(library.list_books().len(), 1);
    assert!(matches!(library.find_books_by_title("B"), Err(LibraryError::NotFound(_))));
    assert!(matches!(library.find_books_by_author("Y"), Err(LibraryError::NotFound(_))));
}

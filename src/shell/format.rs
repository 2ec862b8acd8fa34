//! Human-readable rendering of shell output

use crate::models::{Book, LoanDetails, Patron};

pub const HELP: &str = r#"Available commands:

  add book <isbn> "<title>" "<author>" <instances>
  remove book <isbn>

  register <student|faculty|guest> "<name>" <email>
  remove user <email>

  borrow <email> <isbn>
  return <email> <isbn>
  loans <email>

  search title "<title>"
  search author "<author>"
  search isbn <isbn>

  list books
  list users

  overdue
  date set <YYYY-MM-DD>

  help
  quit

ISBN is a run of digits of any length, without spaces or quotes.
Email must be a well-formed address.
"#;

pub fn book_line(book: &Book) -> String {
    format!(
        "{:<40} | ISBN: {:<15} | Author: {:<20} | Available: {} ({}/{})",
        book.title(),
        book.isbn(),
        book.author().name(),
        if book.is_available() { "yes" } else { "no" },
        book.free_count(),
        book.instance_count()
    )
}

pub fn patron_line(patron: &Patron) -> String {
    format!(
        "{:<20} <{:<25}> | {:<7} | borrowed: {}/{} | max days: {}",
        patron.name(),
        patron.email(),
        patron.kind(),
        patron.borrowed_books(),
        patron.max_books(),
        patron.max_return_days()
    )
}

pub fn loan_line(loan: &LoanDetails) -> String {
    format!(
        "{:<20} <{:<25}> | {:<40} | due: {}{}",
        loan.patron_name,
        loan.patron_email,
        loan.title,
        loan.return_due_date.format("%Y-%m-%d"),
        if loan.is_overdue { " (overdue)" } else { "" }
    )
}

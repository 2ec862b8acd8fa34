//! Line-oriented command shell over a [`Library`]

pub mod format;
pub mod parse;

use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;

use crate::{
    config::{OutputMode, ShellConfig},
    error::LibraryError,
    models::BorrowingRecord,
    services::Library,
};

pub use parse::{parse_command, Command, ParseError};

#[derive(Error, Debug)]
enum ShellError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Whether the read loop should keep going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    library: Library,
    prompt: String,
    output: OutputMode,
}

impl Shell {
    pub fn new(library: Library, config: &ShellConfig) -> Self {
        Self {
            library,
            prompt: config.prompt.clone(),
            output: config.output,
        }
    }

    pub fn into_library(self) -> Library {
        self.library
    }

    /// Read commands until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                break;
            }
            // Invalid UTF-8 decodes to replacement characters and fails to parse.
            let line = String::from_utf8_lossy(&buf);
            if self.execute_line(&line, out)? == Flow::Quit {
                break;
            }
        }
        tracing::debug!("Shell input closed");
        Ok(())
    }

    /// Execute one line, reporting parse and library failures on `out`.
    /// Only I/O failures are returned.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!("Rejected input {:?}: {}", line, err);
                writeln!(out, "{}", err)?;
                return Ok(Flow::Continue);
            }
        };
        if command == Command::Quit {
            return Ok(Flow::Quit);
        }

        self.library.refresh_date();

        match self.dispatch(command, out) {
            Ok(()) => {}
            Err(ShellError::Library(err)) => {
                if err.is_bug() {
                    tracing::error!("{}", err);
                } else {
                    tracing::warn!("{}", err);
                }
                writeln!(out, "Error [{}]: {}", err.code(), err)?;
            }
            Err(ShellError::Io(err)) => return Err(err),
            Err(ShellError::Json(err)) => return Err(io::Error::new(io::ErrorKind::Other, err)),
        }
        Ok(Flow::Continue)
    }

    fn dispatch<W: Write>(&mut self, command: Command, out: &mut W) -> Result<(), ShellError> {
        match command {
            Command::AddBook { isbn, title, author, instances } => {
                let book = self.library.add_book(&isbn, &title, &author, instances)?;
                match self.output {
                    OutputMode::Json => json_line(out, book)?,
                    OutputMode::Text => writeln!(
                        out,
                        "OK: added book '{}' (ISBN {}), instances: {}",
                        book.title(),
                        book.isbn(),
                        book.instance_count()
                    )?,
                }
            }
            Command::RemoveBook { isbn } => {
                let book = self.library.remove_book(&isbn)?;
                match self.output {
                    OutputMode::Json => json_line(out, &book)?,
                    OutputMode::Text => {
                        writeln!(out, "OK: removed book with ISBN {}", book.isbn())?
                    }
                }
            }
            Command::RemoveUser { email } => {
                let patron = self.library.remove_patron(&email)?;
                match self.output {
                    OutputMode::Json => json_line(out, &patron)?,
                    OutputMode::Text => writeln!(out, "OK: removed user <{}>", patron.email())?,
                }
            }
            Command::Register { kind, name, email } => {
                let patron = self.library.register(kind, &name, &email)?;
                match self.output {
                    OutputMode::Json => json_line(out, patron)?,
                    OutputMode::Text => writeln!(
                        out,
                        "OK: registered {} '{}' <{}>",
                        patron.kind(),
                        patron.name(),
                        patron.email()
                    )?,
                }
            }
            Command::Borrow { email, isbn } => {
                let record = self.library.borrow(&email, &isbn)?;
                let loan = self.library.loan_details(&record)?;
                match self.output {
                    OutputMode::Json => json_line(out, &loan)?,
                    OutputMode::Text => writeln!(
                        out,
                        "OK: {} borrowed '{}'. Due {}",
                        loan.patron_name,
                        loan.title,
                        loan.return_due_date.format("%Y-%m-%d")
                    )?,
                }
            }
            Command::Return { email, isbn } => {
                let record = self.library.return_loan(&email, &isbn)?;
                let name = self.library.find_patron(&record.patron_email)?.name();
                let title = self.library.find_book(&record.isbn)?.title();
                match self.output {
                    OutputMode::Json => json_line(out, &record)?,
                    OutputMode::Text => writeln!(out, "OK: '{}' returned by {}", title, name)?,
                }
            }
            Command::SearchTitle { title } => {
                let books = self.library.find_books_by_title(&title)?;
                self.write_books(out, &books)?;
            }
            Command::SearchAuthor { author } => {
                let books = self.library.find_books_by_author(&author)?;
                self.write_books(out, &books)?;
            }
            Command::SearchIsbn { isbn } => {
                let book = self.library.find_book(&isbn)?;
                self.write_books(out, &[book])?;
            }
            Command::ListBooks => {
                let books = self.library.list_books();
                self.write_books(out, &books)?;
            }
            Command::ListUsers => {
                let patrons = self.library.list_patrons();
                match self.output {
                    OutputMode::Json => json_line(out, &patrons)?,
                    OutputMode::Text => {
                        for patron in patrons {
                            writeln!(out, "{}", format::patron_line(patron))?;
                        }
                    }
                }
            }
            Command::Loans { email } => {
                let records = self.library.loans_of(&email)?;
                self.write_loans(out, &records, "No active loans.")?;
            }
            Command::Overdue => {
                let records = self.library.overdues();
                self.write_loans(out, &records, "No overdue loans.")?;
            }
            Command::SetDate { date } => {
                self.library.set_current_date(date);
                writeln!(out, "OK: CurrentDate = {}", date.format("%Y-%m-%d"))?;
            }
            Command::Help => write!(out, "{}", format::HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn write_books<W: Write>(
        &self,
        out: &mut W,
        books: &[&crate::models::Book],
    ) -> Result<(), ShellError> {
        match self.output {
            OutputMode::Json => json_line(out, &books)?,
            OutputMode::Text => {
                for book in books {
                    writeln!(out, "{}", format::book_line(book))?;
                }
            }
        }
        Ok(())
    }

    fn write_loans<W: Write>(
        &self,
        out: &mut W,
        records: &[&BorrowingRecord],
        empty: &str,
    ) -> Result<(), ShellError> {
        let loans = records
            .iter()
            .map(|record| self.library.loan_details(record))
            .collect::<Result<Vec<_>, _>>()?;

        match self.output {
            OutputMode::Json => json_line(out, &loans)?,
            OutputMode::Text if loans.is_empty() => writeln!(out, "{}", empty)?,
            OutputMode::Text => {
                for loan in &loans {
                    writeln!(out, "{}", format::loan_line(loan))?;
                }
            }
        }
        Ok(())
    }
}

fn json_line<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), ShellError> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

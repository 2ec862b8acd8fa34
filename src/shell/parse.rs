//! Command grammar
//!
//! Keywords match case-insensitively; quoted strings are taken verbatim and
//! may not contain double quotes.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::models::PatronKind;

const EMAIL: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]+";
const ISBN: &str = r"\d+";

fn pattern(body: &str) -> Regex {
    let source = format!(r"(?i)^{}$", body)
        .replace("{EMAIL}", EMAIL)
        .replace("{ISBN}", ISBN);
    Regex::new(&source).unwrap()
}

static ADD_BOOK: Lazy<Regex> = Lazy::new(|| {
    pattern(concat!(
        r#"add\s+book\s+(?P<isbn>{ISBN})\s+"(?P<title>[^"]+)"\s+"#,
        r#""(?P<author>[^"]+)"\s+(?P<instances>\d+)"#,
    ))
});
static REMOVE_BOOK: Lazy<Regex> = Lazy::new(|| pattern(r"remove\s+book\s+(?P<isbn>{ISBN})"));
static REMOVE_USER: Lazy<Regex> = Lazy::new(|| pattern(r"remove\s+user\s+(?P<email>{EMAIL})"));
static REGISTER: Lazy<Regex> = Lazy::new(|| {
    pattern(concat!(
        r#"register\s+(?P<kind>student|faculty|guest)\s+"#,
        r#""(?P<name>[^"]+)"\s+(?P<email>{EMAIL})"#,
    ))
});
static BORROW: Lazy<Regex> =
    Lazy::new(|| pattern(r"borrow\s+(?P<email>{EMAIL})\s+(?P<isbn>{ISBN})"));
static RETURN: Lazy<Regex> =
    Lazy::new(|| pattern(r"return\s+(?P<email>{EMAIL})\s+(?P<isbn>{ISBN})"));
static SEARCH_TITLE: Lazy<Regex> = Lazy::new(|| pattern(r#"search\s+title\s+"(?P<title>[^"]+)""#));
static SEARCH_AUTHOR: Lazy<Regex> =
    Lazy::new(|| pattern(r#"search\s+author\s+"(?P<author>[^"]+)""#));
static SEARCH_ISBN: Lazy<Regex> = Lazy::new(|| pattern(r"search\s+isbn\s+(?P<isbn>{ISBN})"));
static LIST_BOOKS: Lazy<Regex> = Lazy::new(|| pattern(r"list\s+books"));
static LIST_USERS: Lazy<Regex> = Lazy::new(|| pattern(r"list\s+users"));
static LOANS: Lazy<Regex> = Lazy::new(|| pattern(r"loans\s+(?P<email>{EMAIL})"));
static OVERDUE: Lazy<Regex> = Lazy::new(|| pattern(r"overdue"));
static SET_DATE: Lazy<Regex> = Lazy::new(|| pattern(r"date\s+set\s+(?P<date>\d{4}-\d{2}-\d{2})"));
static HELP: Lazy<Regex> = Lazy::new(|| pattern(r"help"));
static QUIT: Lazy<Regex> = Lazy::new(|| pattern(r"(?:quit|exit)"));

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddBook {
        isbn: String,
        title: String,
        author: String,
        instances: u32,
    },
    RemoveBook { isbn: String },
    RemoveUser { email: String },
    Register {
        kind: PatronKind,
        name: String,
        email: String,
    },
    Borrow { email: String, isbn: String },
    Return { email: String, isbn: String },
    SearchTitle { title: String },
    SearchAuthor { author: String },
    SearchIsbn { isbn: String },
    ListBooks,
    ListUsers,
    Loans { email: String },
    Overdue,
    SetDate { date: NaiveDate },
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid syntax. Type 'help' for the list of commands.")]
    Syntax,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    #[error("Invalid instance count '{0}'")]
    Count(String),
}

fn text(caps: &Captures, name: &str) -> String {
    caps.name(name).map(|m| m.as_str().to_string()).unwrap_or_default()
}

/// Parse one trimmed input line
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();

    if let Some(caps) = ADD_BOOK.captures(line) {
        let raw = text(&caps, "instances");
        let instances = raw.parse().map_err(|_| ParseError::Count(raw.clone()))?;
        return Ok(Command::AddBook {
            isbn: text(&caps, "isbn"),
            title: text(&caps, "title"),
            author: text(&caps, "author"),
            instances,
        });
    }
    if let Some(caps) = REMOVE_BOOK.captures(line) {
        return Ok(Command::RemoveBook { isbn: text(&caps, "isbn") });
    }
    if let Some(caps) = REMOVE_USER.captures(line) {
        return Ok(Command::RemoveUser { email: text(&caps, "email") });
    }
    if let Some(caps) = REGISTER.captures(line) {
        let kind = text(&caps, "kind").parse().map_err(|_| ParseError::Syntax)?;
        return Ok(Command::Register {
            kind,
            name: text(&caps, "name"),
            email: text(&caps, "email"),
        });
    }
    if let Some(caps) = BORROW.captures(line) {
        return Ok(Command::Borrow {
            email: text(&caps, "email"),
            isbn: text(&caps, "isbn"),
        });
    }
    if let Some(caps) = RETURN.captures(line) {
        return Ok(Command::Return {
            email: text(&caps, "email"),
            isbn: text(&caps, "isbn"),
        });
    }
    if let Some(caps) = SEARCH_TITLE.captures(line) {
        return Ok(Command::SearchTitle { title: text(&caps, "title") });
    }
    if let Some(caps) = SEARCH_AUTHOR.captures(line) {
        return Ok(Command::SearchAuthor { author: text(&caps, "author") });
    }
    if let Some(caps) = SEARCH_ISBN.captures(line) {
        return Ok(Command::SearchIsbn { isbn: text(&caps, "isbn") });
    }
    if LIST_BOOKS.is_match(line) {
        return Ok(Command::ListBooks);
    }
    if LIST_USERS.is_match(line) {
        return Ok(Command::ListUsers);
    }
    if let Some(caps) = LOANS.captures(line) {
        return Ok(Command::Loans { email: text(&caps, "email") });
    }
    if OVERDUE.is_match(line) {
        return Ok(Command::Overdue);
    }
    if let Some(caps) = SET_DATE.captures(line) {
        let raw = text(&caps, "date");
        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| ParseError::Date(raw.clone()))?;
        return Ok(Command::SetDate { date });
    }
    if HELP.is_match(line) {
        return Ok(Command::Help);
    }
    if QUIT.is_match(line) {
        return Ok(Command::Quit);
    }

    Err(ParseError::Syntax)
}

//! Catalog of books with title and author indexes

use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use crate::{
    error::{LibraryError, LibraryResult},
    models::{Author, Book},
};

/// Owns every [`Book`], keyed by ISBN.
///
/// The title and author indexes hold ISBNs and are kept as exact reverse
/// projections of the primary map. Empty buckets are pruned on removal, so a
/// bucket that exists always has at least one book in it.
#[derive(Debug, Default)]
pub struct Catalog {
    books: HashMap<String, Book>,
    by_title: HashMap<String, BTreeSet<String>>,
    by_author: HashMap<Author, BTreeSet<String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a book. On a duplicate ISBN no index is touched.
    pub fn add(&mut self, book: Book) -> LibraryResult<&Book> {
        let slot = match self.books.entry(book.isbn().to_string()) {
            Entry::Occupied(_) => {
                return Err(LibraryError::DuplicateKey(format!(
                    "Book with ISBN {} already exists",
                    book.isbn()
                )));
            }
            Entry::Vacant(slot) => slot,
        };

        self.by_title
            .entry(book.title().to_string())
            .or_default()
            .insert(book.isbn().to_string());
        self.by_author
            .entry(book.author().clone())
            .or_default()
            .insert(book.isbn().to_string());

        Ok(slot.insert(book))
    }

    /// Remove a book from the primary map and scrub both indexes
    pub fn remove(&mut self, isbn: &str) -> LibraryResult<Book> {
        let book = self
            .books
            .remove(isbn)
            .ok_or_else(|| no_such_isbn(isbn))?;

        if let Entry::Occupied(mut bucket) = self.by_title.entry(book.title().to_string()) {
            bucket.get_mut().remove(isbn);
            if bucket.get().is_empty() {
                bucket.remove();
            }
        }
        if let Entry::Occupied(mut bucket) = self.by_author.entry(book.author().clone()) {
            bucket.get_mut().remove(isbn);
            if bucket.get().is_empty() {
                bucket.remove();
            }
        }

        Ok(book)
    }

    pub fn find_by_isbn(&self, isbn: &str) -> LibraryResult<&Book> {
        self.books.get(isbn).ok_or_else(|| no_such_isbn(isbn))
    }

    pub fn find_by_isbn_mut(&mut self, isbn: &str) -> LibraryResult<&mut Book> {
        self.books.get_mut(isbn).ok_or_else(|| no_such_isbn(isbn))
    }

    /// Books with exactly this title, ordered by ISBN
    pub fn find_by_title(&self, title: &str) -> LibraryResult<Vec<&Book>> {
        match self.by_title.get(title) {
            Some(isbns) if !isbns.is_empty() => Ok(self.resolve(isbns)),
            _ => Err(LibraryError::NotFound(format!(
                "No such books with title '{}'",
                title
            ))),
        }
    }

    /// Books by this author, ordered by ISBN
    pub fn find_by_author(&self, author: &Author) -> LibraryResult<Vec<&Book>> {
        match self.by_author.get(author) {
            Some(isbns) if !isbns.is_empty() => Ok(self.resolve(isbns)),
            _ => Err(LibraryError::NotFound(format!(
                "No such books with author '{}'",
                author
            ))),
        }
    }

    /// All books, ordered by ISBN
    pub fn list(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));
        books
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.books.contains_key(isbn)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn resolve<'a>(&'a self, isbns: &BTreeSet<String>) -> Vec<&'a Book> {
        isbns.iter().filter_map(|isbn| self.books.get(isbn)).collect()
    }
}

fn no_such_isbn(isbn: &str) -> LibraryError {
    LibraryError::NotFound(format!("No such book with ISBN '{}'", isbn))
}

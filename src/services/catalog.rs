//! Catalog management service

use crate::{
    error::{LibraryError, LibraryResult},
    models::{Author, Book},
};

use super::Library;

impl Library {
    /// Add a new title with `instances` physical copies
    pub fn add_book(
        &mut self,
        isbn: &str,
        title: &str,
        author: &str,
        instances: u32,
    ) -> LibraryResult<&Book> {
        let book = Book::new(isbn, Author::new(author)?, title, instances)?;
        let book = self.catalog.add(book)?;
        tracing::info!(
            "Added book '{}' (ISBN {}) with {} instance(s)",
            book.title(),
            book.isbn(),
            instances
        );
        Ok(book)
    }

    /// Remove a title. Refused while any instance is on loan.
    pub fn remove_book(&mut self, isbn: &str) -> LibraryResult<Book> {
        let book = self.catalog.find_by_isbn(isbn)?;
        if book.borrowed_count() > 0 {
            return Err(LibraryError::InUse(format!(
                "Book with ISBN {} has {} instance(s) on loan",
                isbn,
                book.borrowed_count()
            )));
        }

        let book = self.catalog.remove(isbn)?;
        tracing::info!("Removed book '{}' (ISBN {})", book.title(), book.isbn());
        Ok(book)
    }

    pub fn find_book(&self, isbn: &str) -> LibraryResult<&Book> {
        self.catalog.find_by_isbn(isbn)
    }

    pub fn find_books_by_title(&self, title: &str) -> LibraryResult<Vec<&Book>> {
        self.catalog.find_by_title(title)
    }

    pub fn find_books_by_author(&self, author: &str) -> LibraryResult<Vec<&Book>> {
        self.catalog.find_by_author(&Author::new(author)?)
    }

    pub fn list_books(&self) -> Vec<&Book> {
        self.catalog.list()
    }
}

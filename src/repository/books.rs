//! In-memory book collection

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, BookSummary},
};

/// Ordered book collection behind a single lock.
///
/// Insertion order is list order. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book at the end of the collection
    pub async fn insert(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Summaries of the books matching `filter`, in collection order
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::summary)
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }

    /// Replace the book with `id` by the result of `update`.
    ///
    /// Lookup, `update` and the write all happen under the write lock.
    /// Returns `Ok(false)` when no book has this id; an error from
    /// `update` leaves the stored book untouched.
    pub async fn update<F>(&self, id: &str, update: F) -> AppResult<bool>
    where
        F: FnOnce(&Book) -> AppResult<Book>,
    {
        let mut books = self.books.write().await;
        let Some(slot) = books.iter_mut().find(|book| book.id == id) else {
            return Ok(false);
        };
        *slot = update(slot)?;
        Ok(true)
    }

    /// Remove the book with `id`, keeping the order of the others.
    /// Returns false if it was not found.
    pub async fn delete(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}

//! Book records service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookQuery, BookSummary, PayloadViolation},
    repository::Repository,
};

pub const MSG_CREATED: &str = "Buku berhasil ditambahkan";
pub const MSG_UPDATED: &str = "Buku berhasil diperbarui";
pub const MSG_DELETED: &str = "Buku berhasil dihapus";
pub const MSG_NOT_FOUND: &str = "Buku tidak ditemukan";
pub const MSG_UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
pub const MSG_DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

const CREATE_FAILED: &str = "Gagal menambahkan buku";
const UPDATE_FAILED: &str = "Gagal memperbarui buku";

fn violation_error(prefix: &str, violation: PayloadViolation) -> AppError {
    let reason = match violation {
        PayloadViolation::MissingName => "Mohon isi nama buku",
        PayloadViolation::ReadPageExceedsPageCount => {
            "readPage tidak boleh lebih besar dari pageCount"
        }
    };
    AppError::Validation(format!("{}. {}", prefix, reason))
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its generated id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        if let Err(violation) = payload.validate() {
            tracing::warn!("Book creation rejected: {:?}", violation);
            return Err(violation_error(CREATE_FAILED, violation));
        }

        let id = Uuid::new_v4().to_string();
        let book = Book::from_payload(id.clone(), payload, Utc::now());
        self.repository.books.insert(book).await;

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        let filter = BookFilter::from(query);
        let books = self.repository.books.list(&filter).await;
        tracing::debug!("Book list: {:?} -> {} result(s)", filter, books.len());
        books
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(MSG_NOT_FOUND.to_string()))
    }

    /// Replace a book's fields.
    ///
    /// The id is looked up first; a body that failed to decode is only
    /// reported for an existing book, then the payload rules are checked.
    pub async fn update(&self, id: &str, payload: AppResult<BookPayload>) -> AppResult<()> {
        let found = self
            .repository
            .books
            .update(id, |current| {
                let payload = payload?;
                payload.validate().map_err(|violation| {
                    tracing::warn!("Book update rejected: id={} {:?}", id, violation);
                    violation_error(UPDATE_FAILED, violation)
                })?;
                Ok(current.apply(payload, Utc::now()))
            })
            .await?;

        if !found {
            return Err(AppError::NotFound(MSG_UPDATE_NOT_FOUND.to_string()));
        }

        tracing::info!("Book updated: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.delete(id).await {
            return Err(AppError::NotFound(MSG_DELETE_NOT_FOUND.to_string()));
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }
}

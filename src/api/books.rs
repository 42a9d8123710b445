//! Book endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse, ResponseStatus},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
    services::books::{MSG_CREATED, MSG_DELETED, MSG_UPDATED},
    AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookCreatedData {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: BookCreatedData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: ResponseStatus,
    pub data: BookListData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetailData {
    pub book: Book,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub status: ResponseStatus,
    pub data: BookDetailData,
}

/// Success envelope without a data payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Json<Self> {
        Json(Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
        })
    }
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookCreatedResponse),
        (status = 400, description = "Missing name, readPage > pageCount or malformed body", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book_id = state.services.books.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            status: ResponseStatus::Success,
            message: MSG_CREATED.to_string(),
            data: BookCreatedData { book_id },
        }),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books, in insertion order", body = BookListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_books(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BookQuery>, AppError>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.books.list(&query).await;

    Ok(Json(BookListResponse {
        status: ResponseStatus::Success,
        data: BookListData { books },
    }))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let book = state.services.books.get_by_id(&book_id).await?;

    Ok(Json(BookDetailResponse {
        status: ResponseStatus::Success,
        data: BookDetailData { book },
    }))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name, readPage > pageCount or malformed body", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    // Decoding errors surface only after the id lookup
    let payload = payload.map(|Json(payload)| payload).map_err(AppError::from);
    state.services.books.update(&book_id, payload).await?;
    Ok(MessageResponse::success(MSG_UPDATED))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&book_id).await?;
    Ok(MessageResponse::success(MSG_DELETED))
}

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrow_book, create_book, create_member, list_books, list_members, return_book,
    service_info,
};

/// Creates the API router with the full lending surface
///
/// Catalog / Roster endpoints:
/// - GET  /books - List books in insertion order
/// - POST /books - Register a book
/// - GET  /members - List members in insertion order
/// - POST /members - Register a member
///
/// Ledger endpoints:
/// - POST /books/:book_id/borrow/:member_id - Borrow a copy
/// - POST /books/:book_id/return/:member_id - Return a copy
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Service info and health check
        .route("/", get(service_info))
        .route("/health", get(health_check))
        // Catalog
        .route("/books", get(list_books).post(create_book))
        // Roster
        .route("/members", get(list_members).post(create_member))
        // Ledger
        .route("/books/:book_id/borrow/:member_id", post(borrow_book))
        .route("/books/:book_id/return/:member_id", post(return_book))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

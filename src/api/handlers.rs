use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::application::{Catalog, LendingLedger, Roster};
use crate::domain::commands::{BorrowBook, ReturnBook};
use crate::domain::{BookId, MemberId};

use super::{
    error::ApiError,
    types::{
        BookResponse, BorrowResponse, CreateBookRequest, CreateMemberRequest, MemberResponse,
        ReturnResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub roster: Arc<Roster>,
    pub ledger: Arc<LendingLedger>,
}

// ============================================================================
// Catalog handlers
// ============================================================================

/// POST /books - 書籍を登録
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = state
        .catalog
        .add_book(&req.title, &req.author, req.total_copies)?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /books - 全書籍を登録順で取得
pub async fn list_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    let books = state
        .catalog
        .list_books()
        .into_iter()
        .map(BookResponse::from)
        .collect();
    Json(books)
}

// ============================================================================
// Roster handlers
// ============================================================================

/// POST /members - 会員を登録
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let member = state.roster.add_member(&req.name, &req.email)?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// GET /members - 全会員を登録順で取得
pub async fn list_members(State(state): State<Arc<AppState>>) -> Json<Vec<MemberResponse>> {
    let members = state
        .roster
        .list_members()
        .into_iter()
        .map(MemberResponse::from)
        .collect();
    Json(members)
}

// ============================================================================
// Ledger handlers
// ============================================================================

/// POST /books/:book_id/borrow/:member_id - 書籍を借りる
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Path((book_id, member_id)): Path<(u64, u64)>,
) -> Result<Json<BorrowResponse>, ApiError> {
    let cmd = BorrowBook {
        book_id: BookId::new(book_id),
        member_id: MemberId::new(member_id),
        borrowed_at: chrono::Utc::now(),
    };

    state.ledger.borrow_book(cmd)?;

    Ok(Json(BorrowResponse {
        message: "Book borrowed successfully".to_string(),
    }))
}

/// POST /books/:book_id/return/:member_id - 書籍を返す
///
/// fine_amountは延滞がなくても必ずレスポンスに含まれる。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path((book_id, member_id)): Path<(u64, u64)>,
) -> Result<Json<ReturnResponse>, ApiError> {
    let cmd = ReturnBook {
        book_id: BookId::new(book_id),
        member_id: MemberId::new(member_id),
        returned_at: chrono::Utc::now(),
    };

    let receipt = state.ledger.return_book(cmd)?;

    Ok(Json(ReturnResponse {
        message: "Book returned successfully".to_string(),
        fine_amount: receipt.fine_amount,
    }))
}

// ============================================================================
// Service info
// ============================================================================

/// GET / - サービス情報とエンドポイント一覧
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Library Lending Ledger API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "books": "/books",
            "members": "/members",
            "borrow": "/books/{book_id}/borrow/{member_id}",
            "return": "/books/{book_id}/return/{member_id}"
        }
    }))
}

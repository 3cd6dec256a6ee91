use serde::{Deserialize, Serialize};

use crate::domain::{Book, Member};

/// 書籍登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub total_copies: u32,
}

/// 会員登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
}

/// 書籍レスポンス
///
/// フィールド名はクライアントとの互換性のため固定。
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub book_id: u64,
    pub title: String,
    pub author: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub borrowed_by: Vec<u64>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.id.value(),
            title: book.title,
            author: book.author,
            total_copies: book.total_copies,
            available_copies: book.available_copies,
            borrowed_by: book.borrowers.iter().map(|id| id.value()).collect(),
        }
    }
}

/// 会員レスポンス
///
/// フィールド名はクライアントとの互換性のため固定。
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub borrowed_books: Vec<u64>,
    pub fine_amount: f64,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            name: member.name,
            email: member.email.as_str().to_string(),
            borrowed_books: member.borrowed_books.iter().map(|id| id.value()).collect(),
            fine_amount: member.fine_balance,
        }
    }
}

/// 貸出レスポンス
#[derive(Debug, Serialize)]
pub struct BorrowResponse {
    pub message: String,
}

/// 返却レスポンス - fine_amountは延滞がなくても必ず入る
#[derive(Debug, Serialize)]
pub struct ReturnResponse {
    pub message: String,
    pub fine_amount: f64,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

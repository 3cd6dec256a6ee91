use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::LendingError;

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LendingError);

impl From<LendingError> for ApiError {
    fn from(err: LendingError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self.0 {
            // 400 Bad Request - 登録リクエストの内容が不正
            LendingError::InvalidInput(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", self.0.to_string())
            }

            // 404 Not Found - リクエストされたリソースが存在しない
            LendingError::BookNotFound(_) => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", self.0.to_string())
            }
            LendingError::MemberNotFound(_) => (
                StatusCode::NOT_FOUND,
                "MEMBER_NOT_FOUND",
                self.0.to_string(),
            ),

            // 422 Unprocessable Entity - ビジネスルールによる拒否
            LendingError::NoCopiesAvailable(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_COPIES_AVAILABLE",
                self.0.to_string(),
            ),
            LendingError::AlreadyBorrowed { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ALREADY_BORROWED",
                self.0.to_string(),
            ),
            LendingError::NoActiveLoan { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_ACTIVE_LOAN",
                self.0.to_string(),
            ),
            LendingError::LoanLimitExceeded(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "LOAN_LIMIT_EXCEEDED",
                self.0.to_string(),
            ),
            LendingError::OutstandingFine(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "OUTSTANDING_FINE",
                self.0.to_string(),
            ),

            // 500 Internal Server Error - バグの兆候
            // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LendingError::InvariantViolation(detail) => {
                tracing::error!("Invariant violation: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVARIANT_VIOLATION",
                    "An internal consistency error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

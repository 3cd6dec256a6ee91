use thiserror::Error;

use crate::domain::{BookId, MemberId};

/// 貸出システムのアプリケーション層エラー
///
/// いずれも呼び出し側の入力に起因する失敗であり、内部で再試行しない。
/// InvariantViolationのみ例外で、正しい運用では発生し得ないバグの兆候。
#[derive(Debug, Error)]
pub enum LendingError {
    /// 登録リクエストの内容が不正
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 書籍が存在しない
    #[error("Book {0} not found")]
    BookNotFound(BookId),

    /// 会員が存在しない
    #[error("Member {0} not found")]
    MemberNotFound(MemberId),

    /// 貸出可能な蔵書がない
    #[error("No copies of book {0} are available")]
    NoCopiesAvailable(BookId),

    /// 同じ会員が同じ書籍を既に借りている
    #[error("Member {member_id} has already borrowed book {book_id}")]
    AlreadyBorrowed {
        book_id: BookId,
        member_id: MemberId,
    },

    /// 該当する有効な貸出がない
    #[error("No active loan of book {book_id} by member {member_id}")]
    NoActiveLoan {
        book_id: BookId,
        member_id: MemberId,
    },

    /// 貸出上限を超えている
    #[error("Member {0} has reached the active loan limit")]
    LoanLimitExceeded(MemberId),

    /// 延滞金が残っている（ポリシーで貸出拒否が有効な場合のみ）
    #[error("Member {0} has an outstanding fine balance")]
    OutstandingFine(MemberId),

    /// 不変条件違反（バグの兆候、握りつぶし禁止）
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;

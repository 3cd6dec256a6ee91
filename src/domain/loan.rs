use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, LoanId, MemberId};

/// 貸出期間のデフォルト（日数）
pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出記録 - (書籍, 会員) ペアごとに高々1件が有効
///
/// `returned_at` がNoneの間が有効（Active）状態。
/// 書籍側の `borrowers` と会員側の `borrowed_books` の参照対称性は、
/// この記録を一元管理する貸出台帳が保証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: LoanId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl LoanRecord {
    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// 純粋関数：貸出記録を開く
///
/// 返却期限は貸出時刻 + 貸出期間。副作用なし。
pub fn open_loan(
    book_id: BookId,
    member_id: MemberId,
    borrowed_at: DateTime<Utc>,
    loan_period_days: i64,
) -> LoanRecord {
    LoanRecord {
        loan_id: LoanId::new(),
        book_id,
        member_id,
        borrowed_at,
        due_at: borrowed_at + Duration::days(loan_period_days),
        returned_at: None,
    }
}

/// 純粋関数：貸出記録を閉じる
pub fn close_loan(record: &LoanRecord, returned_at: DateTime<Utc>) -> LoanRecord {
    LoanRecord {
        returned_at: Some(returned_at),
        ..record.clone()
    }
}

/// 純粋関数：延滞日数
///
/// 期限からの経過を丸一日単位で数える。期限内はゼロ。
pub fn overdue_days(due_at: DateTime<Utc>, returned_at: DateTime<Utc>) -> i64 {
    (returned_at - due_at).num_days().max(0)
}

/// 純粋関数：延滞金の計算
///
/// `(due_at, returned_at, fine_per_day)` だけで決まる決定的な計算。
/// 状態遷移から独立して単体テストできるよう、純粋関数として切り出す。
pub fn overdue_fine(due_at: DateTime<Utc>, returned_at: DateTime<Utc>, fine_per_day: f64) -> f64 {
    overdue_days(due_at, returned_at) as f64 * fine_per_day
}

/// 純粋関数：延滞判定
pub fn is_overdue(record: &LoanRecord, now: DateTime<Utc>) -> bool {
    record.is_active() && now > record.due_at
}

#[cfg(test)]
mod tests {
    use super::*;

    // TDD: open_loan() のテスト
    #[test]
    fn test_open_loan_sets_due_date_from_period() {
        let borrowed_at = Utc::now();
        let record = open_loan(BookId::new(1), MemberId::new(2), borrowed_at, 14);

        assert_eq!(record.due_at, borrowed_at + Duration::days(14));
        assert!(record.is_active());
        assert_eq!(record.book_id, BookId::new(1));
        assert_eq!(record.member_id, MemberId::new(2));
    }

    #[test]
    fn test_close_loan_records_return_time() {
        let borrowed_at = Utc::now();
        let record = open_loan(BookId::new(1), MemberId::new(2), borrowed_at, 14);
        let returned_at = borrowed_at + Duration::days(7);

        let closed = close_loan(&record, returned_at);
        assert_eq!(closed.returned_at, Some(returned_at));
        assert!(!closed.is_active());
        assert_eq!(closed.loan_id, record.loan_id);
    }

    // TDD: overdue_fine() のテスト
    #[test]
    fn test_fine_is_zero_when_returned_on_time() {
        let due_at = Utc::now();
        let returned_at = due_at - Duration::days(2);

        assert_eq!(overdue_fine(due_at, returned_at, 0.5), 0.0);
    }

    #[test]
    fn test_fine_is_zero_when_returned_exactly_at_due() {
        let due_at = Utc::now();
        assert_eq!(overdue_fine(due_at, due_at, 0.5), 0.0);
    }

    #[test]
    fn test_fine_counts_whole_days_only() {
        let due_at = Utc::now();
        // 3日と数時間の延滞は3日分として数える
        let returned_at = due_at + Duration::days(3) + Duration::hours(5);

        assert_eq!(overdue_fine(due_at, returned_at, 0.5), 1.5);
    }

    #[test]
    fn test_fine_scales_with_rate() {
        let due_at = Utc::now();
        let returned_at = due_at + Duration::days(4);

        assert_eq!(overdue_fine(due_at, returned_at, 1.0), 4.0);
        assert_eq!(overdue_fine(due_at, returned_at, 0.25), 1.0);
    }

    // TDD: is_overdue() のテスト
    #[test]
    fn test_is_overdue_false_before_due_date() {
        let borrowed_at = Utc::now();
        let record = open_loan(BookId::new(1), MemberId::new(2), borrowed_at, 14);

        assert!(!is_overdue(&record, borrowed_at + Duration::days(7)));
    }

    #[test]
    fn test_is_overdue_true_after_due_date() {
        let borrowed_at = Utc::now();
        let record = open_loan(BookId::new(1), MemberId::new(2), borrowed_at, 14);

        assert!(is_overdue(&record, borrowed_at + Duration::days(20)));
    }

    #[test]
    fn test_is_overdue_false_once_returned() {
        let borrowed_at = Utc::now();
        let record = open_loan(BookId::new(1), MemberId::new(2), borrowed_at, 14);
        let closed = close_loan(&record, borrowed_at + Duration::days(20));

        assert!(!is_overdue(&closed, borrowed_at + Duration::days(30)));
    }
}

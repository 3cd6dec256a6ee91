use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{BookId, EmailAddress, MemberId};

/// 会員エンティティ - 名簿集約
///
/// 不変条件：
/// - `fine_balance >= 0`（累積のみ、自動リセットなし）
/// - `borrowed_books` は貸出台帳経由でのみ変更される
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: EmailAddress,
    pub borrowed_books: BTreeSet<BookId>,
    pub fine_balance: f64,
}

impl Member {
    /// 新規作成。貸出なし、延滞金ゼロで始まる。
    pub fn new(id: MemberId, name: String, email: EmailAddress) -> Self {
        Self {
            id,
            name,
            email,
            borrowed_books: BTreeSet::new(),
            fine_balance: 0.0,
        }
    }

    /// 貸出を記録する。既に同じ書籍を借りている場合はfalse。
    pub fn add_loan(&mut self, book_id: BookId) -> bool {
        self.borrowed_books.insert(book_id)
    }

    /// 貸出記録を外す。記録がなければfalse（呼び出し側でwarnする）。
    pub fn remove_loan(&mut self, book_id: BookId) -> bool {
        self.borrowed_books.remove(&book_id)
    }

    /// 延滞金を加算する。負の額は無視される。
    pub fn add_fine(&mut self, amount: f64) {
        if amount > 0.0 {
            self.fine_balance += amount;
        }
    }

    /// 現在借りている冊数
    pub fn active_loan_count(&self) -> usize {
        self.borrowed_books.len()
    }
}

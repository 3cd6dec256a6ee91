use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::domain::commands::{BorrowBook, ReturnBook};
use crate::domain::loan::{close_loan, open_loan, overdue_fine};
use crate::domain::{BookId, LoanRecord, MemberId};

use super::catalog::Catalog;
use super::errors::{LendingError, Result};
use super::policy::LendingPolicy;
use super::roster::Roster;

/// 返却結果
///
/// `fine_amount` は延滞がなくても必ず入る（0.0）。呼び出し側が
/// 場合分けなしで扱えるようにするため。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub loan: LoanRecord,
    pub fine_amount: f64,
}

/// 貸出台帳 - 貸出・返却プロトコルの唯一の実行者
///
/// カタログと名簿をまたぐ参照（borrowers / borrowed_books /
/// available_copies / fine_balance）への唯一の書き込み者。
/// (書籍, 会員) ペアごとの有効な貸出を索引として一元管理し、
/// 参照対称性の不変条件をここだけで維持する。
///
/// ロック規律：すべての状態遷移は 書籍 → 会員 → 貸出索引 の固定順序で
/// ロックを取得し、外部呼び出しをまたいで保持しない。事前条件の検査を
/// すべて終えてから最初の変更を行うため、失敗した操作は無変更に見える。
pub struct LendingLedger {
    catalog: Arc<Catalog>,
    roster: Arc<Roster>,
    policy: LendingPolicy,
    loans: Mutex<LoanIndex>,
}

struct LoanIndex {
    /// 有効な貸出。(書籍ID, 会員ID) ごとに高々1件。
    active: HashMap<(BookId, MemberId), LoanRecord>,
    /// 返却済みの貸出記録（受付順）
    history: Vec<LoanRecord>,
}

impl LendingLedger {
    pub fn new(catalog: Arc<Catalog>, roster: Arc<Roster>, policy: LendingPolicy) -> Self {
        Self {
            catalog,
            roster,
            policy,
            loans: Mutex::new(LoanIndex {
                active: HashMap::new(),
                history: Vec::new(),
            }),
        }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    /// 書籍を借りる（Absent → Active）
    ///
    /// 事前条件：
    /// - 書籍・会員が存在すること
    /// - 貸出可能な蔵書があること
    /// - 同じペアの有効な貸出がないこと
    /// - 会員の貸出冊数が上限未満であること
    /// - （ポリシー有効時）延滞金が残っていないこと
    pub fn borrow_book(&self, cmd: BorrowBook) -> Result<LoanRecord> {
        let book_entry = self.catalog.entry(cmd.book_id)?;
        let member_entry = self.roster.entry(cmd.member_id)?;

        // 固定ロック順序：書籍 → 会員 → 貸出索引
        let mut book = book_entry.lock().unwrap();
        let mut member = member_entry.lock().unwrap();
        let mut loans = self.loans.lock().unwrap();

        let key = (cmd.book_id, cmd.member_id);
        if loans.active.contains_key(&key) {
            return Err(LendingError::AlreadyBorrowed {
                book_id: cmd.book_id,
                member_id: cmd.member_id,
            });
        }
        if book.available_copies == 0 {
            return Err(LendingError::NoCopiesAvailable(cmd.book_id));
        }
        if member.active_loan_count() >= self.policy.max_active_loans {
            return Err(LendingError::LoanLimitExceeded(cmd.member_id));
        }
        if self.policy.block_borrow_on_outstanding_fine && member.fine_balance > 0.0 {
            return Err(LendingError::OutstandingFine(cmd.member_id));
        }

        // 事前条件はすべて検査済み。ここから先の失敗はバグを意味する。
        book.checkout(cmd.member_id)
            .map_err(|v| LendingError::InvariantViolation(v.to_string()))?;
        if !member.add_loan(cmd.book_id) {
            // 索引と会員側の参照が食い違っている。書籍側を巻き戻して報告。
            let _ = book.give_back(cmd.member_id);
            tracing::error!(
                book_id = %cmd.book_id,
                member_id = %cmd.member_id,
                "Loan index and member loan set disagree"
            );
            return Err(LendingError::InvariantViolation(format!(
                "member {} already holds book {} outside the loan index",
                cmd.member_id, cmd.book_id
            )));
        }

        let record = open_loan(
            cmd.book_id,
            cmd.member_id,
            cmd.borrowed_at,
            self.policy.loan_period_days,
        );
        loans.active.insert(key, record.clone());

        tracing::info!(
            loan_id = %record.loan_id.value(),
            book_id = %cmd.book_id,
            member_id = %cmd.member_id,
            due_at = %record.due_at,
            "Book borrowed"
        );
        Ok(record)
    }

    /// 書籍を返す（Active → Absent）
    ///
    /// 事前条件：このペアの有効な貸出が存在すること。
    /// 延滞金は返却時に純粋関数で算出され、正の場合のみ会員に加算される。
    pub fn return_book(&self, cmd: ReturnBook) -> Result<ReturnReceipt> {
        let book_entry = self.catalog.entry(cmd.book_id)?;
        let member_entry = self.roster.entry(cmd.member_id)?;

        // 固定ロック順序：書籍 → 会員 → 貸出索引
        let mut book = book_entry.lock().unwrap();
        let mut member = member_entry.lock().unwrap();
        let mut loans = self.loans.lock().unwrap();

        let key = (cmd.book_id, cmd.member_id);
        let Some(record) = loans.active.remove(&key) else {
            return Err(LendingError::NoActiveLoan {
                book_id: cmd.book_id,
                member_id: cmd.member_id,
            });
        };

        if let Err(violation) = book.give_back(cmd.member_id) {
            // 索引と書籍側の参照が食い違っている。索引を戻して報告。
            loans.active.insert(key, record);
            tracing::error!(
                book_id = %cmd.book_id,
                member_id = %cmd.member_id,
                %violation,
                "Loan index and book borrower set disagree"
            );
            return Err(LendingError::InvariantViolation(violation.to_string()));
        }
        if !member.remove_loan(cmd.book_id) {
            // 台帳は索引を正とし、返却自体は受け付ける
            tracing::warn!(
                book_id = %cmd.book_id,
                member_id = %cmd.member_id,
                "Member loan set had no entry for returned book"
            );
        }

        let fine_amount = overdue_fine(record.due_at, cmd.returned_at, self.policy.fine_per_day);
        if fine_amount > 0.0 {
            member.add_fine(fine_amount);
            tracing::info!(
                member_id = %cmd.member_id,
                fine_amount,
                "Overdue fine levied"
            );
        }

        let closed = close_loan(&record, cmd.returned_at);
        loans.history.push(closed.clone());

        tracing::info!(
            loan_id = %closed.loan_id.value(),
            book_id = %cmd.book_id,
            member_id = %cmd.member_id,
            "Book returned"
        );
        Ok(ReturnReceipt {
            loan: closed,
            fine_amount,
        })
    }

    /// 指定ペアの有効な貸出を取得する
    pub fn active_loan(&self, book_id: BookId, member_id: MemberId) -> Option<LoanRecord> {
        let loans = self.loans.lock().unwrap();
        loans.active.get(&(book_id, member_id)).cloned()
    }

    /// 有効な貸出の一覧
    pub fn active_loans(&self) -> Vec<LoanRecord> {
        let loans = self.loans.lock().unwrap();
        loans.active.values().cloned().collect()
    }

    /// 返却済み貸出の履歴（受付順）
    pub fn loan_history(&self) -> Vec<LoanRecord> {
        let loans = self.loans.lock().unwrap();
        loans.history.clone()
    }
}

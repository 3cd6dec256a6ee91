use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{BookId, MemberId, errors::BookInvariant};

/// 書籍エンティティ - カタログ集約
///
/// 不変条件：
/// - `1 <= total_copies`
/// - `0 <= available_copies <= total_copies`
/// - `borrowers.len() == total_copies - available_copies`
///
/// 蔵書（copy）は互いに代替可能で、個体管理はしない。
/// `borrowers` / `available_copies` の変更は貸出台帳経由でのみ行われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub borrowers: BTreeSet<MemberId>,
}

impl Book {
    /// 新規作成。全冊が貸出可能な状態で始まる。
    pub fn new(id: BookId, title: String, author: String, total_copies: u32) -> Self {
        Self {
            id,
            title,
            author,
            total_copies,
            available_copies: total_copies,
            borrowers: BTreeSet::new(),
        }
    }

    /// 1冊を会員に貸し出す
    ///
    /// 検証をすべて通過してから変更するため、失敗時は無変更。
    pub fn checkout(&mut self, member_id: MemberId) -> Result<(), BookInvariant> {
        if self.available_copies == 0 {
            return Err(BookInvariant::CopiesExhausted);
        }
        if self.borrowers.contains(&member_id) {
            return Err(BookInvariant::DuplicateBorrower(member_id));
        }
        self.borrowers.insert(member_id);
        self.available_copies -= 1;
        Ok(())
    }

    /// 会員からの返却を受け付ける
    ///
    /// 検証をすべて通過してから変更するため、失敗時は無変更。
    pub fn give_back(&mut self, member_id: MemberId) -> Result<(), BookInvariant> {
        if !self.borrowers.contains(&member_id) {
            return Err(BookInvariant::UnknownBorrower(member_id));
        }
        if self.available_copies >= self.total_copies {
            return Err(BookInvariant::CopiesOverflow);
        }
        self.borrowers.remove(&member_id);
        self.available_copies += 1;
        Ok(())
    }

    /// 蔵書数の不変条件が保たれているか
    pub fn invariants_hold(&self) -> bool {
        self.available_copies <= self.total_copies
            && self.borrowers.len() as u32 == self.total_copies - self.available_copies
    }
}

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::{EmailAddress, Member, MemberId};

use super::errors::{LendingError, Result};

/// 名簿 - 会員レジストリ
///
/// 会員レコードの唯一の所有者。カタログと同じ構造で、会員1人ごとが
/// 排他制御の単位。メールアドレスの一意性はレジストリの書き込みロック
/// 内で検査されるため、同時登録でも重複しない。
pub struct Roster {
    inner: RwLock<RosterInner>,
}

struct RosterInner {
    members: BTreeMap<MemberId, Arc<Mutex<Member>>>,
    emails: HashSet<EmailAddress>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RosterInner {
                members: BTreeMap::new(),
                emails: HashSet::new(),
                next_id: 1,
            }),
        }
    }

    /// 会員を登録する
    ///
    /// バリデーション：nameは空でないこと、emailは形式チェックを通過し
    /// 未登録であること。
    pub fn add_member(&self, name: &str, email: &str) -> Result<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LendingError::InvalidInput("name must not be empty".into()));
        }
        let email = EmailAddress::parse(email)
            .map_err(|_| LendingError::InvalidInput(format!("malformed email: {:?}", email)))?;

        let mut inner = self.inner.write().unwrap();
        if !inner.emails.insert(email.clone()) {
            return Err(LendingError::InvalidInput(format!(
                "email {} is already registered",
                email
            )));
        }

        let id = MemberId::new(inner.next_id);
        inner.next_id += 1;

        let member = Member::new(id, name.to_string(), email);
        inner.members.insert(id, Arc::new(Mutex::new(member.clone())));

        tracing::info!(member_id = %id, %name, "Member added to roster");
        Ok(member)
    }

    /// 会員のスナップショットを取得する
    pub fn get_member(&self, id: MemberId) -> Result<Member> {
        let entry = self.entry(id)?;
        let member = entry.lock().unwrap();
        Ok(member.clone())
    }

    /// 全会員のスナップショットを登録順で返す
    pub fn list_members(&self) -> Vec<Member> {
        let inner = self.inner.read().unwrap();
        inner
            .members
            .values()
            .map(|entry| entry.lock().unwrap().clone())
            .collect()
    }

    /// 台帳用：会員の共有ハンドルを取得する
    pub(crate) fn entry(&self, id: MemberId) -> Result<Arc<Mutex<Member>>> {
        let inner = self.inner.read().unwrap();
        inner
            .members
            .get(&id)
            .cloned()
            .ok_or(LendingError::MemberNotFound(id))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_assigns_sequential_ids() {
        let roster = Roster::new();
        let first = roster.add_member("John Doe", "john@example.com").unwrap();
        let second = roster.add_member("Jane Smith", "jane@example.com").unwrap();

        assert_eq!(first.id, MemberId::new(1));
        assert_eq!(second.id, MemberId::new(2));
    }

    #[test]
    fn test_add_member_starts_with_no_loans_and_no_fine() {
        let roster = Roster::new();
        let member = roster.add_member("John Doe", "john@example.com").unwrap();

        assert!(member.borrowed_books.is_empty());
        assert_eq!(member.fine_balance, 0.0);
    }

    #[test]
    fn test_add_member_rejects_malformed_email() {
        let roster = Roster::new();
        let result = roster.add_member("John Doe", "not-an-email");
        assert!(matches!(result, Err(LendingError::InvalidInput(_))));
    }

    #[test]
    fn test_add_member_rejects_empty_name() {
        let roster = Roster::new();
        let result = roster.add_member("", "john@example.com");
        assert!(matches!(result, Err(LendingError::InvalidInput(_))));
    }

    #[test]
    fn test_email_uniqueness_is_enforced() {
        let roster = Roster::new();
        roster.add_member("John Doe", "john@example.com").unwrap();

        let result = roster.add_member("John Clone", "john@example.com");
        assert!(matches!(result, Err(LendingError::InvalidInput(_))));
        // 失敗した登録はIDを消費しない
        let next = roster.add_member("Jane Smith", "jane@example.com").unwrap();
        assert_eq!(next.id, MemberId::new(2));
    }

    #[test]
    fn test_get_member_unknown_id_fails() {
        let roster = Roster::new();
        let result = roster.get_member(MemberId::new(5));
        assert!(matches!(
            result,
            Err(LendingError::MemberNotFound(id)) if id == MemberId::new(5)
        ));
    }

    #[test]
    fn test_list_members_preserves_insertion_order() {
        let roster = Roster::new();
        roster.add_member("John Doe", "john@example.com").unwrap();
        roster.add_member("Jane Smith", "jane@example.com").unwrap();

        let names: Vec<_> = roster.list_members().iter().map(|m| m.name.clone()).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith"]);
    }
}

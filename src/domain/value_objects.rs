use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 書籍ID - カタログが採番する連番
///
/// 外部クライアントに公開されるため、採番後は不変。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 会員ID - 名簿が採番する連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(u64);

impl MemberId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 貸出ID - 貸出台帳の内部識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

/// メールアドレス
///
/// 不変条件：`local@domain` の形式で、domainは少なくとも1つの `.` を含む。
/// 厳密なRFC検証ではなく、明らかな入力ミスを弾くための形式チェック。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// 形式チェックを通過した場合のみ生成する
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let raw = raw.trim();
        let Some((local, domain)) = raw.split_once('@') else {
            return Err(EmailError::Malformed(raw.to_string()));
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(EmailError::Malformed(raw.to_string()));
        }
        if domain.starts_with('.') || domain.ends_with('.') || raw.contains(char::is_whitespace) {
            return Err(EmailError::Malformed(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メールアドレスの形式エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_exposes_value() {
        let id = BookId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_member_id_ordering_follows_assignment() {
        assert!(MemberId::new(1) < MemberId::new(2));
    }

    #[test]
    fn test_loan_id_creation_is_unique() {
        let id1 = LoanId::new();
        let id2 = LoanId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_email_accepts_basic_format() {
        let email = EmailAddress::parse("john@example.com").unwrap();
        assert_eq!(email.as_str(), "john@example.com");
    }

    #[test]
    fn test_email_trims_surrounding_whitespace() {
        let email = EmailAddress::parse("  jane@example.com ").unwrap();
        assert_eq!(email.as_str(), "jane@example.com");
    }

    #[test]
    fn test_email_rejects_missing_at() {
        assert!(EmailAddress::parse("john.example.com").is_err());
    }

    #[test]
    fn test_email_rejects_empty_local_part() {
        assert!(EmailAddress::parse("@example.com").is_err());
    }

    #[test]
    fn test_email_rejects_domain_without_dot() {
        assert!(EmailAddress::parse("john@localhost").is_err());
    }

    #[test]
    fn test_email_rejects_dangling_dot_in_domain() {
        assert!(EmailAddress::parse("john@example.com.").is_err());
        assert!(EmailAddress::parse("john@.example.com").is_err());
    }
}

use crate::domain::loan::DEFAULT_LOAN_PERIOD_DAYS;

/// 1日あたりの延滞金のデフォルト
pub const DEFAULT_FINE_PER_DAY: f64 = 1.0;

/// 会員1人あたりの最大貸出冊数のデフォルト
pub const DEFAULT_MAX_ACTIVE_LOANS: usize = 3;

/// 貸出ポリシー
///
/// 運用で調整される定数をまとめた設定。環境変数から読み込める。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LendingPolicy {
    /// 貸出期間（日数）
    pub loan_period_days: i64,
    /// 1日あたりの延滞金
    pub fine_per_day: f64,
    /// 会員1人あたりの最大貸出冊数
    pub max_active_loans: usize,
    /// 延滞金が残っている会員の新規貸出を拒否するか
    ///
    /// 業務上どちらの運用もあり得るため、推測せず設定に逃がしている。
    pub block_borrow_on_outstanding_fine: bool,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
            fine_per_day: DEFAULT_FINE_PER_DAY,
            max_active_loans: DEFAULT_MAX_ACTIVE_LOANS,
            block_borrow_on_outstanding_fine: false,
        }
    }
}

impl LendingPolicy {
    /// 環境変数からポリシーを構築する
    ///
    /// 解釈できない値はデフォルトにフォールバックし、warnログを出す。
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            loan_period_days: env_or("LOAN_PERIOD_DAYS", defaults.loan_period_days),
            fine_per_day: env_or("FINE_PER_DAY", defaults.fine_per_day),
            max_active_loans: env_or("MAX_ACTIVE_LOANS", defaults.max_active_loans),
            block_borrow_on_outstanding_fine: env_or(
                "BLOCK_BORROW_ON_OUTSTANDING_FINE",
                defaults.block_borrow_on_outstanding_fine,
            ),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}={:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_documented_constants() {
        let policy = LendingPolicy::default();
        assert_eq!(policy.loan_period_days, 14);
        assert_eq!(policy.fine_per_day, 1.0);
        assert_eq!(policy.max_active_loans, 3);
        assert!(!policy.block_borrow_on_outstanding_fine);
    }
}

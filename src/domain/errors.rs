use super::MemberId;

/// 書籍の蔵書数・借り手集合の不変条件違反
///
/// 台帳が事前条件を検査した後に発生した場合はバグを意味する。
/// 握りつぶさず、台帳でInvariantViolationとして報告される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookInvariant {
    /// 貸出可能な蔵書がない（available_copies == 0）
    CopiesExhausted,
    /// 同じ会員が同じ書籍を二重に借りようとした
    DuplicateBorrower(MemberId),
    /// 借り手として記録されていない会員からの返却
    UnknownBorrower(MemberId),
    /// 返却により available_copies が total_copies を超える
    CopiesOverflow,
}

impl std::fmt::Display for BookInvariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookInvariant::CopiesExhausted => write!(f, "no copies available"),
            BookInvariant::DuplicateBorrower(id) => {
                write!(f, "member {} already holds a copy", id)
            }
            BookInvariant::UnknownBorrower(id) => {
                write!(f, "member {} is not a recorded borrower", id)
            }
            BookInvariant::CopiesOverflow => {
                write!(f, "available copies would exceed total copies")
            }
        }
    }
}

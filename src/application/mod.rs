pub mod catalog;
pub mod errors;
pub mod ledger;
pub mod policy;
pub mod roster;

pub use catalog::Catalog;
pub use errors::{LendingError, Result};
pub use ledger::{LendingLedger, ReturnReceipt};
pub use policy::LendingPolicy;
pub use roster::Roster;

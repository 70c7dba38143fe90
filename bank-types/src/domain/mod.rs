//! Domain models for the ledger service.

pub mod account;
pub mod amount;
pub mod operation_type;
pub mod transaction;

pub use account::{Account, AccountId, NewAccount};
pub use amount::Amount;
pub use operation_type::{OperationKind, OperationType, OperationTypeId};
pub use transaction::{NewTransaction, Transaction, TransactionId};

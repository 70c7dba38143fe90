//! # Bank Types
//!
//! Domain types and port traits for the bank ledger service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Account, OperationType, Transaction, Amount)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - The handler / domain / infra error taxonomy
//! - `context/` - Per-request metadata threaded through the call chain

pub mod context;
pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use context::RequestContext;
pub use domain::{
    Account, AccountId, Amount, NewAccount, NewTransaction, OperationKind, OperationType,
    OperationTypeId, Transaction, TransactionId,
};
pub use dto::*;
pub use error::{
    AppError, DomainError, ErrorCode, ErrorResponse, HandlerError, InfraError, RepoError,
};
pub use ports::AccountRepository;

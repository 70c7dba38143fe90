//! Operation type reference data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of an operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OperationTypeId(i64);

impl OperationTypeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OperationTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A classification of a transaction, as stored in `operation_types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationType {
    pub id: OperationTypeId,
    pub description: String,
}

/// The fixed catalog of operation types seeded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CashPurchase,
    InstallmentPurchase,
    Withdrawal,
    Payment,
}

impl OperationKind {
    /// Every seeded kind, in id order.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::CashPurchase,
        OperationKind::InstallmentPurchase,
        OperationKind::Withdrawal,
        OperationKind::Payment,
    ];

    pub fn id(&self) -> OperationTypeId {
        match self {
            OperationKind::CashPurchase => OperationTypeId(1),
            OperationKind::InstallmentPurchase => OperationTypeId(2),
            OperationKind::Withdrawal => OperationTypeId(3),
            OperationKind::Payment => OperationTypeId(4),
        }
    }

    /// Stored description of the kind.
    pub fn description(&self) -> &'static str {
        match self {
            OperationKind::CashPurchase => "COMPRA A VISTA",
            OperationKind::InstallmentPurchase => "COMPRA PARCELADA",
            OperationKind::Withdrawal => "SAQUE",
            OperationKind::Payment => "PAGAMENTO",
        }
    }

    pub fn from_id(id: OperationTypeId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn as_operation_type(&self) -> OperationType {
        OperationType {
            id: self.id(),
            description: self.description().to_string(),
        }
    }
}

//! Error types for the SplitBill engine.
//!
//! The balance and settlement computations are total and never fail; these
//! errors come from the surfaces around them. All errors use the `SB_ERR_`
//! prefix for easy grepping in logs. Codes are grouped by subsystem:
//! - 1xx: Ledger edit errors
//! - 2xx: Conservation check errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ItemId, MemberId, TransactionId};

/// Central error enum for all SplitBill operations.
#[derive(Debug, Error)]
pub enum SplitBillError {
    // =================================================================
    // Ledger Edit Errors (1xx)
    // =================================================================
    /// The referenced member is not part of the ledger.
    #[error("SB_ERR_100: Member not found: {0}")]
    MemberNotFound(MemberId),

    /// The referenced transaction is not part of the ledger.
    #[error("SB_ERR_101: Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// The referenced item is not part of the transaction.
    #[error("SB_ERR_102: Item {item} not found in transaction {transaction}")]
    ItemNotFound {
        transaction: TransactionId,
        item: ItemId,
    },

    /// A transaction needs a payer, so at least one member must exist.
    #[error("SB_ERR_103: Ledger has no members to act as payer")]
    NoMembers,

    // =================================================================
    // Conservation Errors (2xx)
    // =================================================================
    /// Balances do not sum to zero within tolerance.
    #[error("SB_ERR_200: Balances do not sum to zero: total {total}, tolerance {tolerance}")]
    ZeroSumViolation { total: Decimal, tolerance: Decimal },

    /// Settlements do not reproduce a member's balance.
    #[error("SB_ERR_201: Settlement mismatch for {member}: expected {expected}, settled {settled}")]
    SettlementMismatch {
        member: MemberId,
        expected: Decimal,
        settled: Decimal,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (negative tolerance, unsupported scale, ...).
    #[error("SB_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SplitBillError>;

impl From<serde_json::Error> for SplitBillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SplitBillError::MemberNotFound(MemberId::new("m9"));
        let msg = format!("{err}");
        assert!(msg.starts_with("SB_ERR_100"), "Got: {msg}");
        assert!(msg.contains("m9"));
    }

    #[test]
    fn settlement_mismatch_display() {
        let err = SplitBillError::SettlementMismatch {
            member: MemberId::new("m1"),
            expected: Decimal::new(5600, 2),
            settled: Decimal::new(3200, 2),
        };
        let msg = format!("{err}");
        assert!(msg.contains("SB_ERR_201"));
        assert!(msg.contains("56.00"));
        assert!(msg.contains("32.00"));
    }

    #[test]
    fn json_errors_convert_to_serialization() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SplitBillError = json_err.into();
        assert!(matches!(err, SplitBillError::Serialization(_)));
    }

    #[test]
    fn all_errors_have_sb_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SplitBillError::NoMembers),
            Box::new(SplitBillError::TransactionNotFound(TransactionId::new("t1"))),
            Box::new(SplitBillError::ItemNotFound {
                transaction: TransactionId::new("t1"),
                item: ItemId::new("i1"),
            }),
            Box::new(SplitBillError::ZeroSumViolation {
                total: Decimal::ONE,
                tolerance: Decimal::new(1, 2),
            }),
            Box::new(SplitBillError::Configuration("bad".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("SB_ERR_"),
                "Error missing SB_ERR_ prefix: {msg}"
            );
        }
    }
}

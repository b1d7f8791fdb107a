//! # splitbill-engine
//!
//! **Pure balance and settlement engine for SplitBill.**
//!
//! Two stateless functions, strictly ordered by data dependency:
//!
//! ```text
//! calculate_balances(&[Member], &[Transaction]) -> Balances
//! calculate_settlement(&Balances)               -> Vec<Settlement>
//! ```
//!
//! - **Zero side effects**: no I/O, no shared state, inputs are borrowed
//! - **Fail soft**: unknown member ids are ignored, zero subtotals split as 0
//! - **Deterministic output**: same snapshot -> same balances and transfers
//!
//! Around the core sit conservation checks (zero-sum, settlement validity),
//! a plain-text recap renderer, and [`LedgerExt`] for running everything on a
//! [`splitbill_types::Ledger`] snapshot.

pub mod balances;
pub mod conservation;
pub mod ledger_ext;
pub mod recap;
pub mod settlement;

pub use balances::{calculate_balances, calculate_balances_with};
pub use conservation::{unallocated, verify_settlement, verify_zero_sum};
pub use ledger_ext::LedgerExt;
pub use recap::{format_amount, render_recap};
pub use settlement::{calculate_settlement, calculate_settlement_with};

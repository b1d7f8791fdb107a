//! # splitbill-types
//!
//! Shared records, errors, and configuration for the **SplitBill** engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`MemberId`], [`TransactionId`], [`ItemId`]
//! - **Records**: [`Member`], [`Item`], [`Transaction`], [`Settlement`]
//! - **Balance model**: [`Balances`]
//! - **Snapshot**: [`Ledger`] with immutable replace-by-id edits
//! - **Money**: [`round_money`], [`round_money_to`]
//! - **Configuration**: [`SettlementConfig`], [`RecapFormat`]
//! - **Errors**: [`SplitBillError`] with `SB_ERR_` prefix codes
//! - **Constants**: rounding scale, settlement tolerance, defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod member;
pub mod money;
pub mod settlement;
pub mod transaction;

pub use balance::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use member::*;
pub use money::*;
pub use settlement::*;
pub use transaction::*;

// Constants are accessed via `splitbill_types::constants::FOO`
// (not re-exported to avoid name collisions).

//! System-wide constants for the SplitBill engine.

use rust_decimal::Decimal;

/// Decimal places every balance update is rounded to (minor currency units).
pub const MONEY_SCALE: u32 = 2;

/// Dead-zone for settlement: balances whose magnitude is at or below this
/// value are treated as settled (0.01).
pub const SETTLEMENT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest scale `rust_decimal` can represent.
pub const MAX_MONEY_SCALE: u32 = 28;

/// Name of a freshly created transaction.
pub const DEFAULT_TRANSACTION_NAME: &str = "New Transaction";

/// Name of a freshly created item.
pub const DEFAULT_ITEM_NAME: &str = "Item";

/// Display name used when a settlement references a member that no longer exists.
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown";

/// Title line of the shareable settlement recap.
pub const DEFAULT_RECAP_TITLE: &str = "Split Bill Recap";

/// Currency prefix used by the recap renderer.
pub const DEFAULT_CURRENCY_PREFIX: &str = "Rp";

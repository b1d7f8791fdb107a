//! Settlement transfers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MemberId;

/// A single directed transfer from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The debtor paying.
    pub from: MemberId,
    /// The creditor receiving.
    pub to: MemberId,
    /// Always positive.
    pub amount: Decimal,
}

impl Settlement {
    #[must_use]
    pub fn new(from: MemberId, to: MemberId, amount: Decimal) -> Self {
        Self { from, to, amount }
    }

    /// Signed effect of this transfer on `member`'s position: the creditor
    /// gains `amount`, the debtor loses it.
    #[must_use]
    pub fn effect_on(&self, member: &MemberId) -> Decimal {
        let mut effect = Decimal::ZERO;
        if &self.to == member {
            effect += self.amount;
        }
        if &self.from == member {
            effect -= self.amount;
        }
        effect
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

//! Net balance mapping produced by the balance calculator.
//!
//! Positive means the member is owed money (creditor), negative means the
//! member owes money (debtor), zero means settled. Entries iterate in the
//! order members were registered, which keeps settlement tie-breaks stable.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Member, MemberId, money::round_money_to};

/// Outcome of [`Balances::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Applied,
    /// The member has no entry.
    UnknownMember,
    /// The new balance does not fit in a `Decimal`.
    Overflow,
}

/// Ordered `MemberId -> Decimal` mapping with one entry per known member.
#[derive(Debug, Clone, Default)]
pub struct Balances {
    entries: Vec<(MemberId, Decimal)>,
    index: HashMap<MemberId, usize>,
}

impl Balances {
    /// An empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero entry for every member, in member order. Duplicate ids keep
    /// their first position.
    #[must_use]
    pub fn zeroed(members: &[Member]) -> Self {
        let mut balances = Self::new();
        for member in members {
            if !balances.contains(&member.id) {
                balances.insert(member.id.clone(), Decimal::ZERO);
            }
        }
        balances
    }

    /// Set `member`'s balance, appending a new entry if needed.
    pub fn insert(&mut self, member: MemberId, amount: Decimal) {
        if let Some(&pos) = self.index.get(&member) {
            self.entries[pos].1 = amount;
        } else {
            self.index.insert(member.clone(), self.entries.len());
            self.entries.push((member, amount));
        }
    }

    /// Add `delta` to a known member's balance and round to `scale` places.
    ///
    /// Nothing is touched unless the result is [`Adjustment::Applied`].
    pub fn adjust(&mut self, member: &MemberId, delta: Decimal, scale: u32) -> Adjustment {
        let Some(&pos) = self.index.get(member) else {
            return Adjustment::UnknownMember;
        };
        let entry = &mut self.entries[pos].1;
        match entry.checked_add(delta) {
            Some(sum) => {
                *entry = round_money_to(sum, scale);
                Adjustment::Applied
            }
            None => Adjustment::Overflow,
        }
    }

    #[must_use]
    pub fn get(&self, member: &MemberId) -> Option<Decimal> {
        self.index.get(member).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn contains(&self, member: &MemberId) -> bool {
        self.index.contains_key(member)
    }

    /// Entries in member order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Decimal)> {
        self.entries.iter().map(|(id, amount)| (id, *amount))
    }

    /// Sum of all balances. Zero when every item is assigned and every payer
    /// is known, up to per-step rounding. Saturates at the `Decimal` bounds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, (_, amount)| acc.saturating_add(*amount))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Balances {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Balances {}

impl FromIterator<(MemberId, Decimal)> for Balances {
    fn from_iter<I: IntoIterator<Item = (MemberId, Decimal)>>(iter: I) -> Self {
        let mut balances = Self::new();
        for (member, amount) in iter {
            balances.insert(member, amount);
        }
        balances
    }
}

/// Serializes as a JSON object keyed by member id, in member order.
impl Serialize for Balances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (member, amount) in &self.entries {
            map.serialize_entry(member, amount)?;
        }
        map.end()
    }
}

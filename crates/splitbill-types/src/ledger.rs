//! The member + transaction snapshot the engine evaluates.
//!
//! Every edit is a pure transformation: it takes `&self` and returns a new
//! [`Ledger`], replacing records by id inside the ordered sequences. The
//! receiver is never mutated, so a caller can keep the previous snapshot
//! around (undo, diffing) for free.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Item, ItemId, Member, MemberId, Result, SplitBillError, Transaction, TransactionId, constants,
};

/// Members and transactions, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    #[must_use]
    pub fn new(members: Vec<Member>, transactions: Vec<Transaction>) -> Self {
        Self {
            members,
            transactions,
        }
    }

    /// Parse a JSON snapshot (camelCase record keys, amounts as numbers or
    /// strings).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    #[must_use]
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    // -----------------------------------------------------------------
    // Members
    // -----------------------------------------------------------------

    /// Append a member with a generated id.
    #[must_use]
    pub fn with_member(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.members.push(Member::named(name));
        next
    }

    /// Remove a member and strip it from every item's assignees.
    ///
    /// Transactions the member paid for keep their `payer_id`; the engine
    /// ignores the now-unknown payer.
    pub fn without_member(&self, id: &MemberId) -> Result<Self> {
        if self.member(id).is_none() {
            return Err(SplitBillError::MemberNotFound(id.clone()));
        }
        let members = self.members.iter().filter(|m| &m.id != id).cloned().collect();
        let transactions = self
            .transactions
            .iter()
            .map(|trx| {
                let mut trx = trx.clone();
                for item in &mut trx.items {
                    item.assigned_to.retain(|m| m != id);
                }
                trx
            })
            .collect();
        Ok(Self::new(members, transactions))
    }

    // -----------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------

    /// Prepend an empty transaction paid by the first member.
    pub fn with_transaction(&self, name: impl Into<String>) -> Result<Self> {
        let payer = self.members.first().ok_or(SplitBillError::NoMembers)?;
        let mut next = self.clone();
        next.transactions
            .insert(0, Transaction::new(name, payer.id.clone()));
        Ok(next)
    }

    /// [`Ledger::with_transaction`] using the default name.
    pub fn with_new_transaction(&self) -> Result<Self> {
        self.with_transaction(constants::DEFAULT_TRANSACTION_NAME)
    }

    pub fn without_transaction(&self, id: &TransactionId) -> Result<Self> {
        if self.transaction(id).is_none() {
            return Err(SplitBillError::TransactionNotFound(id.clone()));
        }
        let mut next = self.clone();
        next.transactions.retain(|t| &t.id != id);
        Ok(next)
    }

    /// Replace-by-id: `edit` runs against a copy of the transaction.
    pub fn update_transaction<F>(&self, id: &TransactionId, edit: F) -> Result<Self>
    where
        F: FnOnce(&mut Transaction),
    {
        let mut next = self.clone();
        let trx = next
            .transactions
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| SplitBillError::TransactionNotFound(id.clone()))?;
        edit(trx);
        Ok(next)
    }

    // -----------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------

    /// Append an unassigned item to a transaction.
    pub fn with_item(
        &self,
        trx_id: &TransactionId,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self> {
        let item = Item::new(name, price);
        self.update_transaction(trx_id, |trx| trx.items.push(item))
    }

    /// [`Ledger::with_item`] using the default name and a zero price.
    pub fn with_new_item(&self, trx_id: &TransactionId) -> Result<Self> {
        self.with_item(trx_id, constants::DEFAULT_ITEM_NAME, Decimal::ZERO)
    }

    /// Replace-by-id on a nested item.
    pub fn update_item<F>(&self, trx_id: &TransactionId, item_id: &ItemId, edit: F) -> Result<Self>
    where
        F: FnOnce(&mut Item),
    {
        let mut next = self.clone();
        let trx = next
            .transactions
            .iter_mut()
            .find(|t| &t.id == trx_id)
            .ok_or_else(|| SplitBillError::TransactionNotFound(trx_id.clone()))?;
        let item = trx
            .items
            .iter_mut()
            .find(|i| &i.id == item_id)
            .ok_or_else(|| SplitBillError::ItemNotFound {
                transaction: trx_id.clone(),
                item: item_id.clone(),
            })?;
        edit(item);
        Ok(next)
    }

    pub fn without_item(&self, trx_id: &TransactionId, item_id: &ItemId) -> Result<Self> {
        let trx = self
            .transaction(trx_id)
            .ok_or_else(|| SplitBillError::TransactionNotFound(trx_id.clone()))?;
        if trx.item(item_id).is_none() {
            return Err(SplitBillError::ItemNotFound {
                transaction: trx_id.clone(),
                item: item_id.clone(),
            });
        }
        self.update_transaction(trx_id, |trx| trx.items.retain(|i| &i.id != item_id))
    }

    /// Add `member_id` to the item's assignees, or remove it if present.
    pub fn toggle_assignee(
        &self,
        trx_id: &TransactionId,
        item_id: &ItemId,
        member_id: &MemberId,
    ) -> Result<Self> {
        self.update_item(trx_id, item_id, |item| item.toggle_assignee(member_id))
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Ledger {
    /// Three members sharing a seafood dinner with discount and tax.
    pub fn sample() -> Self {
        Self::new(
            vec![
                Member::dummy("m1", "Alice"),
                Member::dummy("m2", "Bob"),
                Member::dummy("m3", "Charlie"),
            ],
            vec![Transaction::dummy(
                "t1",
                "m1",
                Decimal::new(50_000, 0),
                Decimal::new(25_000, 0),
                vec![
                    Item::dummy("i1", Decimal::new(200_000, 0), &["m1", "m2", "m3"]),
                    Item::dummy("i2", Decimal::new(50_000, 0), &["m2"]),
                ],
            )],
        )
    }

    /// A ledger where every item has at least one known assignee and every
    /// payer is a known member. Prices are whole cents.
    #[cfg(feature = "test-helpers")]
    pub fn random<R: rand::Rng>(rng: &mut R, member_count: usize, trx_count: usize) -> Self {
        let members: Vec<Member> = (0..member_count.max(1))
            .map(|n| Member::dummy(&format!("m{n}"), &format!("member-{n}")))
            .collect();
        let transactions = (0..trx_count)
            .map(|t| {
                let payer = &members[rng.gen_range(0..members.len())].id;
                let items: Vec<Item> = (0..rng.gen_range(1..=5))
                    .map(|i| {
                        let mut assigned: Vec<MemberId> = members
                            .iter()
                            .filter(|_| rng.gen_bool(0.5))
                            .map(|m| m.id.clone())
                            .collect();
                        if assigned.is_empty() {
                            assigned.push(members[rng.gen_range(0..members.len())].id.clone());
                        }
                        Item {
                            id: ItemId::new(format!("t{t}-i{i}")),
                            name: format!("item-{i}"),
                            price: Decimal::new(rng.gen_range(0..=50_000), 2),
                            assigned_to: assigned,
                        }
                    })
                    .collect();
                let subtotal: Decimal = items.iter().map(|i| i.price).sum();
                // Discount and tax on an all-free receipt cannot be spread
                // across items, so keep those receipts plain.
                let (discount, tax) = if subtotal.is_zero() {
                    (Decimal::ZERO, Decimal::ZERO)
                } else {
                    (
                        Decimal::new(rng.gen_range(0..=1_000), 2).min(subtotal),
                        Decimal::new(rng.gen_range(0..=1_000), 2),
                    )
                };
                Transaction::dummy(&format!("t{t}"), payer.as_str(), discount, tax, items)
            })
            .collect();
        Self::new(members, transactions)
    }
}

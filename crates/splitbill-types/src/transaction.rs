//! Purchase transactions and their line items.
//!
//! A [`Transaction`] is one receipt: a payer, a list of [`Item`]s, and a flat
//! discount and tax. Discount and tax are spread across the items by price
//! share, so an item worth 60% of the subtotal carries 60% of each.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ItemId, MemberId, TransactionId};

/// One purchased line and the members who consumed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Price in minor-unit currency amount. Expected to be `>= 0`.
    pub price: Decimal,
    /// Members sharing this item. Order and duplicates carry no meaning.
    #[serde(default)]
    pub assigned_to: Vec<MemberId>,
}

impl Item {
    /// An unassigned item with a freshly generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            price,
            assigned_to: Vec::new(),
        }
    }

    /// Whether anyone shares this item. Unassigned items are not split.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.assigned_to.is_empty()
    }

    #[must_use]
    pub fn is_assigned_to(&self, member: &MemberId) -> bool {
        self.assigned_to.contains(member)
    }

    /// Add `member` if absent, remove every occurrence otherwise.
    pub fn toggle_assignee(&mut self, member: &MemberId) {
        if self.is_assigned_to(member) {
            self.assigned_to.retain(|m| m != member);
        } else {
            self.assigned_to.push(member.clone());
        }
    }
}

/// A receipt paid by one member and shared item by item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub name: String,
    /// Who fronted the money. May reference a member that no longer exists.
    pub payer_id: MemberId,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Absolute transaction-level discount.
    #[serde(default)]
    pub discount: Decimal,
    /// Absolute transaction-level tax.
    #[serde(default)]
    pub tax: Decimal,
}

impl Transaction {
    /// An empty transaction with no discount or tax.
    #[must_use]
    pub fn new(name: impl Into<String>, payer_id: MemberId) -> Self {
        Self {
            id: TransactionId::generate(),
            name: name.into(),
            payer_id,
            items: Vec::new(),
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }

    /// Sum of item prices, regardless of assignment. `None` on overflow.
    #[must_use]
    pub fn raw_subtotal(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.price))
    }

    /// What the payer actually handed over: subtotal - discount + tax.
    #[must_use]
    pub fn total_paid(&self) -> Option<Decimal> {
        self.raw_subtotal()?
            .checked_sub(self.discount)?
            .checked_add(self.tax)
    }

    /// Share of the subtotal carried by `item`; zero when the subtotal is not
    /// positive.
    #[must_use]
    pub fn proportion_of(&self, item: &Item) -> Option<Decimal> {
        proportion(item.price, self.raw_subtotal()?)
    }

    /// Item price after its share of discount and tax.
    #[must_use]
    pub fn effective_price(&self, item: &Item) -> Option<Decimal> {
        self.spread(item.price, self.raw_subtotal()?)
    }

    /// Every item paired with its effective price, computing the subtotal once.
    /// An item whose price cannot be represented is paired with `None`.
    pub fn effective_prices(&self) -> impl Iterator<Item = (&Item, Option<Decimal>)> + '_ {
        let subtotal = self.raw_subtotal();
        self.items.iter().map(move |item| {
            let price = subtotal.and_then(|subtotal| self.spread(item.price, subtotal));
            (item, price)
        })
    }

    fn spread(&self, price: Decimal, subtotal: Decimal) -> Option<Decimal> {
        let share = proportion(price, subtotal)?;
        price
            .checked_sub(self.discount.checked_mul(share)?)?
            .checked_add(self.tax.checked_mul(share)?)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }
}

fn proportion(price: Decimal, subtotal: Decimal) -> Option<Decimal> {
    if subtotal > Decimal::ZERO {
        price.checked_div(subtotal)
    } else {
        Some(Decimal::ZERO)
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transaction[{}] {} paid by {}: {} items",
            self.id,
            self.name,
            self.payer_id,
            self.items.len(),
        )?;
        match self.total_paid() {
            Some(total) => write!(f, ", total {total}"),
            None => f.write_str(", total out of range"),
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Item {
    pub fn dummy(id: &str, price: Decimal, assigned_to: &[&str]) -> Self {
        Self {
            id: ItemId::new(id),
            name: format!("item-{id}"),
            price,
            assigned_to: assigned_to.iter().map(|m| MemberId::new(*m)).collect(),
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Transaction {
    pub fn dummy(id: &str, payer: &str, discount: Decimal, tax: Decimal, items: Vec<Item>) -> Self {
        Self {
            id: TransactionId::new(id),
            name: format!("trx-{id}"),
            payer_id: MemberId::new(payer),
            items,
            discount,
            tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dinner() -> Transaction {
        Transaction::dummy(
            "t1",
            "1",
            Decimal::new(20, 0),
            Decimal::ZERO,
            vec![
                Item::dummy("i1", Decimal::new(60, 0), &["1", "2"]),
                Item::dummy("i2", Decimal::new(40, 0), &["3"]),
            ],
        )
    }

    #[test]
    fn subtotal_and_total_paid() {
        let trx = dinner();
        assert_eq!(trx.raw_subtotal(), Some(Decimal::new(100, 0)));
        assert_eq!(trx.total_paid(), Some(Decimal::new(80, 0)));
    }

    #[test]
    fn discount_spread_by_price_share() {
        let trx = dinner();
        assert_eq!(trx.proportion_of(&trx.items[0]), Some(Decimal::new(6, 1)));
        assert_eq!(trx.effective_price(&trx.items[0]), Some(Decimal::new(48, 0)));
        assert_eq!(trx.effective_price(&trx.items[1]), Some(Decimal::new(32, 0)));
    }

    #[test]
    fn tax_spread_by_price_share() {
        let mut trx = dinner();
        trx.discount = Decimal::ZERO;
        trx.tax = Decimal::new(10, 0);
        assert_eq!(trx.effective_price(&trx.items[0]), Some(Decimal::new(66, 0)));
        assert_eq!(trx.effective_price(&trx.items[1]), Some(Decimal::new(44, 0)));
    }

    #[test]
    fn effective_prices_cover_all_items() {
        let trx = dinner();
        let prices: Vec<Decimal> = trx.effective_prices().filter_map(|(_, p)| p).collect();
        assert_eq!(prices, vec![Decimal::new(48, 0), Decimal::new(32, 0)]);
        assert_eq!(Some(prices.iter().copied().sum::<Decimal>()), trx.total_paid());
    }

    #[test]
    fn zero_subtotal_has_zero_proportion() {
        let trx = Transaction::dummy(
            "t0",
            "1",
            Decimal::new(5, 0),
            Decimal::ZERO,
            vec![Item::dummy("free", Decimal::ZERO, &["1"])],
        );
        assert_eq!(trx.proportion_of(&trx.items[0]), Some(Decimal::ZERO));
        assert_eq!(trx.effective_price(&trx.items[0]), Some(Decimal::ZERO));
        assert_eq!(trx.total_paid(), Some(Decimal::new(-5, 0)));
    }

    #[test]
    fn huge_share_of_tiny_subtotal_is_out_of_range() {
        // 1e20 and -1e20 + 0.01 net to a subtotal of one cent, so each item
        // carries about 1e22 times the discount.
        let trx = Transaction::dummy(
            "t0",
            "1",
            Decimal::new(10_000_000, 0),
            Decimal::ZERO,
            vec![
                Item::dummy(
                    "big",
                    Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0),
                    &["2"],
                ),
                Item::dummy(
                    "refund",
                    Decimal::from_i128_with_scale(-9_999_999_999_999_999_999_999, 2),
                    &["3"],
                ),
            ],
        );
        assert_eq!(trx.raw_subtotal(), Some(Decimal::new(1, 2)));
        assert_eq!(trx.total_paid(), Some(Decimal::new(-999_999_999, 2)));
        assert_eq!(trx.effective_price(&trx.items[0]), None);
        assert!(trx.effective_prices().all(|(_, p)| p.is_none()));
    }

    #[test]
    fn subtotal_past_decimal_max_is_out_of_range() {
        let trx = Transaction::dummy(
            "t0",
            "1",
            Decimal::ZERO,
            Decimal::ZERO,
            vec![
                Item::dummy("a", Decimal::MAX, &["1"]),
                Item::dummy("b", Decimal::MAX, &["1"]),
            ],
        );
        assert_eq!(trx.raw_subtotal(), None);
        assert_eq!(trx.total_paid(), None);
        assert!(trx.to_string().ends_with("total out of range"));
    }

    #[test]
    fn toggle_assignee_adds_then_removes() {
        let mut item = Item::dummy("i1", Decimal::ONE, &["1"]);
        let bob = MemberId::new("2");
        item.toggle_assignee(&bob);
        assert!(item.is_assigned_to(&bob));
        item.toggle_assignee(&bob);
        assert!(!item.is_assigned_to(&bob));
        assert_eq!(item.assigned_to, vec![MemberId::new("1")]);
    }

    #[test]
    fn deserializes_camel_case_with_numeric_amounts() {
        let json = r#"{
            "id": "t1", "name": "Dinner", "payerId": "1",
            "discount": 20, "tax": 0,
            "items": [{"id": "i1", "name": "Pizza", "price": 60, "assignedTo": ["1", "2"]}]
        }"#;
        let trx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(trx.payer_id, MemberId::new("1"));
        assert_eq!(trx.discount, Decimal::new(20, 0));
        assert_eq!(trx.items[0].price, Decimal::new(60, 0));
        assert_eq!(trx.items[0].assigned_to.len(), 2);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_string(&dinner()).unwrap();
        assert!(json.contains("\"payerId\""));
        assert!(json.contains("\"assignedTo\""));
    }
}

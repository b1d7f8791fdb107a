//! Balance calculator.
//!
//! Reduces the full transaction list into one net balance per member:
//!
//! ```text
//! calculate_balances(&[Member], &[Transaction]) -> Balances
//! ```
//!
//! ## Algorithm (per transaction)
//!
//! 1. `raw_subtotal` = sum of item prices, ignoring assignment
//! 2. Credit the payer with `raw_subtotal - discount + tax`
//! 3. For each item, `effective_price = price - discount*p + tax*p` with
//!    `p = price / raw_subtotal` (or 0 when the subtotal is not positive)
//! 4. Split `effective_price` evenly across the assignees and debit each
//! 5. Round after every single credit or debit
//!
//! ## Unknown ids
//!
//! Payers and assignees that are not in `members` are skipped. No entry is
//! created for them and nobody else absorbs their share, so the total may
//! drift away from zero. Unassigned items are not split either.
//!
//! ## Out-of-range amounts
//!
//! A credit or debit that cannot be represented as a `Decimal` is skipped
//! with a warning, the same way an unknown payer is.

use rust_decimal::Decimal;
use splitbill_types::{Adjustment, Balances, Member, SettlementConfig, Transaction};

/// Net balance per member using the default rounding scale.
#[must_use]
pub fn calculate_balances(members: &[Member], transactions: &[Transaction]) -> Balances {
    calculate_balances_with(members, transactions, &SettlementConfig::default())
}

/// Net balance per member, rounding every update to `config.money_scale`.
#[must_use]
pub fn calculate_balances_with(
    members: &[Member],
    transactions: &[Transaction],
    config: &SettlementConfig,
) -> Balances {
    let scale = config.money_scale;
    let mut balances = Balances::zeroed(members);

    for trx in transactions {
        match trx.total_paid() {
            Some(total_paid) => match balances.adjust(&trx.payer_id, total_paid, scale) {
                Adjustment::Applied => {}
                Adjustment::UnknownMember => tracing::warn!(
                    transaction = %trx.id,
                    payer = %trx.payer_id,
                    total_paid = %total_paid,
                    "Unknown payer, credit skipped"
                ),
                Adjustment::Overflow => tracing::warn!(
                    transaction = %trx.id,
                    payer = %trx.payer_id,
                    total_paid = %total_paid,
                    "Payer balance out of range, credit skipped"
                ),
            },
            None => tracing::warn!(
                transaction = %trx.id,
                payer = %trx.payer_id,
                "Total paid out of range, credit skipped"
            ),
        }

        for (item, effective_price) in trx.effective_prices() {
            if !item.is_assigned() {
                tracing::debug!(
                    transaction = %trx.id,
                    item = %item.id,
                    "Unassigned item, cost not split"
                );
                continue;
            }

            let Some(cost_per_person) = effective_price
                .and_then(|price| price.checked_div(Decimal::from(item.assigned_to.len())))
            else {
                tracing::warn!(
                    transaction = %trx.id,
                    item = %item.id,
                    price = %item.price,
                    "Effective price out of range, debits skipped"
                );
                continue;
            };

            for member in &item.assigned_to {
                match balances.adjust(member, -cost_per_person, scale) {
                    Adjustment::Applied => tracing::trace!(
                        transaction = %trx.id,
                        item = %item.id,
                        member = %member,
                        cost = %cost_per_person,
                        "Debited share"
                    ),
                    Adjustment::UnknownMember => tracing::debug!(
                        transaction = %trx.id,
                        item = %item.id,
                        member = %member,
                        "Unknown assignee, debit skipped"
                    ),
                    Adjustment::Overflow => tracing::warn!(
                        transaction = %trx.id,
                        item = %item.id,
                        member = %member,
                        cost = %cost_per_person,
                        "Assignee balance out of range, debit skipped"
                    ),
                }
            }
        }
    }

    tracing::debug!(
        members = balances.len(),
        transactions = transactions.len(),
        total = %balances.total(),
        "Balances calculated"
    );

    balances
}

//! Greedy settlement resolver.
//!
//! ```text
//! calculate_settlement(&Balances) -> Vec<Settlement>
//! ```
//!
//! ## Algorithm
//!
//! 1. Round every owed amount (`-balance`) and every credit (`balance`) and
//!    drop those inside the dead zone (`<= tolerance`). Both sides round
//!    their positive magnitude, so a half-cent debt rounds up like a
//!    half-cent credit
//! 2. Split the rest into debtors and creditors, each sorted largest first
//!    (stable, so ties keep member order)
//! 3. Match the largest remaining debtor with the largest remaining creditor
//!    for `min(debt, credit)` and subtract it from both
//! 4. Move past whichever side reached exactly zero; stop when either list
//!    runs out
//!
//! Output order is generation order.
//!
//! ## Known approximation
//!
//! Largest-vs-largest matching keeps the transfer count low in common cases
//! but is not a minimum-transfer solver. It produces at most
//! `debtors + creditors - 1` transfers.

use rust_decimal::Decimal;
use splitbill_types::{Balances, MemberId, Settlement, SettlementConfig, round_money_to};

/// One side of the matching with its outstanding amount (always positive).
#[derive(Debug)]
struct Party {
    id: MemberId,
    remaining: Decimal,
}

/// Settle `balances` with the default tolerance and scale.
#[must_use]
pub fn calculate_settlement(balances: &Balances) -> Vec<Settlement> {
    calculate_settlement_with(balances, &SettlementConfig::default())
}

/// Settle `balances` with an explicit tolerance and scale.
#[must_use]
pub fn calculate_settlement_with(balances: &Balances, config: &SettlementConfig) -> Vec<Settlement> {
    let scale = config.money_scale;
    // A negative dead zone would turn zero balances into parties.
    let tolerance = config.tolerance.max(Decimal::ZERO);
    if let Err(err) = config.validate() {
        tracing::warn!(error = %err, tolerance = %tolerance, "Invalid settlement config");
    }

    let mut debtors: Vec<Party> = Vec::new();
    let mut creditors: Vec<Party> = Vec::new();
    for (id, balance) in balances.iter() {
        let owed = round_money_to(-balance, scale);
        let credit = round_money_to(balance, scale);
        if owed > tolerance {
            debtors.push(Party {
                id: id.clone(),
                remaining: owed,
            });
        } else if credit > tolerance {
            creditors.push(Party {
                id: id.clone(),
                remaining: credit,
            });
        }
    }

    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut settlements = Vec::with_capacity(debtors.len() + creditors.len());
    let mut debtor_idx = 0;
    let mut creditor_idx = 0;

    while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
        let debtor = &mut debtors[debtor_idx];
        let creditor = &mut creditors[creditor_idx];

        let amount = debtor.remaining.min(creditor.remaining);
        debtor.remaining = round_money_to(debtor.remaining - amount, scale);
        creditor.remaining = round_money_to(creditor.remaining - amount, scale);

        tracing::debug!(
            from = %debtor.id,
            to = %creditor.id,
            amount = %amount,
            "Settlement generated"
        );
        settlements.push(Settlement::new(
            debtor.id.clone(),
            creditor.id.clone(),
            amount,
        ));

        if debtor.remaining.is_zero() {
            debtor_idx += 1;
        }
        if creditor.remaining.is_zero() {
            creditor_idx += 1;
        }
    }

    let unsettled = debtors[debtor_idx..]
        .iter()
        .chain(&creditors[creditor_idx..])
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.remaining));
    tracing::info!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = settlements.len(),
        unsettled = %unsettled,
        "Settlement complete"
    );

    settlements
}

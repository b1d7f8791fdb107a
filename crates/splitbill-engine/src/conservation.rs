//! Conservation checks over engine output.
//!
//! Two invariants hold for well-formed input:
//! ```text
//! Σ balances == 0                                  (every item assigned, every payer known)
//! ∀ member: Σ(received) - Σ(paid) == balance       (after settlement)
//! ```
//!
//! Both are checked within a tolerance because balances are rounded after
//! every step. A non-zero total is not an engine failure: it means an item
//! was left unassigned or a payer no longer exists. These checks let the
//! caller tell the difference.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use splitbill_types::{
    Balances, MemberId, Result, Settlement, SettlementConfig, SplitBillError, round_money_to,
};

/// Money that was paid but not allocated to anyone (or allocated to nobody
/// who paid). Zero for a fully assigned ledger with known payers.
#[must_use]
pub fn unallocated(balances: &Balances) -> Decimal {
    balances.total()
}

/// Check that the balances sum to zero within `tolerance`.
///
/// # Errors
/// Returns [`SplitBillError::ZeroSumViolation`] if `|Σ balances| > tolerance`.
pub fn verify_zero_sum(balances: &Balances, tolerance: Decimal) -> Result<()> {
    let total = unallocated(balances);
    if total.abs() > tolerance {
        tracing::warn!(total = %total, tolerance = %tolerance, "Balances do not sum to zero");
        return Err(SplitBillError::ZeroSumViolation { total, tolerance });
    }
    Ok(())
}

/// Check that applying `settlements` reproduces every member's balance.
///
/// Balance magnitudes are rounded with `config.money_scale` first; a member is
/// accepted when `|balance - (received - paid)| <= config.tolerance`, which
/// also covers dead-zone balances the resolver leaves untouched. Parties
/// that appear in settlements but not in `balances` must net to zero.
///
/// # Errors
/// Returns [`SplitBillError::SettlementMismatch`] for the first member that
/// does not reconcile.
pub fn verify_settlement(
    balances: &Balances,
    settlements: &[Settlement],
    config: &SettlementConfig,
) -> Result<()> {
    let mut settled: HashMap<&MemberId, Decimal> = HashMap::new();
    for s in settlements {
        let to = settled.entry(&s.to).or_insert(Decimal::ZERO);
        *to = to.saturating_add(s.amount);
        let from = settled.entry(&s.from).or_insert(Decimal::ZERO);
        *from = from.saturating_sub(s.amount);
    }

    for (member, balance) in balances.iter() {
        let expected = rounded_balance(balance, config.money_scale);
        let net = settled.get(member).copied().unwrap_or(Decimal::ZERO);
        check_member(member, expected, net, config.tolerance)?;
    }

    let mut strangers: HashSet<&MemberId> = HashSet::new();
    for s in settlements {
        for party in [&s.from, &s.to] {
            if !balances.contains(party) && strangers.insert(party) {
                let net = settled.get(party).copied().unwrap_or(Decimal::ZERO);
                check_member(party, Decimal::ZERO, net, config.tolerance)?;
            }
        }
    }

    Ok(())
}

/// Rounds the magnitude, matching how the resolver sizes debts and credits.
fn rounded_balance(balance: Decimal, scale: u32) -> Decimal {
    if balance.is_sign_negative() {
        -round_money_to(-balance, scale)
    } else {
        round_money_to(balance, scale)
    }
}

fn check_member(member: &MemberId, expected: Decimal, net: Decimal, tolerance: Decimal) -> Result<()> {
    if expected.saturating_sub(net).abs() > tolerance {
        tracing::warn!(
            member = %member,
            expected = %expected,
            settled = %net,
            "Settlement does not reproduce balance"
        );
        return Err(SplitBillError::SettlementMismatch {
            member: member.clone(),
            expected,
            settled: net,
        });
    }
    Ok(())
}

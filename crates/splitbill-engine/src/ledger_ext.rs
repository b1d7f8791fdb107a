//! Run the engine directly on a [`Ledger`] snapshot.

use splitbill_types::{Balances, Ledger, RecapFormat, Settlement, SettlementConfig};

use crate::{calculate_balances_with, calculate_settlement_with, render_recap};

/// Engine entry points on a [`Ledger`].
pub trait LedgerExt {
    /// Net balance per member.
    fn balances(&self) -> Balances {
        self.balances_with(&SettlementConfig::default())
    }

    fn balances_with(&self, config: &SettlementConfig) -> Balances;

    /// Transfers that settle the snapshot.
    fn settlements(&self) -> Vec<Settlement> {
        self.settlements_with(&SettlementConfig::default())
    }

    fn settlements_with(&self, config: &SettlementConfig) -> Vec<Settlement>;

    /// Shareable recap, `None` when nobody owes anything.
    fn recap(&self, format: &RecapFormat) -> Option<String> {
        self.recap_with(format, &SettlementConfig::default())
    }

    fn recap_with(&self, format: &RecapFormat, config: &SettlementConfig) -> Option<String>;
}

impl LedgerExt for Ledger {
    fn balances_with(&self, config: &SettlementConfig) -> Balances {
        calculate_balances_with(&self.members, &self.transactions, config)
    }

    fn settlements_with(&self, config: &SettlementConfig) -> Vec<Settlement> {
        calculate_settlement_with(&self.balances_with(config), config)
    }

    fn recap_with(&self, format: &RecapFormat, config: &SettlementConfig) -> Option<String> {
        render_recap(&self.members, &self.settlements_with(config), format)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use splitbill_types::MemberId;

    use super::*;

    #[test]
    fn sample_ledger_balances() {
        // Crab 200k shared by three, fried rice 50k for Bob; -50k discount, +25k tax.
        // Total paid 225k; crab effective 180k (60k each), rice 45k.
        let ledger = Ledger::sample();
        let balances = ledger.balances();
        assert_eq!(balances.get(&MemberId::new("m1")), Some(Decimal::new(165_000, 0)));
        assert_eq!(balances.get(&MemberId::new("m2")), Some(Decimal::new(-105_000, 0)));
        assert_eq!(balances.get(&MemberId::new("m3")), Some(Decimal::new(-60_000, 0)));
    }

    #[test]
    fn sample_ledger_settlements_and_recap() {
        let ledger = Ledger::sample();
        let settlements = ledger.settlements();
        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0].from, MemberId::new("m2"));
        assert_eq!(settlements[0].amount, Decimal::new(105_000, 0));

        let text = ledger.recap(&RecapFormat::default()).unwrap();
        assert!(text.contains("- Bob pays Alice Rp105.000"));
        assert!(text.contains("- Charlie pays Alice Rp60.000"));
    }

    #[test]
    fn recap_follows_settlement_config() {
        let ledger = Ledger::sample();
        let lenient = SettlementConfig {
            tolerance: Decimal::new(70_000, 0),
            ..SettlementConfig::default()
        };
        // Charlie's 60k debt falls inside the widened dead zone.
        let text = ledger.recap_with(&RecapFormat::default(), &lenient).unwrap();
        assert!(text.contains("- Bob pays Alice Rp105.000"));
        assert!(!text.contains("Charlie"));

        let everyone = SettlementConfig {
            tolerance: Decimal::new(200_000, 0),
            ..SettlementConfig::default()
        };
        assert_eq!(ledger.recap_with(&RecapFormat::default(), &everyone), None);
        assert_eq!(
            ledger.recap(&RecapFormat::default()),
            ledger.recap_with(&RecapFormat::default(), &SettlementConfig::default())
        );
    }

    #[test]
    fn edits_flow_through_engine() {
        let ledger = Ledger::sample()
            .without_member(&MemberId::new("m3"))
            .unwrap();
        // Charlie's crab share is now lost; only Bob and Alice split it.
        let balances = ledger.balances();
        assert_eq!(balances.len(), 2);
        assert!(!balances.contains(&MemberId::new("m3")));
        assert_eq!(balances.get(&MemberId::new("m2")), Some(Decimal::new(-135_000, 0)));
    }
}

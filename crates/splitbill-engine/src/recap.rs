//! Plain-text settlement recap for sharing in a chat.
//!
//! ```text
//! Split Bill Recap
//!
//! - Charlie pays Alice Rp32
//! - Bob pays Alice Rp216.666,67
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use splitbill_types::{Member, MemberId, RecapFormat, Settlement, constants, round_money};

/// Render settlements as shareable text, or `None` when nobody has to pay.
///
/// Members missing from `members` are shown as `Unknown`.
#[must_use]
pub fn render_recap(
    members: &[Member],
    settlements: &[Settlement],
    format: &RecapFormat,
) -> Option<String> {
    if settlements.is_empty() {
        return None;
    }

    let names: HashMap<&MemberId, &str> = members
        .iter()
        .map(|m| (&m.id, m.name.as_str()))
        .collect();
    let name_of = |id: &MemberId| {
        names
            .get(id)
            .copied()
            .unwrap_or(constants::UNKNOWN_MEMBER_NAME)
    };

    let mut text = format!("{}\n\n", format.title);
    for s in settlements {
        text.push_str(&format!(
            "- {} pays {} {}{}\n",
            name_of(&s.from),
            name_of(&s.to),
            format.currency_prefix,
            format_amount(s.amount, format),
        ));
    }
    Some(text)
}

/// Group the integer part and drop trailing fractional zeros:
/// `216666.67 -> 216.666,67`, `24.50 -> 24,5`, `32.00 -> 32`.
#[must_use]
pub fn format_amount(amount: Decimal, format: &RecapFormat) -> String {
    let rounded = round_money(amount).normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(format.thousands_separator);
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(format.decimal_separator);
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn trio() -> Vec<Member> {
        vec![
            Member::dummy("1", "Alice"),
            Member::dummy("2", "Bob"),
            Member::dummy("3", "Charlie"),
        ]
    }

    #[test]
    fn no_settlements_no_recap() {
        assert!(render_recap(&trio(), &[], &RecapFormat::default()).is_none());
    }

    #[test]
    fn renders_names_and_amounts() {
        let settlements = vec![
            Settlement::new(MemberId::new("3"), MemberId::new("1"), dec(32)),
            Settlement::new(MemberId::new("2"), MemberId::new("1"), dec(24)),
        ];
        let text = render_recap(&trio(), &settlements, &RecapFormat::default()).unwrap();
        assert_eq!(
            text,
            "Split Bill Recap\n\n- Charlie pays Alice Rp32\n- Bob pays Alice Rp24\n"
        );
    }

    #[test]
    fn unknown_member_rendered_as_unknown() {
        let settlements = vec![Settlement::new(MemberId::new("9"), MemberId::new("1"), dec(5))];
        let text = render_recap(&trio(), &settlements, &RecapFormat::default()).unwrap();
        assert!(text.contains("- Unknown pays Alice Rp5"));
    }

    #[test]
    fn custom_format() {
        let format = RecapFormat {
            title: "Who owes what".into(),
            currency_prefix: "$".into(),
            thousands_separator: ',',
            decimal_separator: '.',
        };
        let settlements = vec![Settlement::new(
            MemberId::new("2"),
            MemberId::new("1"),
            Decimal::new(123_456_789, 2),
        )];
        let text = render_recap(&trio(), &settlements, &format).unwrap();
        assert!(text.starts_with("Who owes what\n\n"));
        assert!(text.contains("- Bob pays Alice $1,234,567.89"));
    }

    #[test]
    fn format_amount_grouping() {
        let fmt = RecapFormat::default();
        assert_eq!(format_amount(Decimal::new(21_666_667, 2), &fmt), "216.666,67");
        assert_eq!(format_amount(Decimal::new(2450, 2), &fmt), "24,5");
        assert_eq!(format_amount(Decimal::new(3200, 2), &fmt), "32");
        assert_eq!(format_amount(dec(1_000), &fmt), "1.000");
        assert_eq!(format_amount(dec(100), &fmt), "100");
        assert_eq!(format_amount(Decimal::ZERO, &fmt), "0");
        assert_eq!(format_amount(dec(-1_500), &fmt), "-1.500");
    }
}

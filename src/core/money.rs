use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole cents, halves away from zero.
///
/// Only presentation code calls this; sums are taken at full precision first.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

pub fn format_percent(percent: Decimal) -> String {
    let s = format!("{:.3}", percent.round_dp(3));
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_cents_away_from_zero() {
        assert_eq!(round_cents(dec!(81.375)), dec!(81.38));
        assert_eq!(round_cents(dec!(81.365)), dec!(81.37));
        assert_eq!(round_cents(dec!(-4.125)), dec!(-4.13));
    }

    #[test]
    fn formats_dollars_with_grouping() {
        assert_eq!(format_usd(dec!(306450)), "$306,450.00");
        assert_eq!(format_usd(dec!(370.05)), "$370.05");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(0)), "$0.00");
    }

    #[test]
    fn formats_negative_amounts_with_leading_sign() {
        assert_eq!(format_usd(dec!(-6.2)), "-$6.20");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn trims_percent_display() {
        assert_eq!(format_percent(dec!(3.5)), "3.5%");
        assert_eq!(format_percent(dec!(20)), "20%");
        assert_eq!(format_percent(dec!(7.0000)), "7%");
    }
}

//! Decimal arithmetic for order totals.
//!
//! All amounts are `BigDecimal` to keep prices exact; nothing here rounds.
//! Rounding happens once, at presentation, via [`format_amount`].

use bigdecimal::{BigDecimal, One, RoundingMode, Zero};

use super::order::LineItem;

/// The standard tax-inclusive VAT rate for groceries (12%).
///
/// Provided as a convenience default; every computation still takes the rate
/// as an explicit parameter.
pub fn standard_vat_rate() -> BigDecimal {
    BigDecimal::from(12) / BigDecimal::from(100)
}

/// Cost of a single line.
///
/// Line costs arrive pre-computed from the backend; no unit-price times
/// quantity recomputation happens on this side for confirmed orders.
pub fn line_total(item: &LineItem) -> BigDecimal {
    item.line_cost.clone()
}

/// Sum of all line costs. Zero for an empty list.
pub fn subtotal(items: &[LineItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + &item.line_cost)
}

/// The VAT component of a tax-inclusive subtotal:
/// `subtotal - subtotal / (1 + vat_rate)`.
pub fn vat_portion(subtotal: &BigDecimal, vat_rate: &BigDecimal) -> BigDecimal {
    subtotal - subtotal / (BigDecimal::one() + vat_rate)
}

/// Subtotal plus delivery price.
pub fn grand_total(subtotal: &BigDecimal, delivery_price: &BigDecimal) -> BigDecimal {
    subtotal + delivery_price
}

/// Renders an amount with two decimal places and a currency suffix,
/// e.g. `175.30 kr`.
pub fn format_amount(amount: &BigDecimal, currency_suffix: &str) -> String {
    format!(
        "{} {}",
        amount.with_scale_round(2, RoundingMode::HalfUp),
        currency_suffix
    )
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use uuid::Uuid;

    use super::*;

    fn item(cost: &str) -> LineItem {
        LineItem {
            id: Uuid::new_v4(),
            amount_quantity: 1.0,
            unit: "st".to_string(),
            ingredient_name: "test".to_string(),
            line_cost: BigDecimal::from_str(cost).expect("valid decimal"),
            checked: false,
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn subtotal_of_empty_list_is_zero() {
        assert_eq!(subtotal(&[]), BigDecimal::zero());
    }

    #[test]
    fn subtotal_is_the_arithmetic_sum() {
        let items = vec![item("10.00"), item("0"), item("5.25"), item("0.75")];
        assert_eq!(subtotal(&items), dec("16.00"));
    }

    #[test]
    fn line_total_returns_cost_as_is() {
        let it = item("29.90");
        assert_eq!(line_total(&it), dec("29.90"));
    }

    #[test]
    fn grand_total_adds_delivery_price() {
        assert_eq!(grand_total(&dec("126.30"), &dec("49")), dec("175.30"));
        assert_eq!(grand_total(&dec("0"), &dec("0")), dec("0"));
    }

    #[test]
    fn example_order_totals() {
        // 29.90 + 45.50 + 12.00 + 38.90 = 126.30; + 49 delivery = 175.30
        let items = vec![item("29.90"), item("45.50"), item("12.00"), item("38.90")];
        let sub = subtotal(&items);
        assert_eq!(sub, dec("126.30"));
        assert_eq!(grand_total(&sub, &dec("49")), dec("175.30"));
    }

    #[test]
    fn vat_portion_extracts_the_inclusive_component() {
        // 112 at 12% inclusive VAT carries exactly 12 of tax.
        let portion = vat_portion(&dec("112"), &standard_vat_rate());
        assert_eq!(portion.with_scale_round(2, RoundingMode::HalfUp), dec("12.00"));
    }

    #[test]
    fn vat_portion_is_zero_for_zero_rate() {
        assert_eq!(
            vat_portion(&dec("100"), &BigDecimal::zero()),
            BigDecimal::zero()
        );
    }

    #[test]
    fn standard_rate_is_twelve_percent() {
        assert_eq!(standard_vat_rate(), dec("0.12"));
    }

    #[test]
    fn format_renders_two_decimals_and_suffix() {
        assert_eq!(format_amount(&dec("175.3"), "kr"), "175.30 kr");
        assert_eq!(format_amount(&dec("49"), "kr"), "49.00 kr");
        assert_eq!(format_amount(&dec("12.005"), "kr"), "12.01 kr");
    }
}

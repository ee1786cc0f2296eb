//! Line item pricing.

use catalog::{Product, Size, Topping};
use common::Money;

/// Clamps an untrusted requested quantity to the valid range `1..=u32::MAX`.
pub fn clamp_quantity(requested: i64) -> u32 {
    u32::try_from(requested.max(1)).unwrap_or(u32::MAX)
}

/// Price of a single unit: the base price scaled by the size multiplier
/// (rounded to whole centavos, half away from zero) plus every topping.
pub fn unit_price(product: &Product, size: &Size, toppings: &[Topping]) -> Money {
    let base = product.base_price.scale(size.price_multiplier);
    let extras: Money = toppings.iter().map(|topping| topping.price).sum();
    base + extras
}

/// Price of a whole line item. A quantity of zero is priced as one.
pub fn line_price(product: &Product, size: &Size, toppings: &[Topping], quantity: u32) -> Money {
    unit_price(product, size, toppings).multiply(quantity.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ProductCategory, ToppingCategory};
    use rust_decimal::Decimal;

    fn acai(base_cents: i64) -> Product {
        Product::new("1", "Açaí", Money::from_cents(base_cents), ProductCategory::Acai)
    }

    fn size(multiplier: Decimal) -> Size {
        Size::new("s", "Size", "500ml", multiplier)
    }

    fn topping(id: &str, cents: i64) -> Topping {
        Topping::new(id, id, Money::from_cents(cents), ToppingCategory::Fruits)
    }

    #[test]
    fn test_line_price_combines_multiplier_toppings_and_quantity() {
        let price = line_price(
            &acai(1200),
            &size(Decimal::new(15, 1)),
            &[topping("a", 200), topping("b", 150)],
            2,
        );
        assert_eq!(price, Money::from_cents(4300));
    }

    #[test]
    fn test_no_toppings_contribute_nothing() {
        let price = line_price(&acai(1000), &size(Decimal::ONE), &[], 1);
        assert_eq!(price, Money::from_cents(1000));
    }

    #[test]
    fn test_zero_quantity_priced_as_one() {
        let product = acai(1000);
        let size = size(Decimal::TWO);
        assert_eq!(
            line_price(&product, &size, &[], 0),
            line_price(&product, &size, &[], 1)
        );
    }

    #[test]
    fn test_fractional_centavo_rounds_half_away_from_zero() {
        // 12.55 × 1.5 = 18.825
        let price = unit_price(&acai(1255), &size(Decimal::new(15, 1)), &[]);
        assert_eq!(price, Money::from_cents(1883));

        // 12.33 × 1.5 = 18.495
        let price = unit_price(&acai(1233), &size(Decimal::new(15, 1)), &[]);
        assert_eq!(price, Money::from_cents(1850));
    }

    #[test]
    fn test_toppings_are_not_scaled_by_size() {
        let price = unit_price(&acai(1000), &size(Decimal::TWO), &[topping("a", 100)]);
        assert_eq!(price, Money::from_cents(2100));
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-7), 1);
        assert_eq!(clamp_quantity(3), 3);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }
}

use rust_decimal::dec;
use transfer_fares::{
    domain::{Amount, Coupon, FareBreakdown, FareInputs},
    engine::breakdown::breakdown,
};

#[test]
fn online_discount_only() {
    let result = breakdown(&FareInputs::new(100000).with_online_discount_rate(dec!(0.1)));

    assert_eq!(result.total, Amount::new(90000));
    assert_eq!(result.online_discount_value, Amount::new(10000));
    assert_eq!(result.taxes, Amount::ZERO);
}

#[test]
fn full_breakdown_with_every_discount_and_tax() {
    let inputs = FareInputs::new(50000)
        .with_extras(5000)
        .with_online_discount_rate(dec!(0.05))
        .with_coupon(Coupon::percentage(dec!(0.1)))
        .with_club_benefit(dec!(0.03))
        .with_tax_rate(dec!(0.19));

    let expected = FareBreakdown {
        subtotal: Amount::new(55000),
        base_fare: Amount::new(50000),
        extras_total: Amount::new(5000),
        online_discount_rate: dec!(0.05),
        online_discount_value: Amount::new(2750),
        coupon_value: Amount::new(5500),
        club_benefit_value: Amount::new(1650),
        total_discounts: Amount::new(9900),
        taxable_amount: Amount::new(45100),
        taxes: Amount::new(8569),
        total: Amount::new(53669),
    };

    assert_eq!(breakdown(&inputs), expected);
}

#[test]
fn flat_coupon_is_rounded_on_its_own() {
    let result = breakdown(&FareInputs::new(20000).with_coupon(Coupon::flat(dec!(2500.5))));

    assert_eq!(result.coupon_value, Amount::new(2501));
    assert_eq!(result.total, Amount::new(17499));
}

/// Discounts are additive and uncapped; the taxable amount floors at zero.
#[test]
fn discounts_exceeding_subtotal_floor_at_zero() {
    let inputs = FareInputs::new(10000)
        .with_online_discount_rate(dec!(0.5))
        .with_coupon(Coupon::flat(8000))
        .with_tax_rate(dec!(0.19));

    let result = breakdown(&inputs);

    assert_eq!(result.total_discounts, Amount::new(13000));
    assert_eq!(result.taxable_amount, Amount::ZERO);
    assert_eq!(result.taxes, Amount::ZERO);
    assert_eq!(result.total, Amount::ZERO);
}

/// Each step rounds independently: 333 * 0.5 = 166.5 -> 167 discount, then
/// 166 * 0.5 = 83 tax. A single final rounding would give 249.75 -> 250.
#[test]
fn rounding_happens_at_every_step() {
    let inputs = FareInputs::new(333)
        .with_online_discount_rate(dec!(0.5))
        .with_tax_rate(dec!(0.5));

    let result = breakdown(&inputs);

    assert_eq!(result.online_discount_value, Amount::new(167));
    assert_eq!(result.taxable_amount, Amount::new(166));
    assert_eq!(result.taxes, Amount::new(83));
    assert_eq!(result.total, Amount::new(249));
}

#[test]
fn zero_valued_coupon_contributes_nothing() {
    let result = breakdown(&FareInputs::new(30000).with_coupon(Coupon::percentage(dec!(0))));

    assert_eq!(result.coupon_value, Amount::ZERO);
    assert_eq!(result.total, Amount::new(30000));
}

#[test]
fn total_is_taxable_plus_taxes() {
    for base in [0, 1, 999, 15000, 123457] {
        let inputs = FareInputs::new(base)
            .with_extras(350)
            .with_online_discount_rate(dec!(0.07))
            .with_club_benefit(dec!(0.12))
            .with_tax_rate(dec!(0.19));
        let result = breakdown(&inputs);

        assert_eq!(result.total, result.taxable_amount + result.taxes);
        assert_eq!(
            result.taxable_amount,
            (result.subtotal - result.total_discounts).max(Amount::ZERO)
        );
    }
}

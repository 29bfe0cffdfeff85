//! Fare composition: subtotal, discounts, tax, total.
//!
//! Every derived amount is rounded to whole units on its own, before it feeds
//! the next step. Totals can therefore drift by a unit from a single
//! end-of-pipeline rounding; that is the accepted behavior.

use crate::domain::{
    Amount, Coupon, CouponKind, FareBreakdown, FareInputs, round_currency, scale_currency,
};

pub fn breakdown(inputs: &FareInputs) -> FareBreakdown {
    let subtotal = round_currency(inputs.base_fare.saturating_add(inputs.extras_total));

    let online_discount_value = scale_currency(subtotal, inputs.online_discount_rate);
    let coupon_value = inputs
        .coupon
        .map(|coupon| coupon_value(&coupon, subtotal))
        .unwrap_or_default();
    let club_benefit_value = inputs
        .club_benefit
        .map(|club| scale_currency(subtotal, club.discount_rate))
        .unwrap_or_default();

    // Discounts stack and are not capped; the taxable floor below absorbs any excess.
    let total_discounts = online_discount_value
        .saturating_add(coupon_value)
        .saturating_add(club_benefit_value);
    let taxable_amount = subtotal.saturating_sub(total_discounts).max(Amount::ZERO);
    let taxes = scale_currency(taxable_amount, inputs.tax_rate);
    let total = taxable_amount.saturating_add(taxes).max(Amount::ZERO);

    FareBreakdown {
        subtotal,
        base_fare: round_currency(inputs.base_fare),
        extras_total: round_currency(inputs.extras_total),
        online_discount_rate: inputs.online_discount_rate,
        online_discount_value,
        coupon_value,
        club_benefit_value,
        total_discounts,
        taxable_amount,
        taxes,
        total,
    }
}

fn coupon_value(coupon: &Coupon, subtotal: Amount) -> Amount {
    match coupon.kind {
        CouponKind::Percentage => scale_currency(subtotal, coupon.value),
        CouponKind::Flat => round_currency(coupon.value),
    }
}

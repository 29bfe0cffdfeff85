//! Discount code eligibility.

use chrono::NaiveDate;

use crate::{
    domain::{Amount, Coupon, CouponTerms},
    engine::errors::CouponRejection,
};

/// Checks `terms` against a booking and hands back the coupon to apply.
///
/// `amount` is the booking subtotal before discounts. A code restricted to
/// some destinations is rejected when the destination is unknown.
pub fn redeem(
    terms: &CouponTerms,
    destination: Option<&str>,
    amount: Amount,
    today: NaiveDate,
) -> Result<Coupon, CouponRejection> {
    if let Some(limit) = terms.usage_limit
        && terms.times_used >= limit
    {
        return Err(CouponRejection::Exhausted {
            limit,
            used: terms.times_used,
        });
    }
    if let Some(expires_on) = terms.expires_on
        && expires_on < today
    {
        return Err(CouponRejection::Expired(expires_on));
    }
    if !terms.destinations.is_empty()
        && !destination.is_some_and(|name| terms.destinations.iter().any(|d| d == name))
    {
        return Err(CouponRejection::NotApplicable(
            destination.unwrap_or("an unspecified destination").to_owned(),
        ));
    }
    if amount < terms.minimum_amount {
        return Err(CouponRejection::BelowMinimum {
            minimum: terms.minimum_amount,
            amount,
        });
    }
    Ok(terms.coupon)
}

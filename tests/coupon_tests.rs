use chrono::NaiveDate;
use rust_decimal::dec;
use transfer_fares::{
    domain::{Amount, Coupon, CouponTerms, FareInputs},
    engine::{breakdown::breakdown, coupon::redeem, errors::CouponRejection},
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn ten_percent() -> CouponTerms {
    CouponTerms::new(Coupon::percentage(dec!(0.1)))
}

#[test]
fn unrestricted_coupon_is_redeemed() {
    let coupon = redeem(&ten_percent(), None, Amount::new(1), date(2026, 1, 1));

    assert_eq!(coupon, Ok(Coupon::percentage(dec!(0.1))));
}

#[test]
fn exhausted_coupon_is_rejected() {
    let terms = ten_percent().with_usage(5, 5);

    assert_eq!(
        redeem(&terms, Some("Temuco"), Amount::new(50000), date(2026, 1, 1)),
        Err(CouponRejection::Exhausted { limit: 5, used: 5 })
    );
    assert!(redeem(&ten_percent().with_usage(5, 4), None, Amount::new(50000), date(2026, 1, 1)).is_ok());
}

/// The expiry date itself is still valid.
#[test]
fn coupon_expires_after_its_last_day() {
    let terms = ten_percent().with_expiry(date(2026, 3, 31));

    assert!(redeem(&terms, None, Amount::new(50000), date(2026, 3, 31)).is_ok());
    assert_eq!(
        redeem(&terms, None, Amount::new(50000), date(2026, 4, 1)),
        Err(CouponRejection::Expired(date(2026, 3, 31)))
    );
}

#[test]
fn coupon_restricted_to_other_destinations_is_rejected() {
    let terms = ten_percent().with_destinations(["Pucón", "Villarrica"]);

    assert!(redeem(&terms, Some("Pucón"), Amount::new(50000), date(2026, 1, 1)).is_ok());
    assert_eq!(
        redeem(&terms, Some("Temuco"), Amount::new(50000), date(2026, 1, 1)),
        Err(CouponRejection::NotApplicable("Temuco".to_owned()))
    );
    assert!(matches!(
        redeem(&terms, None, Amount::new(50000), date(2026, 1, 1)),
        Err(CouponRejection::NotApplicable(_))
    ));
}

#[test]
fn booking_below_minimum_is_rejected() {
    let terms = ten_percent().with_minimum_amount(Amount::new(30000));

    assert!(redeem(&terms, None, Amount::new(30000), date(2026, 1, 1)).is_ok());
    assert_eq!(
        redeem(&terms, None, Amount::new(29999), date(2026, 1, 1)),
        Err(CouponRejection::BelowMinimum {
            minimum: Amount::new(30000),
            amount: Amount::new(29999),
        })
    );
}

/// Usage is checked before expiry, as the booking form reports it.
#[test]
fn first_failing_condition_is_reported() {
    let terms = ten_percent()
        .with_usage(1, 1)
        .with_expiry(date(2025, 1, 1))
        .with_minimum_amount(Amount::new(1_000_000));

    assert!(matches!(
        redeem(&terms, None, Amount::new(10), date(2026, 1, 1)),
        Err(CouponRejection::Exhausted { .. })
    ));
}

#[test]
fn redeemed_coupon_feeds_the_breakdown() {
    let terms = CouponTerms::new(Coupon::flat(5000))
        .with_destinations(["Villarrica"])
        .with_minimum_amount(Amount::new(20000));
    let inputs = FareInputs::new(40000).with_extras(2000);

    let coupon = redeem(&terms, Some("Villarrica"), Amount::new(42000), date(2026, 6, 1)).unwrap();
    let result = breakdown(&inputs.with_coupon(coupon));

    assert_eq!(result.coupon_value, Amount::new(5000));
    assert_eq!(result.total, Amount::new(37000));
}

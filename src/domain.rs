//! Core domain types: amounts, destinations, quotes, fare breakdowns and leg payments.

use chrono::NaiveDate;
use derive_more::{Add, Display, From, Into, Sub};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// Whole currency units. The currency has no fractional subunits.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    From,
    Into,
    Add,
    Sub,
    Display,
)]
#[display("{_0}")]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }
    pub fn value(&self) -> i64 {
        self.0
    }
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }
    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        Decimal::from(amount.0)
    }
}

/// Rounds to whole currency units, halves away from zero.
///
/// Values outside the `i64` range saturate.
pub fn round_currency(value: Decimal) -> Amount {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let units = rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    });
    Amount(units)
}

/// `round_currency(amount * rate)`. A product past `Decimal`'s range saturates
/// in the direction of its sign.
pub fn scale_currency(amount: Amount, rate: Decimal) -> Amount {
    match Decimal::from(amount).checked_mul(rate) {
        Some(product) => round_currency(product),
        None if amount.is_positive() == rate.is_sign_positive() => Amount(i64::MAX),
        None => Amount(i64::MIN),
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DomainError {
    #[error("Base price must be positive, got {0}")]
    InvalidBasePrice(Decimal),
    #[error("Additional passenger percentage must not be negative, got {0}")]
    NegativeAdditionalPercentage(Decimal),
}

/// Price of one vehicle class at one destination.
///
/// `additional_percentage` is the fraction of `base` charged for every passenger
/// beyond the ones the base price already covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTier {
    base: Decimal,
    additional_percentage: Decimal,
}

impl PricingTier {
    pub fn new(base: Decimal, additional_percentage: Decimal) -> Result<Self, DomainError> {
        if base <= Decimal::ZERO {
            return Err(DomainError::InvalidBasePrice(base));
        }
        if additional_percentage < Decimal::ZERO {
            return Err(DomainError::NegativeAdditionalPercentage(
                additional_percentage,
            ));
        }
        Ok(Self {
            base,
            additional_percentage,
        })
    }
    pub fn base(&self) -> Decimal {
        self.base
    }
    pub fn additional_percentage(&self) -> Decimal {
        self.additional_percentage
    }
}

/// Per-vehicle-class pricing. Destinations that only take cars have no van tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestinationPricing {
    pub car: Option<PricingTier>,
    pub van: Option<PricingTier>,
}

/// Immutable reference data for a destination served by the company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    name: String,
    description: String,
    travel_time: String,
    pricing: DestinationPricing,
}

impl Destination {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        travel_time: impl Into<String>,
        pricing: DestinationPricing,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            travel_time: travel_time.into(),
            pricing,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn travel_time(&self) -> &str {
        &self.travel_time
    }
    pub fn pricing(&self) -> &DestinationPricing {
        &self.pricing
    }
}

/// Vehicle assigned to a party, decided by passenger count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum VehicleClass {
    #[display("private car")]
    #[serde(rename = "private car")]
    PrivateCar,
    #[display("passenger van")]
    #[serde(rename = "passenger van")]
    PassengerVan,
    /// Party too large for the fleet; the office has to confirm by hand.
    #[display("check availability")]
    #[serde(rename = "check availability")]
    CheckAvailability,
}

/// Result of quoting a destination. A missing price means "contact us".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quote {
    pub price: Option<Amount>,
    pub vehicle: Option<VehicleClass>,
}

impl Quote {
    /// Nothing could be quoted: unknown destination or invalid party size.
    pub fn unpriced() -> Self {
        Self::default()
    }
    /// A vehicle is known but the price has to be set manually.
    pub fn manual(vehicle: VehicleClass) -> Self {
        Self {
            price: None,
            vehicle: Some(vehicle),
        }
    }
    pub fn priced(vehicle: VehicleClass, price: Amount) -> Self {
        Self {
            price: Some(price),
            vehicle: Some(vehicle),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// `value` is a fraction of the subtotal.
    Percentage,
    /// `value` is a fixed amount in currency units.
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coupon {
    pub kind: CouponKind,
    pub value: Decimal,
}

impl Coupon {
    pub fn percentage(rate: Decimal) -> Self {
        Self {
            kind: CouponKind::Percentage,
            value: rate,
        }
    }
    pub fn flat(value: impl Into<Decimal>) -> Self {
        Self {
            kind: CouponKind::Flat,
            value: value.into(),
        }
    }
}

/// Conditions a discount code carries besides its value. The defaults impose
/// nothing: unlimited uses, no expiry, every destination, no minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTerms {
    pub coupon: Coupon,
    pub usage_limit: Option<u32>,
    pub times_used: u32,
    /// Last day the code can be redeemed.
    pub expires_on: Option<NaiveDate>,
    /// Empty means every destination.
    pub destinations: Vec<String>,
    pub minimum_amount: Amount,
}

impl CouponTerms {
    pub fn new(coupon: Coupon) -> Self {
        Self {
            coupon,
            usage_limit: None,
            times_used: 0,
            expires_on: None,
            destinations: Vec::new(),
            minimum_amount: Amount::ZERO,
        }
    }
    pub fn with_usage(mut self, limit: u32, times_used: u32) -> Self {
        self.usage_limit = Some(limit);
        self.times_used = times_used;
        self
    }
    pub fn with_expiry(mut self, expires_on: NaiveDate) -> Self {
        self.expires_on = Some(expires_on);
        self
    }
    pub fn with_destinations<S: Into<String>>(
        mut self,
        destinations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.destinations = destinations.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_minimum_amount(mut self, minimum_amount: Amount) -> Self {
        self.minimum_amount = minimum_amount;
        self
    }
}

/// Loyalty-club member discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubBenefit {
    pub discount_rate: Decimal,
}

/// Everything the fare composer needs. Rates are fractions (`0.1` is 10%).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareInputs {
    pub base_fare: Decimal,
    pub extras_total: Decimal,
    pub online_discount_rate: Decimal,
    pub coupon: Option<Coupon>,
    pub club_benefit: Option<ClubBenefit>,
    pub tax_rate: Decimal,
}

impl FareInputs {
    pub fn new(base_fare: impl Into<Decimal>) -> Self {
        Self {
            base_fare: base_fare.into(),
            extras_total: Decimal::ZERO,
            online_discount_rate: Decimal::ZERO,
            coupon: None,
            club_benefit: None,
            tax_rate: Decimal::ZERO,
        }
    }
    pub fn with_extras(mut self, extras_total: impl Into<Decimal>) -> Self {
        self.extras_total = extras_total.into();
        self
    }
    pub fn with_online_discount_rate(mut self, rate: Decimal) -> Self {
        self.online_discount_rate = rate;
        self
    }
    pub fn with_coupon(mut self, coupon: Coupon) -> Self {
        self.coupon = Some(coupon);
        self
    }
    pub fn with_club_benefit(mut self, discount_rate: Decimal) -> Self {
        self.club_benefit = Some(ClubBenefit { discount_rate });
        self
    }
    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }
}

/// Itemized fare. Invariants: `total = taxable_amount + taxes` and
/// `taxable_amount = max(subtotal - total_discounts, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FareBreakdown {
    pub subtotal: Amount,
    pub base_fare: Amount,
    pub extras_total: Amount,
    pub online_discount_rate: Decimal,
    pub online_discount_value: Amount,
    pub coupon_value: Amount,
    pub club_benefit_value: Amount,
    pub total_discounts: Amount,
    pub taxable_amount: Amount,
    pub taxes: Amount,
    pub total: Amount,
}

/// One directional segment of a linked round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    #[display("outbound")]
    Outbound,
    #[display("return")]
    Return,
}

/// How an incoming payment was split between the outbound and return legs.
/// The two parts always add up to the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentAllocation {
    pub outbound_allocated: Amount,
    pub return_allocated: Amount,
}

impl PaymentAllocation {
    pub fn total(&self) -> Amount {
        self.outbound_allocated
            .saturating_add(self.return_allocated)
    }
    pub fn for_leg(&self, leg: Leg) -> Amount {
        match leg {
            Leg::Outbound => self.outbound_allocated,
            Leg::Return => self.return_allocated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum LegPaymentState {
    /// Nothing paid.
    #[display("pending")]
    Pending,
    /// Something paid, but below the confirmation threshold.
    #[display("partial_insufficient")]
    PartialInsufficient,
    /// Threshold met; the leg is confirmed with a balance still due.
    #[display("confirmed_partial")]
    ConfirmedPartial,
    #[display("confirmed_paid")]
    ConfirmedPaid,
}

impl LegPaymentState {
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            LegPaymentState::ConfirmedPartial | LegPaymentState::ConfirmedPaid
        )
    }
}

/// Payment position of a single leg after an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegSettlement {
    pub leg: Leg,
    pub total: Amount,
    pub allocated: Amount,
    /// Never negative: overpayment does not produce credit.
    pub balance_due: Amount,
    pub state: LegPaymentState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTripSettlement {
    pub outbound: LegSettlement,
    pub r#return: LegSettlement,
}

impl RoundTripSettlement {
    pub fn legs(&self) -> [LegSettlement; 2] {
        [self.outbound, self.r#return]
    }
}

/// Suggested advance payment for a booking and what is left to pay after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepositSplit {
    pub amount: Amount,
    pub remainder: Amount,
}

/// A customer asking for a price: where to, and how many people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub destination: String,
    pub passengers: i64,
}

impl QuoteRequest {
    pub fn new(destination: impl Into<String>, passengers: i64) -> Self {
        Self {
            destination: destination.into(),
            passengers,
        }
    }
}

/// A request paired with the quote it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    pub request: QuoteRequest,
    pub quote: Quote,
}

//! Payment reconciliation for linked round trips.
//!
//! An incoming payment for a round trip is split between the outbound and
//! return legs in proportion to their totals, and each leg is then classified
//! against the confirmation threshold.

use rust_decimal::{Decimal, dec};

use crate::domain::{
    Amount, DepositSplit, Leg, LegPaymentState, LegSettlement, PaymentAllocation,
    RoundTripSettlement, scale_currency,
};

/// Fraction of a leg's total that has to be paid for the leg to be confirmed.
pub const CONFIRMATION_THRESHOLD: Decimal = dec!(0.4);

/// Splits `incoming` between the two legs. The return leg absorbs the rounding
/// remainder so the parts always add up to `incoming`.
pub fn allocate(incoming: Amount, outbound_total: Amount, return_total: Amount) -> PaymentAllocation {
    // Summed in Decimal: two i64 leg totals can overflow i64 but not Decimal.
    let combined = Decimal::from(outbound_total) + Decimal::from(return_total);
    if combined.is_zero() {
        return PaymentAllocation {
            outbound_allocated: incoming,
            return_allocated: Amount::ZERO,
        };
    }

    let outbound_factor = Decimal::from(outbound_total) / combined;
    let outbound_allocated = scale_currency(incoming, outbound_factor);
    PaymentAllocation {
        outbound_allocated,
        return_allocated: incoming.saturating_sub(outbound_allocated),
    }
}

pub fn classify(leg_total: Amount, allocated: Amount) -> LegPaymentState {
    let threshold = Decimal::from(leg_total) * CONFIRMATION_THRESHOLD;
    if leg_total.is_positive() && allocated >= leg_total {
        LegPaymentState::ConfirmedPaid
    } else if Decimal::from(allocated) >= threshold {
        LegPaymentState::ConfirmedPartial
    } else if allocated.is_positive() {
        LegPaymentState::PartialInsufficient
    } else {
        LegPaymentState::Pending
    }
}

pub fn settle(leg: Leg, total: Amount, allocated: Amount) -> LegSettlement {
    LegSettlement {
        leg,
        total,
        allocated,
        balance_due: total.saturating_sub(allocated).max(Amount::ZERO),
        state: classify(total, allocated),
    }
}

pub fn settle_round_trip(
    incoming: Amount,
    outbound_total: Amount,
    return_total: Amount,
) -> RoundTripSettlement {
    let allocation = allocate(incoming, outbound_total, return_total);
    RoundTripSettlement {
        outbound: settle(
            Leg::Outbound,
            outbound_total,
            allocation.for_leg(Leg::Outbound),
        ),
        r#return: settle(Leg::Return, return_total, allocation.for_leg(Leg::Return)),
    }
}

/// Advance payment for `total` at `fraction`, plus the remaining balance.
pub fn deposit(total: Amount, fraction: Decimal) -> DepositSplit {
    let amount = scale_currency(total, fraction);
    DepositSplit {
        amount,
        remainder: total.saturating_sub(amount).max(Amount::ZERO),
    }
}

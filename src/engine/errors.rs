use crate::domain::{Amount, DomainError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Destination {0} is listed more than once")]
    DuplicateDestination(String),
    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),
}

/// Why a discount code cannot be applied to a booking.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CouponRejection {
    #[error("Coupon has already been used {used} of {limit} times")]
    Exhausted { limit: u32, used: u32 },
    #[error("Coupon expired on {0}")]
    Expired(chrono::NaiveDate),
    #[error("Coupon does not apply to {0}")]
    NotApplicable(String),
    #[error("Coupon needs a booking of at least {minimum}, got {amount}")]
    BelowMinimum { minimum: Amount, amount: Amount },
}

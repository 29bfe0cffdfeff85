//! Tiered fare calculation: destination + party size -> vehicle and price.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Amount, Destination, PricingTier, Quote, VehicleClass, round_currency};

/// Destination name the booking form uses for "somewhere not in the catalog".
pub const OTHER_DESTINATION: &str = "Other";
/// Largest party a private car takes.
pub const MAX_CAR_PASSENGERS: i64 = 4;
/// Largest party a passenger van takes. Anything above needs a manual check.
pub const MAX_VAN_PASSENGERS: i64 = 7;

/// Quotes a trip. Never fails: anything that cannot be priced comes back as a
/// quote without price so the caller can show "contact us" instead.
pub fn quote(destination: Option<&Destination>, passenger_count: i64) -> Quote {
    let Some(destination) = destination else {
        return Quote::unpriced();
    };
    if destination.name() == OTHER_DESTINATION || passenger_count <= 0 {
        return Quote::unpriced();
    }

    let pricing = destination.pricing();
    let (vehicle, tier, covered) = if passenger_count <= MAX_CAR_PASSENGERS {
        (VehicleClass::PrivateCar, pricing.car, 1)
    } else if passenger_count <= MAX_VAN_PASSENGERS {
        (
            VehicleClass::PassengerVan,
            pricing.van,
            MAX_CAR_PASSENGERS + 1,
        )
    } else {
        return Quote::manual(VehicleClass::CheckAvailability);
    };

    let Some(tier) = tier else {
        debug!(
            "No {vehicle} pricing for {}, quoting manually",
            destination.name()
        );
        return Quote::manual(vehicle);
    };

    match tier_price(&tier, passenger_count - covered) {
        Some(price) => Quote::priced(vehicle, price),
        None => Quote::manual(vehicle),
    }
}

/// Base price plus the per-passenger surcharge for everyone not covered by it.
/// A zero price, or one too large to represent, is reported as no price.
fn tier_price(tier: &PricingTier, extra_passengers: i64) -> Option<Amount> {
    let extra = Decimal::from(extra_passengers.max(0));
    let surcharge = tier
        .base()
        .checked_mul(tier.additional_percentage())?
        .checked_mul(extra)?;
    let price = round_currency(tier.base().checked_add(surcharge)?);
    price.is_positive().then_some(price)
}

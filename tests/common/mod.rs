use rust_decimal::Decimal;
use transfer_fares::domain::{Destination, DestinationPricing, PricingTier};

pub fn tier(base: Decimal, additional_percentage: Decimal) -> PricingTier {
    PricingTier::new(base, additional_percentage).unwrap()
}

pub fn car_only(name: &str, base: Decimal, pct: Decimal) -> Destination {
    Destination::new(
        name,
        "",
        "",
        DestinationPricing {
            car: Some(tier(base, pct)),
            van: None,
        },
    )
}

pub fn car_and_van(
    name: &str,
    car: (Decimal, Decimal),
    van: (Decimal, Decimal),
) -> Destination {
    Destination::new(
        name,
        "",
        "",
        DestinationPricing {
            car: Some(tier(car.0, car.1)),
            van: Some(tier(van.0, van.1)),
        },
    )
}

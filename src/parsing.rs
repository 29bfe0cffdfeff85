//! CSV deserialization.
//!
//! Catalog rows are parsed in two stages:
//! 1. Serde deserializes each CSV row into a flat `CsvDestination`.
//! 2. `TryFrom<CsvDestination>` converts it into the domain `Destination`,
//!    validating the pricing tiers.
//!
//! Malformed rows are logged and skipped, for catalogs and quote requests alike.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Destination, DestinationPricing, DomainError, PricingTier, QuoteRequest};

/// Flat representation of a catalog row. A vehicle class is offered when both
/// of its columns are filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CsvDestination {
    name: String,
    description: String,
    travel_time: String,
    car_base: Option<Decimal>,
    car_additional_percentage: Option<Decimal>,
    van_base: Option<Decimal>,
    van_additional_percentage: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CsvQuoteRequest {
    destination: String,
    passengers: i64,
}

/// Returns an iterator that lazily deserializes catalog rows into destinations,
/// skipping any rows that fail to parse or validate.
pub fn deserialize_catalog<D: std::io::Read>(
    reader: &mut csv::Reader<D>,
) -> impl Iterator<Item = Destination> {
    reader
        .deserialize::<CsvDestination>()
        .filter_map(|result| match result {
            Ok(row) => Some(row),
            Err(e) => {
                warn!("Failed to parse destination: {e}");
                None
            }
        })
        .filter_map(|row| match Destination::try_from(row) {
            Ok(destination) => Some(destination),
            Err(e) => {
                warn!("Failed to convert CsvDestination to Destination: {e}");
                None
            }
        })
}

pub fn deserialize_requests<D: std::io::Read>(
    reader: &mut csv::Reader<D>,
) -> impl Iterator<Item = QuoteRequest> {
    reader
        .deserialize::<CsvQuoteRequest>()
        .filter_map(|result| match result {
            Ok(row) => Some(QuoteRequest::new(row.destination, row.passengers)),
            Err(e) => {
                warn!("Failed to parse quote request: {e}");
                None
            }
        })
}

#[derive(Debug, thiserror::Error)]
enum IntoDestinationError {
    #[error("{destination}: {vehicle} pricing needs both a base and an additional percentage")]
    IncompleteTier {
        destination: String,
        vehicle: &'static str,
    },
    #[error("{destination}: {source}")]
    InvalidTier {
        destination: String,
        source: DomainError,
    },
}

fn tier(
    destination: &str,
    vehicle: &'static str,
    base: Option<Decimal>,
    additional_percentage: Option<Decimal>,
) -> Result<Option<PricingTier>, IntoDestinationError> {
    match (base, additional_percentage) {
        (None, None) => Ok(None),
        (Some(base), Some(pct)) => PricingTier::new(base, pct).map(Some).map_err(|source| {
            IntoDestinationError::InvalidTier {
                destination: destination.to_owned(),
                source,
            }
        }),
        _ => Err(IntoDestinationError::IncompleteTier {
            destination: destination.to_owned(),
            vehicle,
        }),
    }
}

impl TryFrom<CsvDestination> for Destination {
    type Error = IntoDestinationError;

    fn try_from(value: CsvDestination) -> Result<Self, Self::Error> {
        let pricing = DestinationPricing {
            car: tier(
                &value.name,
                "car",
                value.car_base,
                value.car_additional_percentage,
            )?,
            van: tier(
                &value.name,
                "van",
                value.van_base,
                value.van_additional_percentage,
            )?,
        };
        Ok(Destination::new(
            value.name,
            value.description,
            value.travel_time,
            pricing,
        ))
    }
}

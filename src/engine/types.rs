use std::collections::HashMap;

use rust_decimal::dec;

use crate::{
    domain::{Destination, DestinationPricing, PricingTier},
    engine::errors::EngineError,
};

/// Destinations keyed by name. Built once and read-only afterwards.
#[derive(Debug, Default)]
pub struct Catalog(HashMap<String, Destination>);

impl Catalog {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Fails on the first name that appears twice, since quoting would otherwise
    /// depend on row order.
    pub fn from_destinations(
        destinations: impl IntoIterator<Item = Destination>,
    ) -> Result<Self, EngineError> {
        let mut catalog = Self::new();
        for destination in destinations {
            catalog.insert(destination)?;
        }
        Ok(catalog)
    }

    /// The destinations served out of Temuco airport.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_destinations([
            Destination::new(
                "Temuco",
                "Commercial and administrative centre of La Araucanía.",
                "45 min",
                DestinationPricing {
                    car: Some(PricingTier::new(dec!(15000), dec!(0.1))?),
                    van: None,
                },
            ),
            Destination::new(
                "Villarrica",
                "Tourism and nature by the lake.",
                "1h 15min",
                DestinationPricing {
                    car: Some(PricingTier::new(dec!(40000), dec!(0.05))?),
                    van: Some(PricingTier::new(dec!(200000), dec!(0.05))?),
                },
            ),
            Destination::new(
                "Pucón",
                "Adventure, hot springs and the volcano.",
                "1h 30min",
                DestinationPricing {
                    car: Some(PricingTier::new(dec!(50000), dec!(0.05))?),
                    van: Some(PricingTier::new(dec!(250000), dec!(0.05))?),
                },
            ),
        ])
    }

    pub fn insert(&mut self, destination: Destination) -> Result<(), EngineError> {
        if self.0.contains_key(destination.name()) {
            return Err(EngineError::DuplicateDestination(
                destination.name().to_owned(),
            ));
        }
        self.0.insert(destination.name().to_owned(), destination);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Destination> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &HashMap<String, Destination> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

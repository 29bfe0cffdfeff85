//! Fare engine.
//!
//! Owns the destination catalog and answers quote requests by name. The pricing,
//! composition and payment-split rules themselves are pure functions in the
//! submodules and can be used without an engine.

use tracing::warn;

use crate::domain::{Quote, QuoteLine, QuoteRequest};
pub use types::Catalog;

pub mod breakdown;
pub mod coupon;
pub mod errors;
pub mod fare;
pub mod split;
mod types;

pub struct FareEngine {
    catalog: Catalog,
}

impl FareEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Unknown destinations are not an error: they get the unpriced quote.
    pub fn quote(&self, destination: &str, passengers: i64) -> Quote {
        let found = self.catalog.get(destination);
        if found.is_none() && destination != fare::OTHER_DESTINATION {
            warn!("Destination {destination} is not in the catalog");
        }
        fare::quote(found, passengers)
    }

    pub fn quote_requests<'a>(
        &'a self,
        requests: impl Iterator<Item = QuoteRequest> + 'a,
    ) -> impl Iterator<Item = QuoteLine> + 'a {
        requests.map(|request| {
            let quote = self.quote(&request.destination, request.passengers);
            QuoteLine { request, quote }
        })
    }
}

//! Serializes the catalog, quotes, fare breakdowns, settlements and deposits to CSV.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    domain::{Amount, DepositSplit, FareBreakdown, LegSettlement, QuoteLine, VehicleClass},
    engine::Catalog,
};

/// Same columns the catalog parser reads, so the output can be edited and fed back.
#[derive(Debug, Serialize)]
struct DestinationCsv<'a> {
    name: &'a str,
    description: &'a str,
    travel_time: &'a str,
    car_base: Option<Decimal>,
    car_additional_percentage: Option<Decimal>,
    van_base: Option<Decimal>,
    van_additional_percentage: Option<Decimal>,
}

/// Columns: destination, passengers, vehicle, price. Unpriced quotes leave
/// `price` (and possibly `vehicle`) empty.
#[derive(Debug, Serialize)]
struct QuoteCsv<'a> {
    destination: &'a str,
    passengers: i64,
    vehicle: Option<VehicleClass>,
    price: Option<Amount>,
}

#[derive(Debug, Serialize)]
struct DepositCsv {
    total: Amount,
    amount: Amount,
    remainder: Amount,
}

/// Destinations are written sorted by name.
pub fn write_catalog(catalog: &Catalog, writer: impl std::io::Write) -> anyhow::Result<()> {
    let mut destinations = catalog.as_map().values().collect::<Vec<_>>();
    destinations.sort_by(|a, b| a.name().cmp(b.name()));

    let mut wtr = csv::Writer::from_writer(writer);
    for destination in destinations {
        let pricing = destination.pricing();
        wtr.serialize(DestinationCsv {
            name: destination.name(),
            description: destination.description(),
            travel_time: destination.travel_time(),
            car_base: pricing.car.map(|tier| tier.base()),
            car_additional_percentage: pricing.car.map(|tier| tier.additional_percentage()),
            van_base: pricing.van.map(|tier| tier.base()),
            van_additional_percentage: pricing.van.map(|tier| tier.additional_percentage()),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_quotes(
    lines: impl IntoIterator<Item = QuoteLine>,
    writer: impl std::io::Write,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for line in lines {
        wtr.serialize(QuoteCsv {
            destination: &line.request.destination,
            passengers: line.request.passengers,
            vehicle: line.quote.vehicle,
            price: line.quote.price,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_breakdown(
    breakdown: &FareBreakdown,
    writer: impl std::io::Write,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.serialize(breakdown)?;
    wtr.flush()?;
    Ok(())
}

pub fn write_settlements(
    settlements: &[LegSettlement],
    writer: impl std::io::Write,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for settlement in settlements {
        wtr.serialize(settlement)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_deposit(
    total: Amount,
    deposit: &DepositSplit,
    writer: impl std::io::Write,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.serialize(DepositCsv {
        total,
        amount: deposit.amount,
        remainder: deposit.remainder,
    })?;
    wtr.flush()?;
    Ok(())
}

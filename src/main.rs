use std::fs::File;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use transfer_fares::domain::{Amount, Coupon, CouponTerms, FareInputs, round_currency};
use transfer_fares::engine::{Catalog, FareEngine, breakdown, coupon, split};
use transfer_fares::output;
use transfer_fares::parsing;

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    if let Some(log_level) = args.log_level {
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();
    }

    let stdout = std::io::stdout();
    match args.command {
        Command::Destinations { catalog } => {
            output::write_catalog(&open_catalog(catalog)?, stdout)?;
        }
        Command::Quote { requests, catalog } => {
            let engine = FareEngine::new(open_catalog(catalog)?);

            let file = File::open(&requests).with_context(|| format!("opening {requests}"))?;
            let mut rdr = reader(file);
            let lines = engine.quote_requests(parsing::deserialize_requests(&mut rdr));
            output::write_quotes(lines, stdout)?;
        }
        Command::Breakdown {
            base_fare,
            extras,
            online_discount_rate,
            coupon: coupon_args,
            club_discount_rate,
            tax_rate,
        } => {
            let mut inputs = FareInputs::new(base_fare)
                .with_extras(extras)
                .with_online_discount_rate(online_discount_rate)
                .with_tax_rate(tax_rate);
            if let Some(terms) = coupon_args.terms() {
                let subtotal = round_currency(base_fare.saturating_add(extras));
                let today = chrono::Local::now().date_naive();
                let destination = coupon_args.destination.as_deref();
                let redeemed = coupon::redeem(&terms, destination, subtotal, today)?;
                inputs = inputs.with_coupon(redeemed);
            }
            if let Some(rate) = club_discount_rate {
                inputs = inputs.with_club_benefit(rate);
            }
            output::write_breakdown(&breakdown::breakdown(&inputs), stdout)?;
        }
        Command::Allocate {
            payment,
            outbound_total,
            return_total,
        } => {
            let settlement = split::settle_round_trip(
                payment.into(),
                outbound_total.into(),
                return_total.into(),
            );
            output::write_settlements(&settlement.legs(), stdout)?;
        }
        Command::Deposit { total, fraction } => {
            let total = Amount::from(total);
            output::write_deposit(total, &split::deposit(total, fraction), stdout)?;
        }
    }
    Ok(())
}

fn reader(file: File) -> csv::Reader<File> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file)
}

fn open_catalog(path: Option<String>) -> anyhow::Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin()?);
    };
    let file = File::open(&path).with_context(|| format!("opening catalog {path}"))?;
    let mut rdr = reader(file);
    let catalog = Catalog::from_destinations(parsing::deserialize_catalog(&mut rdr))?;
    if catalog.is_empty() {
        anyhow::bail!("catalog {path} has no usable destinations");
    }
    Ok(catalog)
}

#[derive(Parser)]
struct Arguments {
    #[command(subcommand)]
    command: Command,
    #[arg(long, global = true)]
    log_level: Option<tracing::Level>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the destination catalog as CSV.
    Destinations {
        /// Destination catalog CSV. Defaults to the built-in destinations.
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Quote every `destination,passengers` row of a CSV file.
    Quote {
        requests: String,
        /// Destination catalog CSV. Defaults to the built-in destinations.
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Itemize a fare with discounts and tax.
    Breakdown {
        #[arg(long)]
        base_fare: Decimal,
        #[arg(long, default_value_t = Decimal::ZERO)]
        extras: Decimal,
        #[arg(long, default_value_t = Decimal::ZERO)]
        online_discount_rate: Decimal,
        #[command(flatten)]
        coupon: CouponArgs,
        #[arg(long)]
        club_discount_rate: Option<Decimal>,
        #[arg(long, default_value_t = Decimal::ZERO)]
        tax_rate: Decimal,
    },
    /// Split a round-trip payment between its legs and report each leg's state.
    Allocate {
        payment: i64,
        outbound_total: i64,
        return_total: i64,
    },
    /// Suggested advance payment for a total.
    Deposit {
        total: i64,
        #[arg(long, default_value_t = split::CONFIRMATION_THRESHOLD)]
        fraction: Decimal,
    },
}

/// A discount code and the conditions it was issued with.
#[derive(Args)]
struct CouponArgs {
    #[arg(long, conflicts_with = "coupon_flat")]
    coupon_percentage: Option<Decimal>,
    #[arg(long)]
    coupon_flat: Option<Decimal>,
    #[arg(long)]
    coupon_usage_limit: Option<u32>,
    #[arg(long)]
    coupon_times_used: Option<u32>,
    #[arg(long)]
    coupon_expires_on: Option<NaiveDate>,
    /// Repeat for every destination the code is valid for.
    #[arg(long)]
    coupon_destination: Vec<String>,
    #[arg(long)]
    coupon_minimum: Option<i64>,
    /// Destination being booked, checked against `--coupon-destination`.
    #[arg(long)]
    destination: Option<String>,
}

impl CouponArgs {
    fn terms(&self) -> Option<CouponTerms> {
        let coupon = match (self.coupon_percentage, self.coupon_flat) {
            (Some(rate), _) => Coupon::percentage(rate),
            (None, Some(value)) => Coupon::flat(value),
            (None, None) => return None,
        };
        let mut terms = CouponTerms::new(coupon).with_destinations(self.coupon_destination.clone());
        if let Some(limit) = self.coupon_usage_limit {
            terms = terms.with_usage(limit, self.coupon_times_used.unwrap_or_default());
        }
        if let Some(expires_on) = self.coupon_expires_on {
            terms = terms.with_expiry(expires_on);
        }
        if let Some(minimum) = self.coupon_minimum {
            terms = terms.with_minimum_amount(minimum.into());
        }
        Some(terms)
    }
}

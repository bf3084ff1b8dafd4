//! Voyage trip planner CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use voyage::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "voyage", about = "Plan a trip across European capitals", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: PlannerConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List capitals not on the route, optionally filtered by city name
    Capitals {
        /// Part of a city name
        query: Option<String>,
    },

    /// Append capitals to the route
    Add {
        /// Capital ids, in visit order
        #[arg(required = true)]
        ids: Vec<DestinationId>,
    },

    /// Remove a capital and everything chosen for it
    Remove {
        /// Capital id
        id: DestinationId,
    },

    /// Replace the visit order
    Reorder {
        /// Capital ids, in the new visit order
        #[arg(required = true)]
        ids: Vec<DestinationId>,
    },

    /// Set the start date and stay lengths
    Schedule {
        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Days to spend in a capital
        #[arg(long = "days", value_name = "ID=DAYS", value_parser = parse_stay)]
        days: Vec<(DestinationId, u32)>,
    },

    /// List flights for every leg, optionally choosing some
    Flights {
        /// Flight to choose for a segment
        #[arg(long = "select", value_name = "SEGMENT=OPTION", value_parser = parse_flight_pick)]
        select: Vec<(SegmentKey, usize)>,
    },

    /// List hotels in a capital on the route, optionally choosing one
    Hotels {
        /// Capital id
        city: DestinationId,

        /// Hotel to stay at
        #[arg(long)]
        select: Option<HotelId>,
    },

    /// List attractions in a capital on the route, optionally picking some
    Attractions {
        /// Capital id
        city: DestinationId,

        /// Attraction to pick, or unpick if already picked
        #[arg(long)]
        toggle: Vec<AttractionId>,
    },

    /// Show Budget, Comfort and Premium suggestions for the route
    Suggest {
        /// Take over a suggestion's choices
        #[arg(long, value_enum)]
        apply: Option<SuggestionTier>,
    },

    /// Show the trip, its dates, prices and what is still missing
    Show,

    /// Book the trip
    Confirm,

    /// Start over with an empty trip
    Reset,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("unknown capital: {0}")]
    UnknownCapital(DestinationId),

    #[error("capital {0} is not on the route")]
    NotOnRoute(DestinationId),

    #[error("{key} has no flight option {option}")]
    UnknownFlight { key: SegmentKey, option: usize },

    #[error("capital {city} has no hotel {hotel}")]
    UnknownHotel { city: DestinationId, hotel: HotelId },

    #[error("capital {city} has no attraction {attraction}")]
    UnknownAttraction {
        city: DestinationId,
        attraction: AttractionId,
    },

    #[error("add destinations before asking for suggestions")]
    EmptyRoute,

    #[error("trip is not ready to confirm: {}", join_gaps(.0))]
    NotReady(Vec<Gap>),
}

type FileTrip = Trip<FileStore>;

#[expect(
    clippy::print_stderr,
    reason = "errors are reported on stderr before exiting."
)]
fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    cli.config.logging.init()?;

    let currency = cli.config.currency()?;
    let catalog = cli.config.catalog()?;

    if let Some(quoted) = catalog.currency()
        && quoted != currency
    {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            quoted.iso_alpha_code.to_string(),
        )
        .into());
    }

    let mut trip = Trip::restore_from(cli.config.store(), cli.config.snapshot_key.clone(), currency);
    let mut offers = OfferCache::new();
    let mut out = io::stdout().lock();

    debug!(command = ?cli.command, "running command");

    match cli.command {
        Command::Capitals { query } => list_capitals(&mut out, &trip, &catalog, query.as_deref()),
        Command::Add { ids } => add(&mut out, &mut trip, &catalog, ids),
        Command::Remove { id } => remove(&mut out, &mut trip, id),
        Command::Reorder { ids } => reorder(&mut out, &mut trip, &catalog, ids),
        Command::Schedule { start, days } => schedule(&mut out, &mut trip, start, days),
        Command::Flights { select } => flights(&mut out, &mut trip, &catalog, &mut offers, select),
        Command::Hotels { city, select } => hotels(&mut out, &mut trip, &catalog, city, select),
        Command::Attractions { city, toggle } => {
            attractions(&mut out, &mut trip, &catalog, city, toggle)
        }
        Command::Suggest { apply } => suggest(&mut out, &mut trip, &catalog, &mut offers, apply),
        Command::Show => show(&mut out, &trip),
        Command::Confirm => confirm(&mut out, &trip, &catalog),
        Command::Reset => {
            trip.reset_trip();
            writeln!(out, "trip cleared")?;
            Ok(())
        }
    }
}

fn list_capitals(
    out: &mut impl Write,
    trip: &FileTrip,
    catalog: &FixtureCatalog,
    query: Option<&str>,
) -> Result<(), CliError> {
    let capitals = catalog.capitals()?;
    let selected = trip.state().destinations();

    let matches: Vec<&Destination> = match query {
        Some(query) => search_capitals(&capitals, query, selected),
        None => capitals
            .iter()
            .filter(|capital| !trip.state().contains(capital.id))
            .collect(),
    };

    for capital in matches {
        writeln!(out, "{:>4}  {}, {}", capital.id, capital.city, capital.country)?;
    }

    Ok(())
}

fn add(
    out: &mut impl Write,
    trip: &mut FileTrip,
    catalog: &FixtureCatalog,
    ids: Vec<DestinationId>,
) -> Result<(), CliError> {
    let capitals = catalog.capitals()?;

    trip.ensure_origin(Origin::fallback());

    for id in ids {
        let capital = capitals
            .iter()
            .find(|capital| capital.id == id)
            .ok_or(CliError::UnknownCapital(id))?;

        if trip.add_destination(capital.clone()) {
            writeln!(out, "added {}", capital.city)?;
        } else {
            writeln!(out, "{} is already on the route", capital.city)?;
        }
    }

    write_route(out, trip.state())
}

fn remove(out: &mut impl Write, trip: &mut FileTrip, id: DestinationId) -> Result<(), CliError> {
    if trip.remove_destination(id) {
        writeln!(out, "removed {id}; flight choices were cleared")?;
    } else {
        writeln!(out, "capital {id} is not on the route; nothing changed")?;
    }

    write_route(out, trip.state())
}

fn reorder(
    out: &mut impl Write,
    trip: &mut FileTrip,
    catalog: &FixtureCatalog,
    ids: Vec<DestinationId>,
) -> Result<(), CliError> {
    let capitals = catalog.capitals()?;

    let order = ids
        .into_iter()
        .map(|id| {
            trip.state()
                .destinations()
                .iter()
                .chain(&capitals)
                .find(|destination| destination.id == id)
                .cloned()
                .ok_or(CliError::UnknownCapital(id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    trip.reorder_destinations(order);

    writeln!(out, "route reordered; flight choices were cleared")?;
    write_route(out, trip.state())
}

fn schedule(
    out: &mut impl Write,
    trip: &mut FileTrip,
    start: Option<String>,
    days: Vec<(DestinationId, u32)>,
) -> Result<(), CliError> {
    if let Some(start) = start {
        trip.set_start_date(start);
    }

    for (id, days) in days {
        if !trip.state().contains(id) {
            return Err(CliError::NotOnRoute(id));
        }

        trip.set_duration(id, days);
    }

    write_itinerary(out, trip.state())
}

fn flights(
    out: &mut impl Write,
    trip: &mut FileTrip,
    catalog: &FixtureCatalog,
    cache: &mut OfferCache,
    select: Vec<(SegmentKey, usize)>,
) -> Result<(), CliError> {
    let offers = load_offers(trip, catalog, cache)?;

    for (key, option) in select {
        let chosen = offers
            .segments
            .get(key.ordinal())
            .and_then(|segment| segment.options.get(option))
            .ok_or(CliError::UnknownFlight { key, option })?;

        trip.select_flight(key, chosen.clone());
    }

    for (ordinal, segment) in offers.segments.iter().enumerate() {
        let key = SegmentKey::new(ordinal);
        let selected = trip.state().selected_flights().get(&key);

        writeln!(out, "{key}: {} → {}", segment.from, segment.to)?;

        for (index, option) in segment.options.iter().enumerate() {
            let marker = if selected == Some(option) { '*' } else { ' ' };

            writeln!(
                out,
                "  {marker} [{index}] {}  {}",
                option.departure,
                option.price.to_money(trip.currency())
            )?;
        }
    }

    Ok(())
}

fn hotels(
    out: &mut impl Write,
    trip: &mut FileTrip,
    catalog: &FixtureCatalog,
    city: DestinationId,
    select: Option<HotelId>,
) -> Result<(), CliError> {
    if !trip.state().contains(city) {
        return Err(CliError::NotOnRoute(city));
    }

    let hotels = catalog.hotels(city)?;

    if let Some(hotel) = select {
        let chosen = hotels
            .iter()
            .find(|candidate| candidate.id == hotel)
            .ok_or(CliError::UnknownHotel { city, hotel })?;

        trip.select_hotel(city, chosen.clone());
    }

    let selected = trip.state().selected_hotels().get(&city).map(|hotel| hotel.id);

    for hotel in &hotels {
        let marker = if selected == Some(hotel.id) { '*' } else { ' ' };

        writeln!(
            out,
            "{marker} {:>4}  {:<32} {:>3.1}★  {} / night",
            hotel.id,
            hotel.name,
            hotel.rating,
            hotel.price_per_night.to_money(trip.currency())
        )?;
    }

    Ok(())
}

fn attractions(
    out: &mut impl Write,
    trip: &mut FileTrip,
    catalog: &FixtureCatalog,
    city: DestinationId,
    toggle: Vec<AttractionId>,
) -> Result<(), CliError> {
    if !trip.state().contains(city) {
        return Err(CliError::NotOnRoute(city));
    }

    let attractions = catalog.attractions(city)?;

    for attraction in toggle {
        let picked = attractions
            .iter()
            .find(|candidate| candidate.id == attraction)
            .ok_or(CliError::UnknownAttraction { city, attraction })?;

        trip.select_attraction(city, picked.clone());
    }

    let selected = trip.state().selected_attractions().get(&city);

    for attraction in &attractions {
        let marker = if selected.is_some_and(|list| list.contains(attraction.id)) {
            '*'
        } else {
            ' '
        };

        writeln!(
            out,
            "{marker} {:>4}  {:<32} {:<10} {}",
            attraction.id,
            attraction.name,
            attraction.category,
            attraction.price.to_money(trip.currency())
        )?;
    }

    Ok(())
}

fn suggest(
    out: &mut impl Write,
    trip: &mut FileTrip,
    catalog: &FixtureCatalog,
    cache: &mut OfferCache,
    apply: Option<SuggestionTier>,
) -> Result<(), CliError> {
    if trip.state().destinations().is_empty() {
        return Err(CliError::EmptyRoute);
    }

    let offers = load_offers(trip, catalog, cache)?;
    let suggestions = SuggestionBuilder::new(trip.state().destinations(), &offers)
        .start_date(trip.state().start_date())
        .build_for_today();

    write_suggestions(&mut *out, &suggestions, trip.currency())?;

    if let Some(tier) = apply
        && let Some(suggestion) = suggestions.into_iter().find(|s| s.tier() == tier)
    {
        trip.apply_suggestion(suggestion);
        writeln!(out, "applied the {tier} suggestion")?;
        write_itinerary(out, trip.state())?;
    }

    Ok(())
}

fn show(out: &mut impl Write, trip: &FileTrip) -> Result<(), CliError> {
    write_route(out, trip.state())?;
    write_itinerary(out, trip.state())?;

    TripSummary::new(trip.state(), trip.currency()).write_to(&mut *out)?;

    let gaps = readiness::all_gaps(trip.state());

    if gaps.is_empty() {
        writeln!(out, "ready to confirm")?;
    } else {
        writeln!(out, "still missing:")?;

        for gap in gaps {
            writeln!(out, "  - {gap}")?;
        }
    }

    Ok(())
}

fn confirm(out: &mut impl Write, trip: &FileTrip, catalog: &FixtureCatalog) -> Result<(), CliError> {
    let gaps = readiness::all_gaps(trip.state());

    if !gaps.is_empty() {
        return Err(CliError::NotReady(gaps));
    }

    let confirmation = catalog.confirm_trip(trip.state().total_price())?;

    writeln!(
        out,
        "trip confirmed: booking #{} for {}",
        confirmation.id,
        confirmation.total.to_money(trip.currency())
    )?;

    Ok(())
}

fn load_offers(
    trip: &FileTrip,
    catalog: &FixtureCatalog,
    cache: &mut OfferCache,
) -> Result<TripOffers, CliError> {
    let origin = trip.state().origin().cloned().unwrap_or_else(Origin::fallback);

    Ok(cache
        .load(catalog, &origin, trip.state().destinations())?
        .clone())
}

fn write_route(out: &mut impl Write, state: &TripState) -> Result<(), CliError> {
    let origin = state.origin().map_or("?", |origin| origin.city.as_str());
    let stops: Vec<&str> = state
        .destinations()
        .iter()
        .map(|destination| destination.city.as_str())
        .collect();

    if stops.is_empty() {
        writeln!(out, "route: {origin} (no destinations)")?;
    } else {
        writeln!(out, "route: {origin} → {} → {origin}", stops.join(" → "))?;
    }

    Ok(())
}

fn write_itinerary(out: &mut impl Write, state: &TripState) -> Result<(), CliError> {
    match Itinerary::from_state(state) {
        Ok(itinerary) => {
            for stop in itinerary.stops() {
                writeln!(
                    out,
                    "  {:<20} {} → {} ({} days)",
                    stop.destination.city, stop.arrival, stop.departure, stop.days
                )?;
            }
        }
        Err(error) => writeln!(out, "  no dates yet: {error}")?,
    }

    Ok(())
}

fn join_gaps(gaps: &[Gap]) -> String {
    gaps.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_stay(value: &str) -> Result<(DestinationId, u32), String> {
    let (id, days) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=DAYS, got {value}"))?;

    let id = id.parse().map_err(|error| format!("invalid capital id {id}: {error}"))?;
    let days = days
        .trim()
        .parse()
        .map_err(|error| format!("invalid day count {days}: {error}"))?;

    Ok((id, days))
}

fn parse_flight_pick(value: &str) -> Result<(SegmentKey, usize), String> {
    let (key, option) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SEGMENT=OPTION, got {value}"))?;

    let key = key.trim().parse().map_err(|error| format!("{error}"))?;
    let option = option
        .trim()
        .parse()
        .map_err(|error| format!("invalid option index {option}: {error}"))?;

    Ok((key, option))
}

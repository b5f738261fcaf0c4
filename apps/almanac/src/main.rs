mod report;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::path::PathBuf;
use urania::aspects::{AspectCalculator, AspectContext, AspectType};
use urania::cadence::AspectCadence;
use urania::ephemeris::{AnalyticEphemeris, EphemerisBackend};
use urania::western::{angles, FirstHouseReference, HouseCalculator};
use urania::{
    Body, BodyFilter, ChartBuilder, EventDetector, GeoLocation, GeoPositionProvider,
    TransitCalendar,
};
use urania_config::{load_settings, BackendKind, EphemerisSettings, UraniaSettings};

use report::{AspectEntry, ChartReport};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Format {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Astrological charts, aspects and transit events")]
struct Args {
    /// Config file (default: configs/urania.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    /// Observer latitude, overriding [location].
    #[arg(long, global = true, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude (east-positive), overriding [location].
    #[arg(long, global = true, allow_hyphen_values = true)]
    lon: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Body positions, angles and houses for one instant.
    Chart {
        /// RFC 3339 instant or `now`.
        #[arg(long, default_value = "now", value_parser = parse_instant)]
        at: DateTime<Utc>,

        /// all, inner, outer, nodes, or a single body name.
        #[arg(long, default_value = "all")]
        filter: BodyFilter,
    },
    /// Aspects among transits, or from transits to a natal chart.
    Aspects {
        #[arg(long, default_value = "now", value_parser = parse_instant)]
        at: DateTime<Utc>,

        /// Natal instant; switches to natal-to-transit aspects.
        #[arg(long, value_parser = parse_instant)]
        natal: Option<DateTime<Utc>>,

        /// Also aspect the natal midpoints (requires --natal).
        #[arg(long)]
        midpoints: bool,

        #[arg(long, default_value = "all")]
        filter: BodyFilter,
    },
    /// Lunations, eclipses, ingresses and stations on one day.
    Events {
        /// Day as YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,

        /// Tag events with the houses of the chart at this instant.
        #[arg(long, value_parser = parse_instant)]
        natal: Option<DateTime<Utc>>,
    },
    /// Events over an inclusive range of days.
    Calendar {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,

        #[arg(long, value_parser = parse_instant)]
        natal: Option<DateTime<Utc>>,
    },
    /// Recurrence and in-orb duration of an aspect between two bodies.
    Cadence {
        body_a: Body,
        body_b: Body,
        aspect: AspectType,

        /// Orb in degrees (default: the transit orb for the pair).
        #[arg(long)]
        orb: Option<f64>,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if s.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 instant such as 2024-04-08T18:00:00Z: {e}"))
}

type Provider = GeoPositionProvider<Box<dyn EphemerisBackend>>;

fn build_provider(settings: &EphemerisSettings) -> anyhow::Result<Provider> {
    let backend: Box<dyn EphemerisBackend> = match settings.backend {
        BackendKind::Analytic => Box::new(AnalyticEphemeris::new()),
        BackendKind::Swiss => swiss_backend(settings)?,
    };
    info!("ephemeris backend: {}", backend.name());
    Ok(GeoPositionProvider::new(backend))
}

#[cfg(feature = "swisseph")]
fn swiss_backend(settings: &EphemerisSettings) -> anyhow::Result<Box<dyn EphemerisBackend>> {
    let backend = urania::ephemeris::SwissEphemerisBackend::new(settings.data_path.clone())
        .context("Failed to open Swiss Ephemeris data")?;
    Ok(Box::new(backend))
}

#[cfg(not(feature = "swisseph"))]
fn swiss_backend(_settings: &EphemerisSettings) -> anyhow::Result<Box<dyn EphemerisBackend>> {
    anyhow::bail!("backend = \"swiss\" needs almanac built with --features swisseph")
}

fn resolve_location(args: &Args, settings: &UraniaSettings) -> anyhow::Result<Option<GeoLocation>> {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Ok(Some(GeoLocation::try_new(lat, lon)?)),
        (None, None) => Ok(settings.location),
        _ => anyhow::bail!("--lat and --lon must be given together"),
    }
}

/// First-house longitude of the chart at `instant`, when houses can be computed
fn first_house_at(
    provider: &Provider,
    houses: &HouseCalculator,
    location: Option<&GeoLocation>,
    instant: DateTime<Utc>,
) -> anyhow::Result<f64> {
    let chart = ChartBuilder::new(provider).build(instant)?;
    houses
        .first_house_longitude(&chart, location)
        .context("Failed to anchor houses")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref()).context("Failed to load configuration")?;
    let location = resolve_location(&args, &settings)?;
    let provider = build_provider(&settings.ephemeris)?;
    let houses = settings.houses;

    match &args.command {
        Command::Chart { at, filter } => {
            let chart = ChartBuilder::new(&provider).build(*at)?;
            let angles = location.as_ref().map(|loc| angles(*at, loc)).transpose()?;
            let houses = if houses.reference == FirstHouseReference::Ascendant && location.is_none() {
                warn!("no location configured; skipping ascendant houses");
                None
            } else {
                Some(houses.calculate(&chart, location.as_ref())?)
            };
            let report = ChartReport {
                chart: chart.filtered(*filter),
                angles,
                houses,
            };
            report::print_chart(args.format, &report)
        }
        Command::Aspects {
            at,
            natal,
            midpoints,
            filter,
        } => {
            let calculator = AspectCalculator::default();
            let transit = ChartBuilder::new(&provider).build(*at)?.filtered(*filter);
            let aspects = match natal {
                Some(natal_at) => {
                    let natal = ChartBuilder::new(&provider).build(*natal_at)?.filtered(*filter);
                    let mut aspects = calculator.natal_to_transit(&natal, &transit);
                    if *midpoints {
                        aspects.extend(calculator.natal_to_midpoints(&natal, &transit));
                    }
                    aspects
                }
                None => {
                    if *midpoints {
                        anyhow::bail!("--midpoints needs a natal chart (--natal)");
                    }
                    calculator.transit_to_transit(&transit)
                }
            };
            let entries: Vec<AspectEntry> = aspects.into_iter().map(AspectEntry::from).collect();
            report::print_aspects(args.format, &entries)
        }
        Command::Events { date, natal } => {
            let mut detector = EventDetector::new(&provider, settings.events.clone());
            if let Some(natal_at) = natal {
                let first = first_house_at(&provider, &houses, location.as_ref(), *natal_at)?;
                detector = detector.with_first_house(first);
            }
            let events = detector.detect(*date)?;
            report::print_events(args.format, &events)
        }
        Command::Calendar { from, to, natal } => {
            if to < from {
                anyhow::bail!("--to {to} is before --from {from}");
            }
            let mut detector = EventDetector::new(&provider, settings.events.clone());
            if let Some(natal_at) = natal {
                let first = first_house_at(&provider, &houses, location.as_ref(), *natal_at)?;
                detector = detector.with_first_house(first);
            }
            let events = TransitCalendar::new(detector).scan(*from, *to)?;
            report::print_events(args.format, &events)
        }
        Command::Cadence {
            body_a,
            body_b,
            aspect,
            orb,
        } => {
            let orb = match orb {
                Some(orb) => *orb,
                None => AspectCalculator::default()
                    .policy()
                    .orb_limit(
                        AspectContext::TransitToTransit,
                        (*body_a).into(),
                        (*body_b).into(),
                        *aspect,
                    )
                    .with_context(|| format!("{body_a} and {body_b} never form a {aspect}"))?,
            };
            let cadence = AspectCadence::estimate(*body_a, *body_b, *aspect, orb);
            report::print_cadence(args.format, &cadence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant() {
        let dt = parse_instant("2024-04-08T18:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-04-08T18:00:00+00:00");
        let offset = parse_instant("2024-04-08T20:00:00+02:00").unwrap();
        assert_eq!(offset, dt);
        assert!(parse_instant("yesterday").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "almanac", "--format", "text", "cadence", "sun", "moon", "conjunction",
        ])
        .unwrap();
        assert!(matches!(args.format, Format::Text));
        assert!(matches!(
            args.command,
            Command::Cadence {
                body_a: Body::Sun,
                body_b: Body::Moon,
                aspect: AspectType::Conjunction,
                orb: None
            }
        ));

        let args = Args::try_parse_from([
            "almanac", "chart", "--at", "2024-01-01T00:00:00Z", "--filter", "outer", "--lat", "-33.9", "--lon", "18.4",
        ])
        .unwrap();
        assert_eq!(args.lat, Some(-33.9));
        assert!(matches!(args.command, Command::Chart { filter: BodyFilter::Outer, .. }));
    }

    #[test]
    fn test_analytic_provider_is_default() {
        let provider = build_provider(&EphemerisSettings::default()).unwrap();
        assert_eq!(provider.backend().name(), "analytic");
    }
}

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use gochara_core::{
    ALL_BODIES, PositionOracle, ReferenceFrame, SignPosition, TableSource, deg_to_dms,
};
use gochara_search::{
    CalendarConfig, CalendarEntry, PositionEntry, TransitEntry, calendar_month, positions_at,
    transits_year,
};
use gochara_time::{TimeInstant, parse_time_zone};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "gochara", about = "Transit event calendar")]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stations, aspects, and sign ingresses of one month
    Calendar {
        #[arg(long)]
        year: i32,
        /// Month number (1-12)
        #[arg(long)]
        month: u32,
        /// Ephemeris table (rows: body jd longitude speed)
        #[arg(long)]
        table: PathBuf,
        /// Reference frame: tropical, lahiri, krishnamurti, raman, fagan-bradley, yukteshwar
        #[arg(long, default_value = "lahiri")]
        frame: String,
        /// IANA time zone for rendered timestamps
        #[arg(long, default_value = "Asia/Kolkata")]
        tz: String,
        /// Run scans on one thread
        #[arg(long)]
        sequential: bool,
    },
    /// Sign ingresses over one year
    Transits {
        #[arg(long)]
        year: i32,
        /// Single body (all but the Moon when omitted)
        #[arg(long)]
        body: Option<String>,
        /// Ephemeris table (rows: body jd longitude speed)
        #[arg(long)]
        table: PathBuf,
        #[arg(long, default_value = "lahiri")]
        frame: String,
        #[arg(long, default_value = "Asia/Kolkata")]
        tz: String,
    },
    /// Positions of every tracked body at one instant
    Positions {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        /// Ephemeris table (rows: body jd longitude speed)
        #[arg(long)]
        table: PathBuf,
        #[arg(long, default_value = "lahiri")]
        frame: String,
    },
    /// Sign and degree string from a longitude
    Sign {
        /// Ecliptic longitude in degrees
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        deg: f64,
    },
}

#[derive(Serialize)]
struct CalendarResponse<'a> {
    year: i32,
    month: u32,
    frame: &'a str,
    count: usize,
    events: Vec<CalendarEntry>,
}

#[derive(Serialize)]
struct TransitsResponse<'a> {
    year: i32,
    body: Option<&'a str>,
    frame: &'a str,
    count: usize,
    transits: Vec<TransitEntry>,
}

#[derive(Serialize)]
struct PositionsResponse<'a> {
    date: String,
    frame: &'a str,
    positions: Vec<PositionEntry>,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("expected YYYY-MM-DDThh:mm:ssZ, got {s}: {e}"))
}

fn load_table(path: &Path) -> TableSource {
    TableSource::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load ephemeris table {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn require_frame(name: &str) -> ReferenceFrame {
    ReferenceFrame::from_name(name).unwrap_or_else(|e| {
        eprintln!("{e}");
        eprintln!("Valid: tropical, lahiri, krishnamurti (kp), raman, fagan-bradley, yukteshwar");
        std::process::exit(1);
    })
}

fn calendar_config(tz: &str, sequential: bool) -> CalendarConfig {
    let tz = parse_time_zone(tz).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let config = CalendarConfig::default().with_display_tz(tz);
    if sequential { config.sequential() } else { config }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Calendar {
            year,
            month,
            table,
            frame,
            tz,
            sequential,
        } => {
            let source = load_table(&table);
            let frame = require_frame(&frame);
            let oracle = PositionOracle::new(&source, frame);
            let config = calendar_config(&tz, sequential);
            let events = calendar_month(&oracle, year, month, &config).unwrap_or_else(|e| {
                eprintln!("Calendar search failed: {e}");
                std::process::exit(1);
            });
            print_json(&CalendarResponse {
                year,
                month,
                frame: frame.name(),
                count: events.len(),
                events,
            });
        }

        Commands::Transits {
            year,
            body,
            table,
            frame,
            tz,
        } => {
            let source = load_table(&table);
            let frame = require_frame(&frame);
            let oracle = PositionOracle::new(&source, frame);
            let config = calendar_config(&tz, false);
            let transits = transits_year(&oracle, year, body.as_deref(), &config)
                .unwrap_or_else(|e| {
                    eprintln!("Transit search failed: {e}");
                    std::process::exit(1);
                });
            print_json(&TransitsResponse {
                year,
                body: body.as_deref(),
                frame: frame.name(),
                count: transits.len(),
                transits,
            });
        }

        Commands::Positions { date, table, frame } => {
            let dt = parse_utc(&date).unwrap_or_else(|e| {
                eprintln!("Invalid date: {e}");
                std::process::exit(1);
            });
            let source = load_table(&table);
            let frame = require_frame(&frame);
            let oracle = PositionOracle::new(&source, frame);
            let positions = positions_at(&oracle, &ALL_BODIES, TimeInstant::from_datetime(&dt))
                .unwrap_or_else(|e| {
                    eprintln!("Position lookup failed: {e}");
                    std::process::exit(1);
                });
            print_json(&PositionsResponse {
                date: dt.to_rfc3339(),
                frame: frame.name(),
                positions,
            });
        }

        Commands::Sign { lon } => {
            let pos = SignPosition::from_longitude(lon);
            println!(
                "{} ({}) - {} ({:.4} deg in sign)",
                pos.sign.name(),
                pos.sign.sanskrit_name(),
                pos.display(),
                pos.degrees_in_sign
            );
        }

        Commands::Dms { deg } => {
            let dms = deg_to_dms(deg);
            let sign = if deg < 0.0 { "-" } else { "" };
            println!(
                "{sign}{}° {}' {:.4}\"",
                dms.degrees, dms.minutes, dms.seconds
            );
        }
    }
}

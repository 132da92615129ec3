// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flightcalc_core::ingest::{self, AircraftRecord, AirportRecord, RequestRecord};
use flightcalc_core::{
    BatchSummary, EngineConfig, Fare, FareClass, FlightEngine, FlightOutcome, FlightRequest,
    UkAirport,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Airports CSV (code,name,distance_a,distance_b)
    #[arg(long, env = "FLIGHTCALC_AIRPORTS")]
    airports: PathBuf,

    /// Aircraft CSV (type,running_cost,max_range and capacity or economy,business,first)
    #[arg(long, env = "FLIGHTCALC_AIRCRAFT")]
    aircraft: PathBuf,

    /// Engine config JSON [default: engine.json in the user config dir]
    #[arg(short, long, env = "FLIGHTCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Repeat for more log output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cost a single flight
    Calculate {
        /// UK origin (MAN or LGW)
        #[arg(long)]
        uk: UkAirport,
        /// Overseas airport code
        #[arg(long)]
        overseas: String,
        /// Aircraft type
        #[arg(long = "type")]
        aircraft_type: String,
        /// Economy booking as SEATS:PRICE
        #[arg(long, value_parser = parse_fare)]
        economy: Option<Fare>,
        /// Business booking as SEATS:PRICE
        #[arg(long, value_parser = parse_fare)]
        business: Option<Fare>,
        /// First booking as SEATS:PRICE
        #[arg(long, value_parser = parse_fare)]
        first: Option<Fare>,
    },
    /// Cost every request in a CSV file, one JSON line per row
    Batch {
        #[arg(long)]
        requests: PathBuf,
    },
}

fn parse_fare(value: &str) -> Result<Fare, String> {
    let (seats, price) = value
        .split_once(':')
        .ok_or_else(|| format!("expected SEATS:PRICE, got '{}'", value))?;
    let seats = seats
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid seats '{}': {}", seats, e))?;
    let price = ingest::parse_numeric(price).ok_or_else(|| format!("invalid price '{}'", price))?;
    Ok(Fare::new(seats, price))
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

/// Reads a reference table. Any bad row fails the whole table.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = open_csv(path)?;
    let mut records = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let record =
            record.with_context(|| format!("Failed to parse {} row {}", path.display(), i + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// One line of batch output, numbered by data row (header excluded).
#[derive(Serialize)]
struct BatchLine<'a> {
    row: usize,
    #[serde(flatten)]
    result: RowResult<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RowResult<'a> {
    Evaluated(&'a FlightOutcome),
    Rejected { status: &'static str, error: String },
}

#[derive(Debug, Default, PartialEq)]
struct BatchReport {
    summary: BatchSummary,
    rejected: usize,
}

/// Ingests each request row on its own, evaluates the ones that convert and
/// writes a line for every row in file order.
fn run_batch<W: Write>(engine: &FlightEngine, path: &Path, out: &mut W) -> Result<BatchReport> {
    let mut rdr = open_csv(path)?;

    let mut rows = Vec::new();
    let mut requests = Vec::new();
    let mut rejected = Vec::new();
    for (i, record) in rdr.deserialize::<RequestRecord>().enumerate() {
        let row = i + 1;
        let converted = record
            .map_err(|e| e.to_string())
            .and_then(|record| record.into_request(row).map_err(|e| e.to_string()));
        match converted {
            Ok(request) => {
                rows.push(row);
                requests.push(request);
            }
            Err(error) => {
                log::warn!("[Batch] Skipping row {}: {}", row, error);
                rejected.push((row, error));
            }
        }
    }

    let outcomes = engine.evaluate_batch(&requests);

    let mut lines: Vec<BatchLine<'_>> = rows
        .iter()
        .zip(&outcomes)
        .map(|(row, outcome)| BatchLine {
            row: *row,
            result: RowResult::Evaluated(outcome),
        })
        .chain(rejected.iter().map(|(row, error)| BatchLine {
            row: *row,
            result: RowResult::Rejected {
                status: "rejected",
                error: error.clone(),
            },
        }))
        .collect();
    lines.sort_by_key(|line| line.row);

    for line in &lines {
        writeln!(out, "{}", serde_json::to_string(line)?)?;
    }

    Ok(BatchReport {
        summary: BatchSummary::from_outcomes(&outcomes),
        rejected: rejected.len(),
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(EngineConfig::default_path);
    let config = EngineConfig::load(&config_path)?;

    let airports = ingest::airport_table(read_records::<AirportRecord>(&cli.airports)?)?;
    let aircraft = ingest::aircraft_table(read_records::<AircraftRecord>(&cli.aircraft)?)?;
    let engine = FlightEngine::new(airports, aircraft, config);

    match cli.command {
        Commands::Calculate {
            uk,
            overseas,
            aircraft_type,
            economy,
            business,
            first,
        } => {
            let mut request = FlightRequest::new(uk, overseas, aircraft_type);
            request.fares.set(FareClass::Economy, economy);
            request.fares.set(FareClass::Business, business);
            request.fares.set(FareClass::First, first);

            let outcome = engine.evaluate(&request);
            if let Err(err) = outcome.as_result() {
                log::warn!("[Calculate] {}", err);
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Batch { requests } => {
            let report = run_batch(&engine, &requests, &mut io::stdout().lock())?;
            log::info!(
                "Batch complete: succeeded={} failed={} rejected={} total_profit={:.2}",
                report.summary.succeeded,
                report.summary.failed,
                report.rejected,
                report.summary.total_profit
            );
        }
    }

    Ok(())
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Raw string records, as any tabular source delivers them, and their one-time
//! conversion into typed reference data and requests.

use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::lookup::KeyedTable;
use crate::models::{Aircraft, Airport, FareClass, FlightRequest, SeatCapacity, UkAirport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    pub distance_a: String,
    pub distance_b: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftRecord {
    #[serde(rename = "type")]
    pub aircraft_type: String,
    /// May carry a currency symbol, e.g. "£5.00"
    pub running_cost: String,
    pub max_range: String,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub economy: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub uk_airport: String,
    pub overseas_airport: String,
    pub aircraft_type: String,
    #[serde(default)]
    pub economy_seats: Option<String>,
    #[serde(default)]
    pub economy_price: Option<String>,
    #[serde(default)]
    pub business_seats: Option<String>,
    #[serde(default)]
    pub business_price: Option<String>,
    #[serde(default)]
    pub first_seats: Option<String>,
    #[serde(default)]
    pub first_price: Option<String>,
}

/// Keeps digits, '.' and '-' and parses what is left.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Unparseable reference values become NaN so only requests that touch them fail.
fn numeric_or_nan(raw: &str, field: &str, key: &str) -> f64 {
    parse_numeric(raw).unwrap_or_else(|| {
        log::warn!("[Ingest] Unparseable {} '{}' for '{}'", field, raw, key);
        f64::NAN
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl From<AirportRecord> for Airport {
    fn from(record: AirportRecord) -> Self {
        let code = record.code.trim().to_string();
        let primary = numeric_or_nan(&record.distance_a, "distance_a", &code);
        let secondary = numeric_or_nan(&record.distance_b, "distance_b", &code);
        Airport::new(code, record.name.trim(), primary, secondary)
    }
}

impl TryFrom<AircraftRecord> for Aircraft {
    type Error = IngestError;

    fn try_from(record: AircraftRecord) -> Result<Self, Self::Error> {
        let key = record.aircraft_type.trim().to_string();
        let class_columns = [&record.economy, &record.business, &record.first];

        let capacity = if class_columns.iter().any(|c| non_empty(c).is_some()) {
            let seats = |column: &Option<String>, field: &str| {
                non_empty(column)
                    .map(|raw| numeric_or_nan(raw, field, &key))
                    .unwrap_or(f64::NAN)
            };
            SeatCapacity::ByClass {
                economy: seats(&record.economy, "economy"),
                business: seats(&record.business, "business"),
                first: seats(&record.first, "first"),
            }
        } else if let Some(raw) = non_empty(&record.capacity) {
            SeatCapacity::Total {
                seats: numeric_or_nan(raw, "capacity", &key),
            }
        } else {
            return Err(IngestError::MissingCapacity(key));
        };

        Ok(Aircraft {
            running_cost_per_seat_per_100km: numeric_or_nan(
                &record.running_cost,
                "running_cost",
                &key,
            ),
            max_flight_range_km: numeric_or_nan(&record.max_range, "max_range", &key),
            aircraft_type: key,
            capacity,
        })
    }
}

pub fn airport_table(records: Vec<AirportRecord>) -> Result<KeyedTable<Airport>, IngestError> {
    let table = KeyedTable::new(records.into_iter().map(Airport::from).collect())?;
    log::info!("[Ingest] Loaded {} airports", table.len());
    Ok(table)
}

pub fn aircraft_table(records: Vec<AircraftRecord>) -> Result<KeyedTable<Aircraft>, IngestError> {
    let fleet = records
        .into_iter()
        .map(Aircraft::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let table = KeyedTable::new(fleet)?;
    log::info!("[Ingest] Loaded {} aircraft types", table.len());
    Ok(table)
}

impl RequestRecord {
    /// `row` is only used to locate errors.
    pub fn into_request(self, row: usize) -> Result<FlightRequest, IngestError> {
        let uk_airport: UkAirport = self
            .uk_airport
            .parse()
            .map_err(|source| IngestError::UnknownOrigin { row, source })?;

        let mut request = FlightRequest::new(
            uk_airport,
            self.overseas_airport.trim(),
            self.aircraft_type.trim(),
        );

        let columns = [
            (FareClass::Economy, &self.economy_seats, &self.economy_price),
            (FareClass::Business, &self.business_seats, &self.business_price),
            (FareClass::First, &self.first_seats, &self.first_price),
        ];

        for (class, seats, price) in columns {
            let missing = |column: &str| IngestError::InvalidRequestField {
                row,
                field: format!("{} {}", class, column),
                value: String::new(),
            };
            let (seats, price) = match (non_empty(seats), non_empty(price)) {
                (None, None) => continue,
                (Some(_), None) => return Err(missing("price")),
                (None, Some(_)) => return Err(missing("seats")),
                (Some(seats), Some(price)) => (seats, price),
            };
            let seats: u32 = seats.parse().map_err(|_| IngestError::InvalidRequestField {
                row,
                field: format!("{} seats", class),
                value: seats.to_string(),
            })?;
            let price = parse_numeric(price).ok_or_else(|| IngestError::InvalidRequestField {
                row,
                field: format!("{} price", class),
                value: price.to_string(),
            })?;
            request = request.with_fare(class, seats, price);
        }

        Ok(request)
    }
}

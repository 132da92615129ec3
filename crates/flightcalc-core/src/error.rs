// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::models::{FareClass, UkAirport, UnknownUkAirport};

/// The request a failure belongs to, using the reference codes once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub uk_airport: UkAirport,
    pub overseas_airport: String,
    pub aircraft_type: String,
}

impl Route {
    pub fn new(
        uk_airport: UkAirport,
        overseas_airport: impl Into<String>,
        aircraft_type: impl Into<String>,
    ) -> Self {
        Self {
            uk_airport,
            overseas_airport: overseas_airport.into(),
            aircraft_type: aircraft_type.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.uk_airport, self.overseas_airport, self.aircraft_type
        )
    }
}

/// Which seat limit an overbooking breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverbookingScope {
    Class(FareClass),
    Total,
}

impl fmt::Display for OverbookingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverbookingScope::Class(class) => write!(f, "{}", class),
            OverbookingScope::Total => f.write_str("total"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownAirport,
    UnknownAircraft,
    InvalidNumericData,
    RangeExceeded,
    ClassUnavailable,
    Overbooking,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnknownAirport => "unknown_airport",
            ErrorKind::UnknownAircraft => "unknown_aircraft",
            ErrorKind::InvalidNumericData => "invalid_numeric_data",
            ErrorKind::RangeExceeded => "range_exceeded",
            ErrorKind::ClassUnavailable => "class_unavailable",
            ErrorKind::Overbooking => "overbooking",
        };
        f.write_str(name)
    }
}

/// Why a flight request could not be costed.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationError {
    #[error("Unknown overseas airport '{code}'. Valid codes: {}", .valid_codes.join(", "))]
    UnknownAirport {
        code: String,
        valid_codes: Vec<String>,
    },
    #[error("Unknown aircraft type '{aircraft_type}'. Valid types: {}", .valid_types.join(", "))]
    UnknownAircraft {
        aircraft_type: String,
        valid_types: Vec<String>,
    },
    #[error("Invalid numeric data for {field} on {route}")]
    InvalidNumericData {
        field: String,
        #[serde(flatten)]
        route: Route,
    },
    #[error("Distance {distance_km} km on {route} exceeds the aircraft's maximum range of {max_range_km} km")]
    RangeExceeded {
        #[serde(flatten)]
        route: Route,
        distance_km: f64,
        max_range_km: f64,
    },
    #[error("Aircraft '{aircraft_type}' has no {class} class seats")]
    ClassUnavailable {
        class: FareClass,
        aircraft_type: String,
    },
    #[error("Overbooked {scope} seats on {route}: requested {requested}, available {available}")]
    Overbooking {
        #[serde(flatten)]
        route: Route,
        scope: OverbookingScope,
        requested: u64,
        available: u64,
    },
}

impl CalculationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalculationError::UnknownAirport { .. } => ErrorKind::UnknownAirport,
            CalculationError::UnknownAircraft { .. } => ErrorKind::UnknownAircraft,
            CalculationError::InvalidNumericData { .. } => ErrorKind::InvalidNumericData,
            CalculationError::RangeExceeded { .. } => ErrorKind::RangeExceeded,
            CalculationError::ClassUnavailable { .. } => ErrorKind::ClassUnavailable,
            CalculationError::Overbooking { .. } => ErrorKind::Overbooking,
        }
    }

    /// Route of the request, for every kind raised after both lookups succeed.
    pub fn route(&self) -> Option<&Route> {
        match self {
            CalculationError::InvalidNumericData { route, .. }
            | CalculationError::RangeExceeded { route, .. }
            | CalculationError::Overbooking { route, .. } => Some(route),
            _ => None,
        }
    }
}

/// Failures while turning raw records into reference tables or requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Duplicate key '{key}' (already defined as '{existing}')")]
    DuplicateKey { key: String, existing: String },
    #[error("Aircraft '{0}' has neither a total capacity nor class capacities")]
    MissingCapacity(String),
    #[error("Request {row}: {source}")]
    UnknownOrigin {
        row: usize,
        #[source]
        source: UnknownUkAirport,
    },
    #[error("Request {row}: invalid {field} '{value}'")]
    InvalidRequestField {
        row: usize,
        field: String,
        value: String,
    },
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Reference records and booking requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::lookup::Keyed;

/// An overseas destination with its distance from each UK origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    /// Kilometres from the primary UK origin
    pub distance_from_primary_km: f64,
    /// Kilometres from the secondary UK origin
    pub distance_from_secondary_km: f64,
}

impl Airport {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        distance_from_primary_km: f64,
        distance_from_secondary_km: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            distance_from_primary_km,
            distance_from_secondary_km,
        }
    }
}

impl Keyed for Airport {
    fn key(&self) -> &str {
        &self.code
    }
}

/// Seat layout of an aircraft type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SeatCapacity {
    /// Single cabin, only the total is known
    Total { seats: f64 },
    /// Per-class cabins
    ByClass {
        economy: f64,
        business: f64,
        first: f64,
    },
}

impl SeatCapacity {
    pub fn total(seats: u32) -> Self {
        SeatCapacity::Total {
            seats: f64::from(seats),
        }
    }

    pub fn by_class(economy: u32, business: u32, first: u32) -> Self {
        SeatCapacity::ByClass {
            economy: f64::from(economy),
            business: f64::from(business),
            first: f64::from(first),
        }
    }

    pub fn is_class_aware(&self) -> bool {
        matches!(self, SeatCapacity::ByClass { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub aircraft_type: String,
    pub running_cost_per_seat_per_100km: f64,
    pub max_flight_range_km: f64,
    pub capacity: SeatCapacity,
}

impl Aircraft {
    pub fn new(
        aircraft_type: impl Into<String>,
        running_cost_per_seat_per_100km: f64,
        max_flight_range_km: f64,
        capacity: SeatCapacity,
    ) -> Self {
        Self {
            aircraft_type: aircraft_type.into(),
            running_cost_per_seat_per_100km,
            max_flight_range_km,
            capacity,
        }
    }
}

impl Keyed for Aircraft {
    fn key(&self) -> &str {
        &self.aircraft_type
    }
}

/// Cabin classes, in the order they are checked and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FareClass {
    Economy,
    Business,
    First,
}

impl FareClass {
    pub const ALL: [FareClass; 3] = [FareClass::Economy, FareClass::Business, FareClass::First];

    pub fn as_str(&self) -> &'static str {
        match self {
            FareClass::Economy => "economy",
            FareClass::Business => "business",
            FareClass::First => "first",
        }
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown UK airport '{0}' (expected one of: MAN, LGW)")]
pub struct UnknownUkAirport(pub String);

/// The UK side of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UkAirport {
    /// Manchester
    Man,
    /// London Gatwick
    Lgw,
}

impl UkAirport {
    pub const ALL: [UkAirport; 2] = [UkAirport::Man, UkAirport::Lgw];

    pub fn code(&self) -> &'static str {
        match self {
            UkAirport::Man => "MAN",
            UkAirport::Lgw => "LGW",
        }
    }
}

impl FromStr for UkAirport {
    type Err = UnknownUkAirport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        UkAirport::ALL
            .into_iter()
            .find(|origin| origin.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownUkAirport(s.to_string()))
    }
}

impl TryFrom<String> for UkAirport {
    type Error = UnknownUkAirport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UkAirport> for String {
    fn from(value: UkAirport) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for UkAirport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Seats booked in one cabin at a unit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fare {
    pub seats: u32,
    pub price: f64,
}

impl Fare {
    pub fn new(seats: u32, price: f64) -> Self {
        Self { seats, price }
    }

    pub fn income(&self) -> f64 {
        f64::from(self.seats) * self.price
    }
}

/// Per-class bookings. A `None` class was not offered in the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassFares {
    #[serde(default)]
    pub economy: Option<Fare>,
    #[serde(default)]
    pub business: Option<Fare>,
    #[serde(default)]
    pub first: Option<Fare>,
}

impl ClassFares {
    pub fn get(&self, class: FareClass) -> Option<Fare> {
        match class {
            FareClass::Economy => self.economy,
            FareClass::Business => self.business,
            FareClass::First => self.first,
        }
    }

    pub fn set(&mut self, class: FareClass, fare: Option<Fare>) {
        match class {
            FareClass::Economy => self.economy = fare,
            FareClass::Business => self.business = fare,
            FareClass::First => self.first = fare,
        }
    }

    /// Classes present in the request, in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (FareClass, Fare)> + '_ {
        FareClass::ALL
            .into_iter()
            .filter_map(move |class| self.get(class).map(|fare| (class, fare)))
    }

    pub fn seats(&self, class: FareClass) -> u32 {
        self.get(class).map(|fare| fare.seats).unwrap_or(0)
    }

    pub fn total_seats(&self) -> u64 {
        self.present().map(|(_, fare)| u64::from(fare.seats)).sum()
    }
}

/// A normalized booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRequest {
    pub uk_airport: UkAirport,
    pub overseas_airport: String,
    pub aircraft_type: String,
    #[serde(default)]
    pub fares: ClassFares,
}

impl FlightRequest {
    pub fn new(
        uk_airport: UkAirport,
        overseas_airport: impl Into<String>,
        aircraft_type: impl Into<String>,
    ) -> Self {
        Self {
            uk_airport,
            overseas_airport: overseas_airport.into(),
            aircraft_type: aircraft_type.into(),
            fares: ClassFares::default(),
        }
    }

    pub fn with_fare(mut self, class: FareClass, seats: u32, price: f64) -> Self {
        self.fares.set(class, Some(Fare::new(seats, price)));
        self
    }
}

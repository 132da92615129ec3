// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Fail-fast validation of a flight request against the reference tables.
//!
//! Lookups run first and build a [`FlightContext`]. The remaining checks are an
//! ordered list of plain functions over that context: each one either returns
//! `Ok(())` and the next check runs, or returns the error that ends the run.
//! Later checks rely on values filled in by earlier ones, so the order in
//! [`CHECKS`] must not change.

use crate::config::EngineConfig;
use crate::error::{CalculationError, OverbookingScope, Route};
use crate::lookup::KeyedTable;
use crate::models::{Aircraft, Airport, FareClass, FlightRequest, SeatCapacity};

/// Seat limits after numeric validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CabinLimits {
    /// Economy, business, first. `None` for single-cabin aircraft.
    pub per_class: Option<[u64; 3]>,
    pub total: u64,
}

impl CabinLimits {
    pub fn class(&self, class: FareClass) -> Option<u64> {
        self.per_class.map(|limits| limits[class_index(class)])
    }
}

fn class_index(class: FareClass) -> usize {
    match class {
        FareClass::Economy => 0,
        FareClass::Business => 1,
        FareClass::First => 2,
    }
}

/// State shared by the checks of one calculation.
#[derive(Debug, Clone)]
pub struct FlightContext<'a> {
    pub request: &'a FlightRequest,
    pub airport: &'a Airport,
    pub aircraft: &'a Aircraft,
    pub config: &'a EngineConfig,
    pub distance_km: f64,
    pub limits: CabinLimits,
    pub seats_booked: u64,
    pub income: f64,
    pub total_cost: f64,
}

impl<'a> FlightContext<'a> {
    fn new(
        request: &'a FlightRequest,
        airport: &'a Airport,
        aircraft: &'a Aircraft,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            request,
            airport,
            aircraft,
            config,
            distance_km: 0.0,
            limits: CabinLimits::default(),
            seats_booked: request.fares.total_seats(),
            income: 0.0,
            total_cost: 0.0,
        }
    }

    pub fn route(&self) -> Route {
        Route::new(
            self.request.uk_airport,
            self.airport.code.as_str(),
            self.aircraft.aircraft_type.as_str(),
        )
    }

    fn invalid(&self, field: &str) -> CalculationError {
        CalculationError::InvalidNumericData {
            field: field.to_string(),
            route: self.route(),
        }
    }

    fn require_non_negative(&self, value: f64, field: &str) -> Result<f64, CalculationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(field))
        }
    }

    fn require_seat_count(&self, value: f64, field: &str) -> Result<u64, CalculationError> {
        let value = self.require_non_negative(value, field)?;
        if value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(self.invalid(field));
        }
        Ok(value as u64)
    }
}

pub type Check = fn(&mut FlightContext<'_>) -> Result<(), CalculationError>;

/// Checks run after both lookups succeed, in this order.
pub const CHECKS: [(&str, Check); 8] = [
    ("select_distance", select_distance),
    ("numeric_data", check_numeric_data),
    ("range", check_range),
    ("class_availability", check_class_availability),
    ("class_overbooking", check_class_overbooking),
    ("total_overbooking", check_total_overbooking),
    ("income", check_income),
    ("total_cost", check_total_cost),
];

/// Runs every step and returns the context ready for the economics pass.
pub fn run<'a>(
    request: &'a FlightRequest,
    airports: &'a KeyedTable<Airport>,
    aircraft: &'a KeyedTable<Aircraft>,
    config: &'a EngineConfig,
) -> Result<FlightContext<'a>, CalculationError> {
    let airport = airports.resolve(&request.overseas_airport).map_err(|miss| {
        CalculationError::UnknownAirport {
            code: miss.key,
            valid_codes: miss.valid_keys,
        }
    })?;

    let aircraft = aircraft.resolve(&request.aircraft_type).map_err(|miss| {
        CalculationError::UnknownAircraft {
            aircraft_type: miss.key,
            valid_types: miss.valid_keys,
        }
    })?;

    let mut ctx = FlightContext::new(request, airport, aircraft, config);
    for (name, check) in CHECKS {
        if let Err(err) = check(&mut ctx) {
            log::debug!(
                "[Pipeline] {} -> {} / {}: failed at {} ({})",
                request.uk_airport,
                airport.code,
                aircraft.aircraft_type,
                name,
                err.kind()
            );
            return Err(err);
        }
    }

    Ok(ctx)
}

fn select_distance(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    ctx.distance_km = if ctx.request.uk_airport == ctx.config.primary_origin {
        ctx.airport.distance_from_primary_km
    } else {
        ctx.airport.distance_from_secondary_km
    };
    Ok(())
}

fn check_numeric_data(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    ctx.require_non_negative(ctx.distance_km, "distance")?;
    ctx.require_non_negative(ctx.aircraft.running_cost_per_seat_per_100km, "running cost")?;
    ctx.require_non_negative(ctx.aircraft.max_flight_range_km, "max flight range")?;

    ctx.limits = match ctx.aircraft.capacity {
        SeatCapacity::Total { seats } => CabinLimits {
            per_class: None,
            total: ctx.require_seat_count(seats, "capacity")?,
        },
        SeatCapacity::ByClass {
            economy,
            business,
            first,
        } => {
            let per_class = [
                ctx.require_seat_count(economy, "economy capacity")?,
                ctx.require_seat_count(business, "business capacity")?,
                ctx.require_seat_count(first, "first capacity")?,
            ];
            CabinLimits {
                per_class: Some(per_class),
                total: per_class.iter().sum(),
            }
        }
    };
    Ok(())
}

fn check_range(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    if ctx.distance_km > ctx.aircraft.max_flight_range_km {
        return Err(CalculationError::RangeExceeded {
            route: ctx.route(),
            distance_km: ctx.distance_km,
            max_range_km: ctx.aircraft.max_flight_range_km,
        });
    }
    Ok(())
}

fn check_class_availability(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    for class in FareClass::ALL {
        let Some(available) = ctx.limits.class(class) else {
            return Ok(());
        };
        if ctx.request.fares.seats(class) > 0 && available == 0 {
            return Err(CalculationError::ClassUnavailable {
                class,
                aircraft_type: ctx.aircraft.aircraft_type.clone(),
            });
        }
    }
    Ok(())
}

fn check_class_overbooking(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    for class in FareClass::ALL {
        let Some(available) = ctx.limits.class(class) else {
            return Ok(());
        };
        let requested = u64::from(ctx.request.fares.seats(class));
        if requested > available {
            return Err(CalculationError::Overbooking {
                route: ctx.route(),
                scope: OverbookingScope::Class(class),
                requested,
                available,
            });
        }
    }
    Ok(())
}

fn check_total_overbooking(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    if ctx.seats_booked > ctx.limits.total {
        return Err(CalculationError::Overbooking {
            route: ctx.route(),
            scope: OverbookingScope::Total,
            requested: ctx.seats_booked,
            available: ctx.limits.total,
        });
    }
    Ok(())
}

fn check_income(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    let mut income = 0.0;
    for (class, fare) in ctx.request.fares.present() {
        ctx.require_non_negative(fare.price, &format!("{} price", class))?;
        income += fare.income();
    }
    if !income.is_finite() {
        return Err(ctx.invalid("income"));
    }
    ctx.income = income;
    Ok(())
}

fn check_total_cost(ctx: &mut FlightContext<'_>) -> Result<(), CalculationError> {
    let cost_per_seat = ctx.aircraft.running_cost_per_seat_per_100km * (ctx.distance_km / 100.0);
    let total_cost = cost_per_seat * ctx.seats_booked as f64;
    if !total_cost.is_finite() {
        return Err(ctx.invalid("total cost"));
    }
    ctx.total_cost = total_cost;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::UkAirport;

    fn airports() -> KeyedTable<Airport> {
        KeyedTable::new(vec![
            Airport::new("JFK", "John F Kennedy", 5000.0, 5500.0),
            Airport::new("ORY", "Paris Orly", 1000.0, 700.0),
        ])
        .unwrap()
    }

    fn fleet() -> KeyedTable<Aircraft> {
        KeyedTable::new(vec![
            Aircraft::new("A320", 5.0, 6000.0, SeatCapacity::total(150)),
            Aircraft::new("B787", 8.0, 13000.0, SeatCapacity::by_class(200, 40, 0)),
        ])
        .unwrap()
    }

    fn invalid_field(err: &CalculationError) -> &str {
        match err {
            CalculationError::InvalidNumericData { field, .. } => field,
            other => panic!("expected InvalidNumericData, got {:?}", other),
        }
    }

    fn run_request(request: &FlightRequest) -> Result<(f64, f64, f64), CalculationError> {
        let airports = airports();
        let fleet = fleet();
        let config = EngineConfig::default();
        run(request, &airports, &fleet, &config)
            .map(|ctx| (ctx.distance_km, ctx.income, ctx.total_cost))
    }

    #[test]
    fn test_primary_origin_uses_first_distance() {
        let request = FlightRequest::new(UkAirport::Man, "jfk", "A320")
            .with_fare(FareClass::Economy, 10, 100.0);
        let (distance, _, _) = run_request(&request).unwrap();
        assert_eq!(distance, 5000.0);
    }

    #[test]
    fn test_other_origin_uses_second_distance() {
        let request = FlightRequest::new(UkAirport::Lgw, "JFK", "A320")
            .with_fare(FareClass::Economy, 10, 100.0);
        let (distance, _, _) = run_request(&request).unwrap();
        assert_eq!(distance, 5500.0);
    }

    #[test]
    fn test_airport_checked_before_aircraft() {
        let request = FlightRequest::new(UkAirport::Man, "XXX", "B900");
        let err = run_request(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAirport);
    }

    #[test]
    fn test_class_unavailable_precedes_overbooking() {
        // Economy is overbooked too, but first class has no seats at all.
        let request = FlightRequest::new(UkAirport::Man, "JFK", "B787")
            .with_fare(FareClass::Economy, 500, 100.0)
            .with_fare(FareClass::First, 1, 2000.0);
        let err = run_request(&request).unwrap_err();
        assert_eq!(
            err,
            CalculationError::ClassUnavailable {
                class: FareClass::First,
                aircraft_type: "B787".to_string(),
            }
        );
    }

    #[test]
    fn test_first_overbooked_class_is_reported() {
        let request = FlightRequest::new(UkAirport::Man, "JFK", "B787")
            .with_fare(FareClass::Economy, 201, 100.0)
            .with_fare(FareClass::Business, 41, 900.0);
        let err = run_request(&request).unwrap_err();
        assert_eq!(
            err,
            CalculationError::Overbooking {
                route: Route::new(UkAirport::Man, "JFK", "B787"),
                scope: OverbookingScope::Class(FareClass::Economy),
                requested: 201,
                available: 200,
            }
        );
    }

    #[test]
    fn test_zero_seats_in_missing_class_is_allowed() {
        let request = FlightRequest::new(UkAirport::Man, "JFK", "B787")
            .with_fare(FareClass::Economy, 10, 100.0)
            .with_fare(FareClass::First, 0, 2000.0);
        assert!(run_request(&request).is_ok());
    }

    #[test]
    fn test_total_capacity_ignores_class_split() {
        let request = FlightRequest::new(UkAirport::Man, "JFK", "A320")
            .with_fare(FareClass::Economy, 100, 100.0)
            .with_fare(FareClass::Business, 51, 300.0);
        let err = run_request(&request).unwrap_err();
        assert_eq!(
            err,
            CalculationError::Overbooking {
                route: Route::new(UkAirport::Man, "JFK", "A320"),
                scope: OverbookingScope::Total,
                requested: 151,
                available: 150,
            }
        );
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let request = FlightRequest::new(UkAirport::Man, "JFK", "A320")
            .with_fare(FareClass::Economy, 10, -1.0);
        let err = run_request(&request).unwrap_err();
        assert_eq!(invalid_field(&err), "economy price");
    }

    #[test]
    fn test_nan_running_cost_is_invalid() {
        let airports = airports();
        let fleet = KeyedTable::new(vec![Aircraft::new(
            "A320",
            f64::NAN,
            6000.0,
            SeatCapacity::total(150),
        )])
        .unwrap();
        let config = EngineConfig::default();
        let request = FlightRequest::new(UkAirport::Man, "JFK", "A320");
        let err = run(&request, &airports, &fleet, &config).unwrap_err();
        assert_eq!(invalid_field(&err), "running cost");
        assert_eq!(err.route(), Some(&Route::new(UkAirport::Man, "JFK", "A320")));
    }

    #[test]
    fn test_fractional_capacity_is_invalid() {
        let airports = airports();
        let fleet = KeyedTable::new(vec![Aircraft::new(
            "A320",
            5.0,
            6000.0,
            SeatCapacity::Total { seats: 150.5 },
        )])
        .unwrap();
        let config = EngineConfig::default();
        let request = FlightRequest::new(UkAirport::Man, "JFK", "A320");
        let err = run(&request, &airports, &fleet, &config).unwrap_err();
        assert_eq!(invalid_field(&err), "capacity");
    }

    #[test]
    fn test_income_and_cost_are_filled() {
        let request = FlightRequest::new(UkAirport::Man, "ORY", "A320")
            .with_fare(FareClass::Economy, 100, 80.0)
            .with_fare(FareClass::Business, 10, 250.0);
        let (distance, income, cost) = run_request(&request).unwrap();
        assert_eq!(distance, 1000.0);
        assert_eq!(income, 10_500.0);
        assert_eq!(cost, 5.0 * 10.0 * 110.0);
    }

    #[test]
    fn test_income_overflow_is_invalid() {
        let request = FlightRequest::new(UkAirport::Man, "JFK", "A320")
            .with_fare(FareClass::Economy, 2, f64::MAX);
        let err = run_request(&request).unwrap_err();
        assert_eq!(invalid_field(&err), "income");
    }

    #[test]
    fn test_total_cost_overflow_is_invalid() {
        let airports = airports();
        let fleet = KeyedTable::new(vec![Aircraft::new(
            "A320",
            f64::MAX,
            6000.0,
            SeatCapacity::total(150),
        )])
        .unwrap();
        let config = EngineConfig::default();
        let request = FlightRequest::new(UkAirport::Man, "JFK", "A320")
            .with_fare(FareClass::Economy, 10, 100.0);
        let err = run(&request, &airports, &fleet, &config).unwrap_err();
        assert_eq!(invalid_field(&err), "total cost");
    }
}

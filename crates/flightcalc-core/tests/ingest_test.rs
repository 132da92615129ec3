// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Raw records through to calculation results.

use flightcalc_core::ingest::{
    aircraft_table, airport_table, AircraftRecord, AirportRecord, RequestRecord,
};
use flightcalc_core::{
    CalculationError, EngineConfig, FlightEngine, IngestError, Route, SeatCapacity, UkAirport,
};

fn airport(code: &str, a: &str, b: &str) -> AirportRecord {
    AirportRecord {
        code: code.to_string(),
        name: format!("{} International", code),
        distance_a: a.to_string(),
        distance_b: b.to_string(),
    }
}

fn aircraft(kind: &str, cost: &str, range: &str, capacity: &str) -> AircraftRecord {
    AircraftRecord {
        aircraft_type: kind.to_string(),
        running_cost: cost.to_string(),
        max_range: range.to_string(),
        capacity: Some(capacity.to_string()),
        economy: None,
        business: None,
        first: None,
    }
}

fn request(uk: &str, overseas: &str, kind: &str, seats: &str, price: &str) -> RequestRecord {
    RequestRecord {
        uk_airport: uk.to_string(),
        overseas_airport: overseas.to_string(),
        aircraft_type: kind.to_string(),
        economy_seats: Some(seats.to_string()),
        economy_price: Some(price.to_string()),
        ..RequestRecord::default()
    }
}

fn engine() -> FlightEngine {
    let airports = airport_table(vec![
        airport("JFK", "5000", "5500"),
        airport("BAD", "unknown", "800"),
    ])
    .unwrap();
    let fleet = aircraft_table(vec![
        aircraft("A320", "£5.00", "6000", "150"),
        aircraft("Z999", "£?", "6000", "150"),
    ])
    .unwrap();
    FlightEngine::new(airports, fleet, EngineConfig::default())
}

#[test]
fn test_currency_annotated_cost_is_used() {
    let req = request("MAN", "JFK", "A320", "150", "200").into_request(1).unwrap();
    let result = engine().calculate(&req).unwrap();
    assert_eq!(result.cost, 37500.0);
    assert_eq!(result.income, 30000.0);
}

#[test]
fn test_bad_reference_value_only_fails_requests_that_use_it() {
    let engine = engine();

    let bad_distance = request("MAN", "BAD", "A320", "10", "100").into_request(1).unwrap();
    assert_eq!(
        engine.calculate(&bad_distance).unwrap_err(),
        CalculationError::InvalidNumericData {
            field: "distance".to_string(),
            route: Route::new(UkAirport::Man, "BAD", "A320"),
        }
    );

    // Same airport from the other origin has a usable distance.
    let good_distance = request("LGW", "BAD", "A320", "10", "100").into_request(2).unwrap();
    assert_eq!(engine.calculate(&good_distance).unwrap().distance_km, 800.0);

    let bad_cost = request("MAN", "JFK", "Z999", "10", "100").into_request(3).unwrap();
    assert_eq!(
        engine.calculate(&bad_cost).unwrap_err(),
        CalculationError::InvalidNumericData {
            field: "running cost".to_string(),
            route: Route::new(UkAirport::Man, "JFK", "Z999"),
        }
    );
}

#[test]
fn test_class_capacity_columns() {
    let record = AircraftRecord {
        aircraft_type: "B787".to_string(),
        running_cost: "8".to_string(),
        max_range: "13000".to_string(),
        capacity: None,
        economy: Some("200".to_string()),
        business: Some("40".to_string()),
        first: Some("".to_string()),
    };
    let table = aircraft_table(vec![record]).unwrap();
    let b787 = table.resolve("b787").unwrap();
    match b787.capacity {
        SeatCapacity::ByClass {
            economy,
            business,
            first,
        } => {
            assert_eq!(economy, 200.0);
            assert_eq!(business, 40.0);
            assert!(first.is_nan());
        }
        other => panic!("expected class layout, got {:?}", other),
    }
}

#[test]
fn test_duplicate_codes_rejected() {
    let err = airport_table(vec![airport("JFK", "1", "2"), airport("jfk", "3", "4")]).unwrap_err();
    assert_eq!(
        err,
        IngestError::DuplicateKey {
            key: "jfk".to_string(),
            existing: "JFK".to_string(),
        }
    );
}

#[test]
fn test_missing_capacity_rejected() {
    let mut record = aircraft("A320", "5", "6000", "");
    record.capacity = None;
    let err = aircraft_table(vec![record]).unwrap_err();
    assert_eq!(err, IngestError::MissingCapacity("A320".to_string()));
}

#[test]
fn test_half_filled_class_is_rejected_not_dropped() {
    let mut record = request("MAN", "JFK", "A320", "100", "200");
    record.business_seats = Some("500".to_string());

    let err = record.into_request(7).unwrap_err();
    assert_eq!(
        err,
        IngestError::InvalidRequestField {
            row: 7,
            field: "business price".to_string(),
            value: String::new(),
        }
    );
}

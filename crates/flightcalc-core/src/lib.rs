//! Flight profit calculation engine.
//!
//! Turns a booking request plus airport and aircraft reference tables into
//! either the flight's economics or the first validation error it hits.

pub mod config;
pub mod economics;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod lookup;
pub mod models;
pub mod pipeline;

pub use config::EngineConfig;
pub use economics::{FlightEconomics, CO2_KG_PER_SEAT_KM};
pub use engine::{BatchSummary, FlightEngine, FlightOutcome};
pub use error::{CalculationError, ErrorKind, IngestError, OverbookingScope, Route};
pub use lookup::{Keyed, KeyedTable, NotFound};
pub use models::{
    Aircraft, Airport, ClassFares, Fare, FareClass, FlightRequest, SeatCapacity, UkAirport,
};

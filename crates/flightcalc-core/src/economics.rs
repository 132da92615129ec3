// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Income, cost and derived metrics for a validated flight.
//!
//! Currency and percentage values leave this module rounded to two decimal
//! places. Those rounded values are the results, not a display concern.

use serde::{Deserialize, Serialize};

use crate::models::UkAirport;
use crate::pipeline::FlightContext;

/// kg of CO2 per booked seat per km flown
pub const CO2_KG_PER_SEAT_KM: f64 = 0.115;

/// Outcome of a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEconomics {
    pub uk_airport: UkAirport,
    pub overseas_airport: String,
    pub overseas_airport_name: String,
    pub aircraft_type: String,
    pub distance_km: f64,
    pub seats_booked: u64,
    pub income: f64,
    pub cost: f64,
    pub profit: f64,
    /// `None` when income is zero
    pub profit_margin: Option<f64>,
    pub break_even_seats: Option<u32>,
    pub load_factor: Option<f64>,
    pub co2_emissions_kg: Option<f64>,
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Margin as a percentage of income.
pub fn profit_margin(profit: f64, income: f64) -> Option<f64> {
    if income == 0.0 {
        return None;
    }
    Some(round2(profit / income * 100.0))
}

/// Seats to sell at the plain mean of the offered prices to cover `total_cost`.
///
/// `None` when no price is offered, the mean is zero, or the answer does not
/// fit a seat count.
pub fn break_even_seats(total_cost: f64, prices: &[f64]) -> Option<u32> {
    if prices.is_empty() {
        return None;
    }
    let average_fare = prices.iter().sum::<f64>() / prices.len() as f64;
    if average_fare <= 0.0 {
        return None;
    }
    let seats = (total_cost / average_fare).ceil();
    if !seats.is_finite() || seats > f64::from(u32::MAX) {
        return None;
    }
    Some(seats as u32)
}

pub fn load_factor(seats_booked: u64, capacity: u64) -> Option<f64> {
    if capacity == 0 {
        return None;
    }
    Some(round2(seats_booked as f64 / capacity as f64 * 100.0))
}

pub fn co2_emissions_kg(distance_km: f64, seats_booked: u64) -> f64 {
    round2(distance_km * seats_booked as f64 * CO2_KG_PER_SEAT_KM)
}

/// Derives every metric from a context that passed the whole pipeline.
pub fn compute(ctx: &FlightContext<'_>) -> FlightEconomics {
    let income = round2(ctx.income);
    let cost = round2(ctx.total_cost);
    let profit = round2(income - cost);

    let break_even = if ctx.config.report_break_even {
        let prices: Vec<f64> = ctx.request.fares.present().map(|(_, f)| f.price).collect();
        break_even_seats(cost, &prices)
    } else {
        None
    };

    let load = if ctx.config.report_load_factor {
        load_factor(ctx.seats_booked, ctx.limits.total)
    } else {
        None
    };

    let co2 = ctx
        .config
        .report_co2
        .then(|| co2_emissions_kg(ctx.distance_km, ctx.seats_booked));

    FlightEconomics {
        uk_airport: ctx.request.uk_airport,
        overseas_airport: ctx.airport.code.clone(),
        overseas_airport_name: ctx.airport.name.clone(),
        aircraft_type: ctx.aircraft.aircraft_type.clone(),
        distance_km: ctx.distance_km,
        seats_booked: ctx.seats_booked,
        income,
        cost,
        profit,
        profit_margin: profit_margin(profit, income),
        break_even_seats: break_even,
        load_factor: load,
        co2_emissions_kg: co2,
    }
}

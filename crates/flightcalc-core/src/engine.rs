// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::economics::{self, FlightEconomics};
use crate::error::{CalculationError, ErrorKind, IngestError};
use crate::lookup::KeyedTable;
use crate::models::{Aircraft, Airport, FlightRequest};
use crate::pipeline;

/// Tagged result of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FlightOutcome {
    Success(FlightEconomics),
    Failure(CalculationError),
}

impl FlightOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlightOutcome::Success(_))
    }

    pub fn as_result(&self) -> Result<&FlightEconomics, &CalculationError> {
        match self {
            FlightOutcome::Success(economics) => Ok(economics),
            FlightOutcome::Failure(err) => Err(err),
        }
    }
}

impl From<Result<FlightEconomics, CalculationError>> for FlightOutcome {
    fn from(result: Result<FlightEconomics, CalculationError>) -> Self {
        match result {
            Ok(economics) => FlightOutcome::Success(economics),
            Err(err) => FlightOutcome::Failure(err),
        }
    }
}

/// Costs flight requests against immutable airport and aircraft tables.
///
/// Every call is independent: the engine holds no mutable state, so the same
/// request always produces the same outcome and batches can run in parallel.
#[derive(Debug, Clone)]
pub struct FlightEngine {
    airports: KeyedTable<Airport>,
    aircraft: KeyedTable<Aircraft>,
    config: EngineConfig,
}

impl FlightEngine {
    pub fn new(
        airports: KeyedTable<Airport>,
        aircraft: KeyedTable<Aircraft>,
        config: EngineConfig,
    ) -> Self {
        Self {
            airports,
            aircraft,
            config,
        }
    }

    /// Builds both tables from already typed records.
    pub fn from_records(
        airports: Vec<Airport>,
        aircraft: Vec<Aircraft>,
        config: EngineConfig,
    ) -> Result<Self, IngestError> {
        Ok(Self::new(
            KeyedTable::new(airports)?,
            KeyedTable::new(aircraft)?,
            config,
        ))
    }

    pub fn airports(&self) -> &KeyedTable<Airport> {
        &self.airports
    }

    pub fn aircraft(&self) -> &KeyedTable<Aircraft> {
        &self.aircraft
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn calculate(&self, request: &FlightRequest) -> Result<FlightEconomics, CalculationError> {
        let ctx = pipeline::run(request, &self.airports, &self.aircraft, &self.config)?;
        Ok(economics::compute(&ctx))
    }

    pub fn evaluate(&self, request: &FlightRequest) -> FlightOutcome {
        self.calculate(request).into()
    }

    /// Outcomes come back in request order. A failure never stops the batch.
    pub fn evaluate_batch(&self, requests: &[FlightRequest]) -> Vec<FlightOutcome> {
        log::debug!("[Engine] Evaluating batch of {} requests", requests.len());
        requests
            .par_iter()
            .map(|request| self.evaluate(request))
            .collect()
    }
}

/// Counts over a batch of outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures_by_kind: BTreeMap<ErrorKind, usize>,
    pub total_profit: f64,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FlightOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                FlightOutcome::Success(economics) => {
                    summary.succeeded += 1;
                    summary.total_profit += economics.profit;
                }
                FlightOutcome::Failure(err) => {
                    summary.failed += 1;
                    *summary.failures_by_kind.entry(err.kind()).or_insert(0) += 1;
                }
            }
        }
        summary.total_profit = economics::round2(summary.total_profit);
        summary
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::UkAirport;

fn enabled() -> bool {
    true
}

fn default_primary_origin() -> UkAirport {
    UkAirport::Man
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Origin whose distance is the airport's first distance column
    #[serde(default = "default_primary_origin")]
    pub primary_origin: UkAirport,
    #[serde(default = "enabled")]
    pub report_break_even: bool,
    #[serde(default = "enabled")]
    pub report_load_factor: bool,
    #[serde(default = "enabled")]
    pub report_co2: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primary_origin: default_primary_origin(),
            report_break_even: true,
            report_load_factor: true,
            report_co2: true,
        }
    }
}

impl EngineConfig {
    /// `engine.json` in the per-user config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "flightcalc", "FlightCalc")
            .map(|dirs| dirs.config_dir().join("engine.json"))
            .unwrap_or_else(|| PathBuf::from("engine.json"))
    }

    /// Loads a JSON config. A missing file means defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No engine config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse engine config {}", path.display()))
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use crate::snapshot::Position;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AltitudeBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AltitudeBand {
    pub const ALL: [AltitudeBand; 4] = [
        AltitudeBand::Low,
        AltitudeBand::Medium,
        AltitudeBand::High,
        AltitudeBand::VeryHigh,
    ];

    pub fn classify(altitude_km: f64) -> Self {
        if altitude_km < 10.0 {
            AltitudeBand::Low
        } else if altitude_km < 20.0 {
            AltitudeBand::Medium
        } else if altitude_km < 30.0 {
            AltitudeBand::High
        } else {
            AltitudeBand::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AltitudeBand::Low => "<10 km",
            AltitudeBand::Medium => "10-20 km",
            AltitudeBand::High => "20-30 km",
            AltitudeBand::VeryHigh => ">30 km",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AltitudeBand::Low => "#f8dda4",
            AltitudeBand::Medium => "#f9a03f",
            AltitudeBand::High => "#d45113",
            AltitudeBand::VeryHigh => "#813405",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown altitude band: {0}")]
pub struct UnknownBand(pub String);

impl FromStr for AltitudeBand {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(AltitudeBand::Low),
            "medium" => Ok(AltitudeBand::Medium),
            "high" => Ok(AltitudeBand::High),
            "very_high" | "veryhigh" => Ok(AltitudeBand::VeryHigh),
            other => Err(UnknownBand(other.to_string())),
        }
    }
}

/// Per-band visibility toggles. Everything is visible by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandFilter {
    pub low: bool,
    pub medium: bool,
    pub high: bool,
    pub very_high: bool,
}

impl Default for BandFilter {
    fn default() -> Self {
        Self {
            low: true,
            medium: true,
            high: true,
            very_high: true,
        }
    }
}

impl BandFilter {
    pub fn none() -> Self {
        Self {
            low: false,
            medium: false,
            high: false,
            very_high: false,
        }
    }

    fn slot(&mut self, band: AltitudeBand) -> &mut bool {
        match band {
            AltitudeBand::Low => &mut self.low,
            AltitudeBand::Medium => &mut self.medium,
            AltitudeBand::High => &mut self.high,
            AltitudeBand::VeryHigh => &mut self.very_high,
        }
    }

    pub fn is_enabled(&self, band: AltitudeBand) -> bool {
        match band {
            AltitudeBand::Low => self.low,
            AltitudeBand::Medium => self.medium,
            AltitudeBand::High => self.high,
            AltitudeBand::VeryHigh => self.very_high,
        }
    }

    pub fn toggle(&mut self, band: AltitudeBand) {
        let enabled = self.slot(band);
        *enabled = !*enabled;
    }

    pub fn enable(&mut self, band: AltitudeBand) {
        if !self.is_enabled(band) {
            self.toggle(band);
        }
    }

    pub fn allows(&self, position: &Position) -> bool {
        self.is_enabled(AltitudeBand::classify(position.altitude_km))
    }
}

/// Parses a comma separated list of enabled bands, e.g. `low,very_high`.
/// Bands not listed are disabled; an empty string enables nothing.
impl FromStr for BandFilter {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut filter = BandFilter::none();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            filter.enable(part.parse()?);
        }
        Ok(filter)
    }
}

//! Numeric growth parameters for a species.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("signal energy must be positive, got {0}")]
    NonPositiveEnergy(f32),
    #[error("tapering must be non-negative, got {0}")]
    NegativeTapering(f32),
    #[error("growth rate must be in (0, 1], got {0}")]
    GrowthRateOutOfRange(f32),
    #[error("max radius must be at least 1")]
    ZeroMaxRadius,
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Growth tuning shared by every pulse of a species.
///
/// ### Fields
/// - `tapering` - Cross-section added at every branch tip (pipe model).
/// - `signal_energy` - Base energy of a growth pulse.
/// - `up_probability` - Weight of continuing up the trunk.
/// - `lowest_branch_height` - Trunk steps taken before any turn is considered.
/// - `growth_rate` - Chance that a tick actually sends a pulse.
/// - `default_suitability` - Climate suitability before env factors apply.
/// - `max_radius` - Largest integer branch radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    pub tapering: f32,
    pub signal_energy: f32,
    pub up_probability: u32,
    pub lowest_branch_height: u32,
    pub growth_rate: f32,
    pub default_suitability: f32,
    pub max_radius: u32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            tapering: 0.3,
            signal_energy: 16.0,
            up_probability: 2,
            lowest_branch_height: 3,
            growth_rate: 1.0,
            default_suitability: 0.85,
            max_radius: 8,
        }
    }
}

impl GrowthParams {
    /// Conical, thick, slower growing trees.
    pub fn conifer() -> Self {
        Self {
            tapering: 0.25,
            signal_energy: 16.0,
            up_probability: 3,
            lowest_branch_height: 3,
            growth_rate: 0.9,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.signal_energy > 0.0) {
            return Err(ConfigError::NonPositiveEnergy(self.signal_energy));
        }
        if !(self.tapering >= 0.0) {
            return Err(ConfigError::NegativeTapering(self.tapering));
        }
        if !(self.growth_rate > 0.0 && self.growth_rate <= 1.0) {
            return Err(ConfigError::GrowthRateOutOfRange(self.growth_rate));
        }
        if self.max_radius == 0 {
            return Err(ConfigError::ZeroMaxRadius);
        }
        Ok(())
    }

    /// Parses parameters from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }
}

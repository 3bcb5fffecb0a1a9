use serde::{Deserialize, Serialize};

use crate::KernelError;
use crate::layout::WorldLayout;

/// Simulation tuning. Everything has a default; a YAML file may override
/// any subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per second at a tick-rate scale of 1.
    pub base_tick_rate: f64,
    /// Distance the player covers in one tick.
    pub step_distance: f64,
    /// Most ticks replayed by a single drain; older debt is dropped.
    pub max_catch_up_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_tick_rate: 50.0,
            step_distance: 0.2,
            max_catch_up_ticks: 5,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), KernelError> {
        if !(self.base_tick_rate.is_finite() && self.base_tick_rate > 0.0) {
            return Err(KernelError::InvalidConfig("base_tick_rate must be positive"));
        }
        if !(self.step_distance.is_finite() && self.step_distance > 0.0) {
            return Err(KernelError::InvalidConfig("step_distance must be positive"));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(KernelError::InvalidConfig("max_catch_up_ticks must be at least 1"));
        }
        Ok(())
    }
}

/// Top-level configuration file: simulation tuning plus world content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sim: SimConfig,
    pub layout: WorldLayout,
}

impl GameConfig {
    /// Parse and validate a YAML document. Missing sections keep defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self, KernelError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.sim.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, KernelError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fifty_hertz() {
        let c = SimConfig::default();
        assert_eq!(c.base_tick_rate, 50.0);
        assert_eq!(c.step_distance, 0.2);
        assert_eq!(c.max_catch_up_ticks, 5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = GameConfig::from_yaml_str("sim:\n  step_distance: 0.5\n").unwrap();
        assert_eq!(config.sim.step_distance, 0.5);
        assert_eq!(config.sim.base_tick_rate, 50.0);
        assert_eq!(config.layout, WorldLayout::default());
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let config = GameConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = GameConfig::from_yaml_str("sim:\n  base_tick_rate: 0\n").unwrap_err();
        assert!(matches!(err, KernelError::InvalidConfig(_)));
        let err = GameConfig::from_yaml_str("sim:\n  max_catch_up_ticks: 0\n").unwrap_err();
        assert!(matches!(err, KernelError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = GameConfig::from_yaml_str("sim: [1, 2").unwrap_err();
        assert!(matches!(err, KernelError::ConfigParse(_)));
    }

    #[test]
    fn yaml_round_trip_preserves_layout() {
        let config = GameConfig::default();
        let text = config.to_yaml_string().unwrap();
        let back = GameConfig::from_yaml_str(&text).unwrap();
        assert_eq!(back, config);
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use resonance_core::constants::{
    DEFAULT_CI_WEIGHT, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_COMPATIBILITY, DEFAULT_SYNC_WEIGHT,
    GATE_BONUS, GATE_PROXIMITY,
};
use resonance_core::{GatePolicy, NetworkOptions, ScoringPolicy, Weights};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "RESONANCE_CONFIG";

/// Scoring policy as read from TOML. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub weights: WeightsSection,
    pub gate: GateSection,
    pub network: NetworkSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightsSection {
    pub ci: f64,
    pub sync: f64,
}

impl Default for WeightsSection {
    fn default() -> Self {
        Self {
            ci: DEFAULT_CI_WEIGHT,
            sync: DEFAULT_SYNC_WEIGHT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSection {
    pub bonus: f64,
    pub proximity: i64,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            bonus: GATE_BONUS,
            proximity: GATE_PROXIMITY,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSection {
    pub min_compatibility: f64,
    pub max_connections: usize,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            min_compatibility: DEFAULT_MIN_COMPATIBILITY,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config")
    }

    /// Resolve the config source: explicit path, then `RESONANCE_CONFIG`,
    /// then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                tracing::debug!("loaded config from {}", path.display());
                Self::parse(&content)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => Self::default(),
        };

        if !config.policy().weights.is_convex() {
            tracing::warn!(
                "weights ci={} sync={} do not sum to 1; overall may leave [0, 1]",
                config.weights.ci,
                config.weights.sync
            );
        }
        Ok(config)
    }

    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            weights: Weights {
                ci: self.weights.ci,
                sync: self.weights.sync,
            },
            gate: GatePolicy {
                bonus: self.gate.bonus,
                proximity: self.gate.proximity,
            },
        }
    }

    pub fn network_options(&self) -> NetworkOptions {
        NetworkOptions {
            min_compatibility: self.network.min_compatibility,
            max_connections: self.network.max_connections,
        }
    }
}

/*!
 * Simulation Configuration
 * Bounds for randomized process requirements and driver settings
 *
 * Environment variables (all optional, unsigned integers):
 * - PROCESS_SIM_MAX_CPU_TIME
 * - PROCESS_SIM_MAX_BLOCKING_TIME
 * - PROCESS_SIM_SEED
 * - PROCESS_SIM_PROCESS_COUNT
 * - PROCESS_SIM_QUANTUM
 */

use super::errors::ConfigError;
use super::limits::{DEFAULT_PROCESS_COUNT, DEFAULT_QUANTUM, MAX_BLOCKING_TIME, MAX_CPU_TIME};
use super::types::Ticks;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const ENV_PREFIX: &str = "PROCESS_SIM_";

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SimConfig {
    /// Inclusive upper bound for drawn CPU time
    pub max_cpu_time: Ticks,
    /// Inclusive upper bound for drawn blocking time
    pub max_blocking_time: Ticks,
    /// Seed for the process factory; `None` seeds from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub process_count: usize,
    pub quantum: Ticks,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cpu_time: MAX_CPU_TIME,
            max_blocking_time: MAX_BLOCKING_TIME,
            seed: None,
            process_count: DEFAULT_PROCESS_COUNT,
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl SimConfig {
    /// Load defaults overridden by `PROCESS_SIM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults overridden by an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "MAX_CPU_TIME")? {
            config.max_cpu_time = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_BLOCKING_TIME")? {
            config.max_blocking_time = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED")? {
            config.seed = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "PROCESS_COUNT")? {
            config.process_count = v;
        }
        if let Some(v) = parse_var(&lookup, "QUANTUM")? {
            config.quantum = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let key = format!("{}{}", ENV_PREFIX, name);
    match lookup(&key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

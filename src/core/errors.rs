/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} has no parent queue to interrupt")]
    #[diagnostic(
        code(process::no_parent_queue),
        help("Call set_parent_queue before driving the process with time slices.")
    )]
    NoParentQueue(Pid),

    #[error("Parent queue of process {0} has been dropped")]
    #[diagnostic(
        code(process::queue_dropped),
        help("The queue that owned this process no longer exists. Re-parent the process.")
    )]
    QueueDropped(Pid),
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Environment overrides must be unsigned integers.")
    )]
    InvalidValue { key: String, value: String },

    #[error("Malformed configuration: {0}")]
    #[diagnostic(code(config::malformed), help("Check the JSON document against SimConfig."))]
    Malformed(String),

    #[error("Quantum must be greater than zero")]
    #[diagnostic(
        code(config::zero_quantum),
        help("A zero quantum never advances any process.")
    )]
    ZeroQuantum,
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Simulation stalled after {ticks} ticks with {remaining} processes left")]
    #[diagnostic(
        code(sim::stalled),
        help("Raise the quantum or lower the requirement bounds.")
    )]
    Stalled { ticks: u64, remaining: usize },
}

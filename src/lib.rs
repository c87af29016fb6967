/*!
 * Process Simulator Library
 * Time-slice driven process state machine and its interrupt protocol
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{ConfigError, ProcessError, ProcessResult, SimError};
pub use crate::core::types::{Pid, SimResult, Ticks};
pub use crate::core::SimConfig;
pub use monitoring::init_tracing;
pub use process::{InterruptHandler, Process, ProcessFactory};
pub use scheduler::{Interrupt, ProcessQueue, QueueType, SchedulerInterrupt, TickOutcome};

/*!
 * Simulation Limits and Constants
 *
 * Centralized location for the bounds used when process requirements are
 * drawn at random, plus the defaults of the simulation driver.
 */

use super::types::{Pid, Ticks};

// =============================================================================
// PROCESS REQUIREMENTS
// =============================================================================

/// Upper bound (inclusive) of a randomly drawn CPU time requirement
pub const MAX_CPU_TIME: Ticks = 1000;

/// Upper bound (inclusive) of a randomly drawn blocking time requirement
/// Kept an order of magnitude below CPU time: I/O waits are short phases
pub const MAX_BLOCKING_TIME: Ticks = 100;

// =============================================================================
// DRIVER DEFAULTS
// =============================================================================

/// Elapsed time handed to every process per tick
pub const DEFAULT_QUANTUM: Ticks = 10;

/// Processes spawned by the demo driver
pub const DEFAULT_PROCESS_COUNT: usize = 8;

/// Safety net for the demo driver loop
/// A run that has not drained after this many ticks is reported and stopped
pub const MAX_DRIVER_TICKS: u64 = 100_000;

/// First PID handed out by the process factory
pub const FIRST_PID: Pid = 1;

/*!
 * Scheduler Module
 * Interrupt vocabulary, the reference process queue, and the demo driver
 */

pub mod driver;
pub mod queue;
pub mod types;

// Re-export public API
pub use driver::{drive, run, SimulationReport};
pub use queue::{ProcessQueue, TickOutcome};
pub use types::{Interrupt, QueueType, SchedulerInterrupt};

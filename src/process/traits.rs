/*!
 * Process Traits
 * Capabilities a process needs from its environment
 */

use super::Process;
use crate::scheduler::SchedulerInterrupt;

/// Anything that can receive interrupts from the processes it drives
///
/// This is the only thing a process knows about its queue. Implementors are
/// shared behind `Arc`, so state changes go through interior mutability.
pub trait InterruptHandler: Send + Sync {
    /// Receive `interrupt` raised by `process`
    fn emit_interrupt(&self, process: &Process, interrupt: SchedulerInterrupt);
}

/*!
 * Process Control
 * A single schedulable unit of simulated work and its time-slice state machine
 */

use super::traits::InterruptHandler;
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::{MAX_BLOCKING_TIME, MAX_CPU_TIME};
use crate::core::types::{Pid, Ticks};
use crate::scheduler::SchedulerInterrupt;
use rand::Rng;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Simulated process with CPU and optional blocking time requirements
///
/// The process is owned by whichever queue currently drives it and only keeps
/// a weak handle back to that queue for raising interrupts.
pub struct Process {
    pid: Pid,
    cpu_time_remaining: Ticks,
    blocking_time_remaining: Ticks,
    queue: Option<Weak<dyn InterruptHandler>>,
    state_changed: bool,
}

impl Process {
    /// Create a process, drawing unspecified requirements from `rng`
    ///
    /// `None` CPU time draws uniformly from `[0, MAX_CPU_TIME]`. A blocking
    /// process draws its blocking time from `[0, MAX_BLOCKING_TIME]`; a
    /// non-blocking one gets none. An explicit `Some(0)` is kept as zero CPU
    /// time rather than treated as missing.
    pub fn new<R: Rng + ?Sized>(
        pid: Pid,
        cpu_time_needed: Option<Ticks>,
        blocking: bool,
        rng: &mut R,
    ) -> Self {
        let (cpu, blocking_time) = draw_requirements(
            cpu_time_needed,
            blocking,
            MAX_CPU_TIME,
            MAX_BLOCKING_TIME,
            rng,
        );
        Self::with_requirements(pid, cpu, blocking_time)
    }

    /// Create a process with fully explicit requirements
    pub fn with_requirements(pid: Pid, cpu_time: Ticks, blocking_time: Ticks) -> Self {
        debug!(pid, cpu_time, blocking_time, "process created");
        Self {
            pid,
            cpu_time_remaining: cpu_time,
            blocking_time_remaining: blocking_time,
            queue: None,
            state_changed: false,
        }
    }

    /// Register the queue that receives this process's interrupts
    ///
    /// Replaces any previous queue; only a weak handle is kept.
    pub fn set_parent_queue<Q>(&mut self, queue: &Arc<Q>)
    where
        Q: InterruptHandler + 'static,
    {
        let handle: Weak<Q> = Arc::downgrade(queue);
        self.queue = Some(handle);
    }

    /// True once neither CPU nor blocking time is owed
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cpu_time_remaining == 0 && self.blocking_time_remaining == 0
    }

    /// Run one CPU time slice
    ///
    /// Consumes CPU time only when no blocking time is owed. Otherwise the CPU
    /// counter is left alone and `ProcessBlocked` is raised. Finishing is not
    /// signalled; drivers poll `is_finished`.
    ///
    /// # Errors
    /// Fails when the blocked interrupt cannot be delivered. The counters and
    /// the state flag are already updated at that point.
    pub fn execute_process(&mut self, elapsed: Ticks) -> ProcessResult<()> {
        self.state_changed = false;

        if self.blocking_time_remaining == 0 {
            self.cpu_time_remaining = self.cpu_time_remaining.saturating_sub(elapsed);
            debug!(
                pid = self.pid,
                elapsed,
                cpu_time_remaining = self.cpu_time_remaining,
                "consumed cpu time"
            );
            Ok(())
        } else {
            self.state_changed = true;
            self.raise(SchedulerInterrupt::ProcessBlocked)
        }
    }

    /// Run one blocking (I/O wait) time slice
    ///
    /// Raises `ProcessReady` when the blocking time reaches zero. Unlike
    /// `execute_process` this does not clear the state flag on entry.
    ///
    /// # Errors
    /// Fails when the ready interrupt cannot be delivered.
    pub fn execute_blocking_process(&mut self, elapsed: Ticks) -> ProcessResult<()> {
        self.blocking_time_remaining = self.blocking_time_remaining.saturating_sub(elapsed);
        debug!(
            pid = self.pid,
            elapsed,
            blocking_time_remaining = self.blocking_time_remaining,
            "consumed blocking time"
        );

        if self.blocking_time_remaining == 0 {
            self.state_changed = true;
            self.raise(SchedulerInterrupt::ProcessReady)
        } else {
            Ok(())
        }
    }

    /// Whether the last slice raised an interrupt
    #[inline]
    pub fn is_state_changed(&self) -> bool {
        self.state_changed
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn cpu_time_remaining(&self) -> Ticks {
        self.cpu_time_remaining
    }

    #[inline]
    pub fn blocking_time_remaining(&self) -> Ticks {
        self.blocking_time_remaining
    }

    /// Currently registered queue, if it is still alive
    ///
    /// For verifying parenting in tests; drivers must not route through it.
    #[doc(hidden)]
    pub fn parent_queue(&self) -> Option<Arc<dyn InterruptHandler>> {
        self.queue.as_ref().and_then(Weak::upgrade)
    }

    fn raise(&self, interrupt: SchedulerInterrupt) -> ProcessResult<()> {
        let queue = match self.queue.as_ref() {
            Some(handle) => handle
                .upgrade()
                .ok_or(ProcessError::QueueDropped(self.pid)),
            None => Err(ProcessError::NoParentQueue(self.pid)),
        };

        match queue {
            Ok(queue) => {
                debug!(pid = self.pid, %interrupt, "raising interrupt");
                queue.emit_interrupt(self, interrupt);
                Ok(())
            }
            Err(e) => {
                warn!(pid = self.pid, %interrupt, error = %e, "interrupt not delivered");
                Err(e)
            }
        }
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("pid", &self.pid)
            .field("cpu_time_remaining", &self.cpu_time_remaining)
            .field("blocking_time_remaining", &self.blocking_time_remaining)
            .field("has_queue", &self.queue.is_some())
            .field("state_changed", &self.state_changed)
            .finish()
    }
}

/// Resolve CPU and blocking requirements, drawing whatever is not given
pub(crate) fn draw_requirements<R: Rng + ?Sized>(
    cpu_time_needed: Option<Ticks>,
    blocking: bool,
    max_cpu_time: Ticks,
    max_blocking_time: Ticks,
    rng: &mut R,
) -> (Ticks, Ticks) {
    let cpu = cpu_time_needed.unwrap_or_else(|| rng.gen_range(0..=max_cpu_time));
    let blocking_time = if blocking {
        rng.gen_range(0..=max_blocking_time)
    } else {
        0
    };
    (cpu, blocking_time)
}

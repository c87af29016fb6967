/*!
 * Process Queue
 * FIFO pool of processes that drives them one slice per tick
 *
 * A queue owns its processes outright; each process only holds a weak handle
 * back to the queue, so there is no ownership cycle. Interrupts raised during
 * a tick decide which processes leave the queue for relocation.
 */

use super::types::{Interrupt, QueueType, SchedulerInterrupt};
use crate::core::errors::ProcessResult;
use crate::core::types::{Pid, Ticks};
use crate::process::{InterruptHandler, Process};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};

/// Processes handed back to the driver after a tick
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Raised an interrupt this tick and must move to another queue
    pub relocated: Vec<Process>,
    /// Owe no more time; the driver disposes of them
    pub finished: Vec<Process>,
    /// Interrupts raised this tick, in emission order
    pub interrupts: Vec<Interrupt>,
}

impl TickOutcome {
    pub fn is_empty(&self) -> bool {
        self.relocated.is_empty() && self.finished.is_empty()
    }
}

/// Queue modelling either the CPU pool or the blocked pool
pub struct ProcessQueue {
    queue_type: QueueType,
    processes: Mutex<VecDeque<Process>>,
    interrupts: Mutex<VecDeque<Interrupt>>,
}

impl ProcessQueue {
    pub fn new(queue_type: QueueType) -> Arc<Self> {
        info!(?queue_type, "process queue initialized");
        Arc::new(Self {
            queue_type,
            processes: Mutex::new(VecDeque::new()),
            interrupts: Mutex::new(VecDeque::new()),
        })
    }

    /// Take ownership of `process` and make this queue its parent
    pub fn enqueue(self: &Arc<Self>, mut process: Process) {
        process.set_parent_queue(self);
        debug!(pid = process.pid(), queue_type = ?self.queue_type, "process enqueued");
        self.processes.lock().push_back(process);
    }

    /// Give up the process at the front of the queue
    pub fn dequeue(&self) -> Option<Process> {
        self.processes.lock().pop_front()
    }

    /// Give up a specific process
    pub fn remove(&self, pid: Pid) -> Option<Process> {
        let mut processes = self.processes.lock();
        let pos = processes.iter().position(|p| p.pid() == pid)?;
        processes.remove(pos)
    }

    /// Advance every owned process by one slice of `elapsed`
    ///
    /// CPU queues call `execute_process`, blocking queues call
    /// `execute_blocking_process`. Processes that raised an interrupt are
    /// removed and returned for relocation; finished ones are removed and
    /// returned for disposal. Everything else stays in order.
    ///
    /// Interrupts still buffered from outside a tick are discarded first;
    /// callers that want them must `drain_interrupts` beforehand.
    pub fn tick(&self, elapsed: Ticks) -> ProcessResult<TickOutcome> {
        let mut processes = self.processes.lock();

        {
            let mut interrupts = self.interrupts.lock();
            if !interrupts.is_empty() {
                debug!(
                    discarded = interrupts.len(),
                    queue_type = ?self.queue_type,
                    "dropping undrained interrupts"
                );
                interrupts.clear();
            }
        }

        // Matched by position, not pid: pids are not required to be unique
        let mut raised = Vec::with_capacity(processes.len());
        for process in processes.iter_mut() {
            let before = self.interrupts.lock().len();
            match self.queue_type {
                QueueType::Cpu => process.execute_process(elapsed)?,
                QueueType::Blocking => process.execute_blocking_process(elapsed)?,
            }
            raised.push(self.interrupts.lock().len() > before);
        }

        let mut outcome = TickOutcome {
            interrupts: self.interrupts.lock().drain(..).collect(),
            ..TickOutcome::default()
        };
        let mut kept = VecDeque::with_capacity(processes.len());
        for (process, interrupted) in processes.drain(..).zip(raised) {
            if interrupted {
                outcome.relocated.push(process);
            } else if process.is_finished() {
                outcome.finished.push(process);
            } else {
                kept.push_back(process);
            }
        }
        *processes = kept;

        Ok(outcome)
    }

    /// Take every interrupt recorded outside of `tick`
    ///
    /// Must be called before the next `tick`, which discards them.
    pub fn drain_interrupts(&self) -> Vec<Interrupt> {
        self.interrupts.lock().drain(..).collect()
    }

    pub fn queue_type(&self) -> QueueType {
        self.queue_type
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.processes.lock().iter().map(Process::pid).collect()
    }

    pub fn len(&self) -> usize {
        self.processes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InterruptHandler for ProcessQueue {
    fn emit_interrupt(&self, process: &Process, interrupt: SchedulerInterrupt) {
        debug!(
            pid = process.pid(),
            %interrupt,
            queue_type = ?self.queue_type,
            "interrupt received"
        );
        self.interrupts.lock().push_back(Interrupt {
            pid: process.pid(),
            kind: interrupt,
        });
    }
}

/*!
 * Simulation Driver
 * Shuttles processes between a CPU queue and a blocking queue until all finish
 */

use super::queue::{ProcessQueue, TickOutcome};
use super::types::{QueueType, SchedulerInterrupt};
use crate::core::config::SimConfig;
use crate::core::errors::SimError;
use crate::core::limits::MAX_DRIVER_TICKS;
use crate::core::types::{Pid, SimResult, Ticks};
use crate::monitoring::span_tick;
use crate::process::{Process, ProcessFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationReport {
    pub ticks: u64,
    /// PIDs in the order they finished
    pub completed: Vec<Pid>,
    pub blocked_interrupts: u64,
    pub ready_interrupts: u64,
}

/// Spawn `config.process_count` processes (every other one blocking) and run them
pub fn run(config: &SimConfig) -> SimResult<SimulationReport> {
    config.validate()?;

    let mut factory = ProcessFactory::from_config(config);
    let processes = (0..config.process_count)
        .map(|i| factory.spawn(None, i % 2 == 1))
        .collect();

    drive(processes, config.quantum)
}

/// Drive `processes` with `quantum` per tick until every one has finished
///
/// Each tick gives every CPU-queue process one CPU slice and every
/// blocking-queue process one blocking slice. Relocations take effect after
/// both queues have ticked, so no process is advanced twice in one tick.
pub fn drive(processes: Vec<Process>, quantum: Ticks) -> SimResult<SimulationReport> {
    let cpu = ProcessQueue::new(QueueType::Cpu);
    let blocked = ProcessQueue::new(QueueType::Blocking);

    for process in processes {
        cpu.enqueue(process);
    }
    info!(processes = cpu.len(), quantum, "simulation started");

    let mut report = SimulationReport::default();

    while !(cpu.is_empty() && blocked.is_empty()) {
        if report.ticks >= MAX_DRIVER_TICKS {
            return Err(SimError::Stalled {
                ticks: report.ticks,
                remaining: cpu.len() + blocked.len(),
            });
        }
        report.ticks += 1;

        let span = span_tick(report.ticks, quantum);
        let _entered = span.enter();

        let from_cpu = cpu.tick(quantum)?;
        let from_blocked = blocked.tick(quantum)?;

        settle(&mut report, from_cpu, &blocked);
        settle(&mut report, from_blocked, &cpu);
    }

    info!(
        ticks = report.ticks,
        completed = report.completed.len(),
        "simulation finished"
    );
    Ok(report)
}

fn settle(report: &mut SimulationReport, outcome: TickOutcome, target: &Arc<ProcessQueue>) {
    for interrupt in &outcome.interrupts {
        match interrupt.kind {
            SchedulerInterrupt::ProcessBlocked => report.blocked_interrupts += 1,
            SchedulerInterrupt::ProcessReady => report.ready_interrupts += 1,
        }
    }

    for process in outcome.finished {
        info!(pid = process.pid(), tick = report.ticks, "process finished");
        report.completed.push(process.pid());
    }

    for process in outcome.relocated {
        info!(
            pid = process.pid(),
            to = ?target.queue_type(),
            "process relocated"
        );
        target.enqueue(process);
    }
}

/*!
 * Process Factory
 * Seeded construction of processes with sequential PIDs
 */

use super::control::{draw_requirements, Process};
use crate::core::config::SimConfig;
use crate::core::limits::{FIRST_PID, MAX_BLOCKING_TIME, MAX_CPU_TIME};
use crate::core::types::{Pid, Ticks};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Creates processes from a single injectable random source
pub struct ProcessFactory<R: Rng = StdRng> {
    rng: R,
    next_pid: Pid,
    max_cpu_time: Ticks,
    max_blocking_time: Ticks,
}

impl ProcessFactory<StdRng> {
    /// Factory with default bounds, seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic factory with default bounds
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Factory honouring the bounds and seed of `config`
    pub fn from_config(config: &SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            seed = ?config.seed,
            max_cpu_time = config.max_cpu_time,
            max_blocking_time = config.max_blocking_time,
            "process factory initialized"
        );
        Self::with_rng(rng).with_bounds(config.max_cpu_time, config.max_blocking_time)
    }
}

impl<R: Rng> ProcessFactory<R> {
    /// Factory drawing from any caller-supplied generator
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            next_pid: FIRST_PID,
            max_cpu_time: MAX_CPU_TIME,
            max_blocking_time: MAX_BLOCKING_TIME,
        }
    }

    /// Override the inclusive upper bounds of drawn requirements
    pub fn with_bounds(mut self, max_cpu_time: Ticks, max_blocking_time: Ticks) -> Self {
        self.max_cpu_time = max_cpu_time;
        self.max_blocking_time = max_blocking_time;
        self
    }

    /// Create the next process
    pub fn spawn(&mut self, cpu_time_needed: Option<Ticks>, blocking: bool) -> Process {
        let pid = self.next_pid;
        self.next_pid = self.next_pid.wrapping_add(1);

        let (cpu, blocking_time) = draw_requirements(
            cpu_time_needed,
            blocking,
            self.max_cpu_time,
            self.max_blocking_time,
            &mut self.rng,
        );
        Process::with_requirements(pid, cpu, blocking_time)
    }

    /// PID the next spawned process will get
    pub fn next_pid(&self) -> Pid {
        self.next_pid
    }
}

impl Default for ProcessFactory<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

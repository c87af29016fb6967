/*!
 * Scheduler Types
 * Interrupt vocabulary shared between processes and their queues
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interrupt a process raises against its parent queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerInterrupt {
    /// Process still owes blocking time; move it out of the CPU pool
    ProcessBlocked,
    /// Blocking time is exhausted; move it back into the CPU pool
    ProcessReady,
}

impl SchedulerInterrupt {
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProcessBlocked => "PROCESS_BLOCKED",
            Self::ProcessReady => "PROCESS_READY",
        }
    }
}

impl fmt::Display for SchedulerInterrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of pool a queue models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueType {
    /// Ready processes consuming CPU time
    Cpu,
    /// Processes waiting out their blocking time
    Blocking,
}

/// Interrupt as recorded by a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Interrupt {
    pub pid: Pid,
    pub kind: SchedulerInterrupt,
}

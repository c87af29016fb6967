/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time units (CPU or blocking time)
///
/// Unsigned so that a negative elapsed time cannot be expressed at all.
pub type Ticks = u64;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;

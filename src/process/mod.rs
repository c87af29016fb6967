/*!
 * Process Module
 * Simulated processes, their interrupt capability, and construction
 */

pub mod control;
pub mod factory;
pub mod traits;

// Re-export for convenience
pub use control::Process;
pub use factory::ProcessFactory;
pub use traits::InterruptHandler;

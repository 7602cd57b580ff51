//! # simsweep-scheduler
//!
//! The orchestration side of the cleanup engine: the fixed round
//! template, the just-in-time task scheduler with its reconciliation
//! tick, the lease-based agent reservation protocol, and the built-in
//! agents that execute the storage-less tasks in-process.

pub mod agents;
pub mod reservation;
pub mod scheduler;
pub mod template;

pub use agents::{run_internal_agents, IInternalAgent};
pub use reservation::AgentTaskManager;
pub use scheduler::CleanupScheduler;
pub use template::{round_template, TaskTemplate};

//! # simsweep-storage
//!
//! In-memory reference implementation of [`ICleanupStore`].
//!
//! All tables live behind one mutex, so the reservation compare-and-swap
//! is serialized and the at-most-one-agent-per-task guarantee holds for
//! concurrent callers. A durable relational backend can implement the
//! same trait; this store is the contract's executable reference.
//!
//! [`ICleanupStore`]: simsweep_core::traits::ICleanupStore

pub mod memory_store;

pub use memory_store::MemoryStore;

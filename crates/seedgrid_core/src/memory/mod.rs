//! # Memory Management
//!
//! Reusable scratch buffers for hot evaluation loops.
//!
//! ## Design Philosophy
//!
//! Buffers are recycled per evaluation pass instead of reallocated:
//! - `acquire` hands out a buffer of at least the requested size
//! - `release` makes everything handed out since the last release reusable
//! - Free lists shrink by one entry per class each release

mod pool;

pub use pool::{BufferPool, ClassStats, IntBuffer, PoolStats, SizeClass};

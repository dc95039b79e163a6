//! # SEEDGRID Core Storage
//!
//! Allocation-light storage for per-cell integer computation, evaluated
//! millions of times across candidate world seeds:
//! - [`VolumeStore`]: a growable 3D integer volume with a default value
//! - [`BufferPool`]: recycled integer scratch buffers in two size classes
//!
//! ## Architecture Rules
//!
//! 1. **Recycle, don't allocate** - scratch memory lives for a whole pass
//! 2. **Grow without loss** - volume growth never corrupts stored cells
//! 3. **Reject before mutating** - inverted boxes fail fast
//!
//! ## Example
//!
//! ```rust
//! use seedgrid_core::{BufferPool, PoolConfig, VolumeStore};
//!
//! let pool = BufferPool::new(PoolConfig::default());
//! let mut volume = VolumeStore::new(-1);
//!
//! let mut scratch = pool.acquire(64);
//! scratch[0] = 7;
//! volume.set(1, 2, 3, scratch[0]);
//! drop(scratch);
//! pool.release();
//!
//! assert_eq!(volume.get(1, 2, 3), 7);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;
pub mod volume;

pub use config::{PoolConfig, DEFAULT_SMALL_CAPACITY};
pub use error::{GridError, GridResult};
pub use memory::{BufferPool, ClassStats, IntBuffer, PoolStats, SizeClass};
pub use volume::{linear_index, Bounds3, VolumeStore};

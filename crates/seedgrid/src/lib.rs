//! # SEEDGRID
//!
//! Evaluation passes over per-seed cell data.
//!
//! Each pass borrows scratch buffers from a [`BufferPool`](seedgrid_core::BufferPool),
//! writes results into a [`VolumeStore`](seedgrid_core::VolumeStore), and returns the
//! scratch with a single release. The volume is pruned periodically so memory
//! stays bounded across millions of seeds.
//!
//! ## Example
//!
//! ```rust
//! use seedgrid::{SeedSweep, SweepConfig};
//!
//! let mut sweep = SeedSweep::new(SweepConfig::default());
//! let sums = sweep.run(0..4u64, |pass| {
//!     let seed = pass.seed() as i32;
//!     let mut scratch = pass.scratch(8);
//!     scratch[..8].fill(seed);
//!     let sum: i32 = scratch[..8].iter().sum();
//!     pass.volume().set(seed, 0, 0, sum);
//!     sum
//! });
//!
//! assert_eq!(sums, vec![(0, 0), (1, 8), (2, 16), (3, 24)]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod sweep;

/// Re-export core storage.
pub use seedgrid_core as core;

pub use sweep::{PassContext, SeedSweep, SweepConfig, SweepStats};

//! # Dynamic Volumes
//!
//! Growable integer volumes addressed by 3D cell coordinates.
//!
//! ## Design Philosophy
//!
//! One contiguous buffer per volume:
//! - Reads outside the box are free and return the default value
//! - Writes grow the box axis by axis, never corrupting stored cells
//! - `prune` hands memory back between evaluation passes

mod bounds;
mod render;
mod store;

pub use bounds::{linear_index, Bounds3, AXIS_NAMES};
pub use store::VolumeStore;

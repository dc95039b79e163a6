//! # Cell Bounds
//!
//! Inclusive axis-aligned boxes and the one place where a cell coordinate is
//! turned into a linear buffer index.
//!
//! ## Layout
//!
//! ```text
//! index = (x - origin.x) + ((y - origin.y) + (z - origin.z) * size.y) * size.x
//! ```
//!
//! x varies fastest, then y, then z. Offsets wrap like `i32` arithmetic, so a
//! box translated past `i32::MAX` continues at `i32::MIN`.

use crate::error::{GridError, GridResult};

/// Axis labels in storage order.
pub const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

/// Number of cells spanned by the inclusive range `min..=max`.
#[inline]
pub(crate) fn span(min: i32, max: i32) -> usize {
    usize::try_from(i64::from(max) - i64::from(min) + 1).unwrap_or(0)
}

/// Distance from `origin` up to `coord`, wrapping like `i32` arithmetic.
#[inline]
pub(crate) fn wrapped_offset(origin: i32, coord: i32) -> usize {
    coord.wrapping_sub(origin) as u32 as usize
}

/// Linear index of `coord` inside the box starting at `origin` with extent
/// `size`, or `None` if the coordinate lies outside.
///
/// # Example
///
/// ```rust
/// use seedgrid_core::volume::linear_index;
///
/// assert_eq!(linear_index([0, 0, 0], [4, 3, 2], [1, 2, 1]), Some(1 + (2 + 3) * 4));
/// assert_eq!(linear_index([0, 0, 0], [4, 3, 2], [4, 0, 0]), None);
/// ```
#[inline]
#[must_use]
pub fn linear_index(origin: [i32; 3], size: [usize; 3], coord: [i32; 3]) -> Option<usize> {
    let mut local = [0usize; 3];
    for axis in 0..3 {
        let offset = wrapped_offset(origin[axis], coord[axis]);
        if offset >= size[axis] {
            return None;
        }
        local[axis] = offset;
    }
    Some(local[0] + (local[1] + local[2] * size[1]) * size[0])
}

/// An inclusive, axis-aligned box of cell coordinates.
///
/// A `Bounds3` always has `min <= max` on every axis; the constructor rejects
/// anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds3 {
    min: [i32; 3],
    max: [i32; 3],
}

impl Bounds3 {
    /// Creates a box from its inclusive corners.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvertedBounds`] naming the first axis where
    /// `max < min`.
    pub fn new(min: [i32; 3], max: [i32; 3]) -> GridResult<Self> {
        for axis in 0..3 {
            if max[axis] < min[axis] {
                return Err(GridError::InvertedBounds {
                    axis: AXIS_NAMES[axis],
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// A box holding exactly one cell.
    #[inline]
    #[must_use]
    pub const fn point(coord: [i32; 3]) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Inclusive minimum corner.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> [i32; 3] {
        self.min
    }

    /// Inclusive maximum corner.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> [i32; 3] {
        self.max
    }

    /// Number of cells along each axis.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> [usize; 3] {
        [
            span(self.min[0], self.max[0]),
            span(self.min[1], self.max[1]),
            span(self.min[2], self.max[2]),
        ]
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> usize {
        self.extent().iter().product()
    }

    /// Returns true if `coord` lies inside the box.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: [i32; 3]) -> bool {
        (0..3).all(|axis| self.min[axis] <= coord[axis] && coord[axis] <= self.max[axis])
    }
}

//! # Volume Store
//!
//! A map from integer 3D coordinates to integer values backed by one
//! contiguous buffer. Cells never written read as the store's default value.
//!
//! The buffer covers a single box (`origin`, `size`). Writing outside the box
//! grows it one axis at a time: x first, then y, then z. Each axis grows only
//! on the side that is out of bounds, and every existing cell is copied to its
//! new position before the next axis is checked.
//!
//! Coordinates wrap like `i32` arithmetic: a box moved past `i32::MAX`
//! continues at `i32::MIN`, and every operation agrees on where its cells are.
//!
//! ```text
//! grow x by 2 below:           grow z by 1 above:
//!   . . [a b c]                  z0: [a b c]
//!   . . [d e f]                  z1:  . . .
//! ```

use crate::error::GridResult;

use super::bounds::{linear_index, span, wrapped_offset, Bounds3};

/// A growable 3D integer volume with a fixed default value.
///
/// # Thread Safety
///
/// Not synchronized. Give each worker its own store or serialize access.
///
/// # Example
///
/// ```rust
/// use seedgrid_core::VolumeStore;
///
/// let mut volume = VolumeStore::new(-1);
/// volume.set(5, 5, 5, 7);
/// volume.set(-3, 5, 5, 9);
///
/// assert_eq!(volume.get(5, 5, 5), 7);
/// assert_eq!(volume.get(-3, 5, 5), 9);
/// assert_eq!(volume.get(0, 0, 0), -1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeStore {
    /// Minimum allocated coordinate.
    origin: [i32; 3],
    /// Allocated extent per axis. All zero when unallocated.
    size: [usize; 3],
    /// Cell values, `len == size.x * size.y * size.z`.
    cells: Vec<i32>,
    /// Value reported for unset cells.
    default_value: i32,
}

impl VolumeStore {
    /// Creates an empty, unallocated store.
    #[must_use]
    pub const fn new(default_value: i32) -> Self {
        Self {
            origin: [0; 3],
            size: [0; 3],
            cells: Vec::new(),
            default_value,
        }
    }

    /// Creates a store allocated to exactly the given box.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvertedBounds`](crate::GridError::InvertedBounds)
    /// if `max < min` on any axis.
    pub fn with_bounds(default_value: i32, min: [i32; 3], max: [i32; 3]) -> GridResult<Self> {
        let mut volume = Self::new(default_value);
        volume.erase_and_allocate(min, max)?;
        Ok(volume)
    }

    /// Value reported for every unset cell.
    #[inline]
    #[must_use]
    pub const fn default_value(&self) -> i32 {
        self.default_value
    }

    /// Returns true if the store currently holds an allocation.
    #[inline]
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.size.iter().all(|&s| s > 0)
    }

    /// Minimum allocated coordinate.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> [i32; 3] {
        self.origin
    }

    /// Allocated extent per axis.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> [usize; 3] {
        self.size
    }

    /// Number of allocated cells.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> usize {
        self.size.iter().product()
    }

    /// The allocated box, or `None` when unallocated.
    ///
    /// When the box wraps past `i32::MAX` its max corner is clamped there; the
    /// wrapped cells are still readable through [`VolumeStore::get`].
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds3> {
        if !self.is_allocated() {
            return None;
        }
        let mut max = self.origin;
        for axis in 0..3 {
            let end = i64::from(self.origin[axis]) + self.size[axis] as i64 - 1;
            max[axis] = i32::try_from(end).unwrap_or(i32::MAX);
        }
        Bounds3::new(self.origin, max).ok()
    }

    /// Reads a cell. Coordinates outside the allocation read as the default.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> i32 {
        linear_index(self.origin, self.size, [x, y, z])
            .map_or(self.default_value, |index| self.cells[index])
    }

    /// Writes a cell, growing the allocation first if needed.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: i32) {
        self.ensure_allocated_at(x, y, z);
        if let Some(index) = linear_index(self.origin, self.size, [x, y, z]) {
            self.cells[index] = value;
        }
    }

    /// Writes `value` to every cell of the closed box `min..=max`.
    ///
    /// An inverted box is treated as empty and leaves the store untouched.
    pub fn fill(&mut self, min: [i32; 3], max: [i32; 3], value: i32) {
        let Ok(bounds) = Bounds3::new(min, max) else {
            tracing::debug!(?min, ?max, "ignoring fill over inverted box");
            return;
        };
        self.grow_to_cover(&bounds);

        let row_len = span(min[0], max[0]);
        for z in min[2]..=max[2] {
            for y in min[1]..=max[1] {
                if let Some(start) = linear_index(self.origin, self.size, [min[0], y, z]) {
                    self.cells[start..start + row_len].fill(value);
                }
            }
        }
    }

    /// Shifts the coordinate frame by `(dx, dy, dz)`.
    ///
    /// Stored values are untouched; each one now reports at its shifted
    /// coordinate. The origin wraps on overflow.
    #[inline]
    pub fn move_all(&mut self, dx: i32, dy: i32, dz: i32) {
        self.origin[0] = self.origin[0].wrapping_add(dx);
        self.origin[1] = self.origin[1].wrapping_add(dy);
        self.origin[2] = self.origin[2].wrapping_add(dz);
    }

    /// Resets every allocated cell to the default value. The box is kept.
    pub fn clear(&mut self) {
        self.cells.fill(self.default_value);
    }

    /// Drops the allocation entirely.
    pub fn erase(&mut self) {
        self.origin = [0; 3];
        self.size = [0; 3];
        self.cells = Vec::new();
    }

    /// Resets to default and allocates exactly the box `min..=max`.
    ///
    /// The existing buffer is reused only if its length already equals the
    /// new volume.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvertedBounds`](crate::GridError::InvertedBounds)
    /// if `max < min` on any axis. The store is unchanged in that case.
    pub fn erase_and_allocate(&mut self, min: [i32; 3], max: [i32; 3]) -> GridResult<()> {
        let bounds = Bounds3::new(min, max)?;
        let volume = bounds.volume();
        if self.cells.len() == volume {
            self.cells.fill(self.default_value);
        } else {
            self.cells = vec![self.default_value; volume];
        }
        self.origin = bounds.min();
        self.size = bounds.extent();
        Ok(())
    }

    /// Moves the box to `min..=max` and resets it to default.
    ///
    /// The backing allocation is grown when the new volume exceeds it and is
    /// otherwise kept, so shrinking never frees memory.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvertedBounds`](crate::GridError::InvertedBounds)
    /// if `max < min` on any axis. The store is unchanged in that case.
    pub fn reallocate(&mut self, min: [i32; 3], max: [i32; 3]) -> GridResult<()> {
        let bounds = Bounds3::new(min, max)?;
        self.cells.clear();
        self.cells.resize(bounds.volume(), self.default_value);
        self.origin = bounds.min();
        self.size = bounds.extent();
        Ok(())
    }

    /// Grows the allocation so the box `min..=max` lies inside it, keeping
    /// every stored value.
    ///
    /// Growth is driven by the two corners, so the result covers the hull of
    /// the old box and both corners, which can exceed their tight union.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvertedBounds`](crate::GridError::InvertedBounds)
    /// if `max < min` on any axis. The store is unchanged in that case.
    pub fn ensure_allocated(&mut self, min: [i32; 3], max: [i32; 3]) -> GridResult<()> {
        let bounds = Bounds3::new(min, max)?;
        self.grow_to_cover(&bounds);
        Ok(())
    }

    /// Grows the allocation minimally so `(x, y, z)` lies inside it.
    pub fn ensure_allocated_at(&mut self, x: i32, y: i32, z: i32) {
        let coord = [x, y, z];
        if !self.is_allocated() {
            self.allocate_exact(&Bounds3::point(coord));
            return;
        }
        for axis in 0..3 {
            self.grow_axis(axis, coord[axis]);
        }
    }

    /// Shrinks the box to the tightest one holding every non-default cell.
    ///
    /// Planes are trimmed z first, then y, then x. A store holding only
    /// default values ends up erased.
    pub fn prune(&mut self) {
        if !self.is_allocated() {
            return;
        }
        let Some((lo, hi)) = self.occupied_range() else {
            tracing::debug!("prune found no values, erasing volume");
            self.erase();
            return;
        };

        let new_size = [hi[0] - lo[0] + 1, hi[1] - lo[1] + 1, hi[2] - lo[2] + 1];
        if new_size == self.size {
            return;
        }

        let mut cells = Vec::with_capacity(new_size.iter().product());
        for z in lo[2]..=hi[2] {
            for y in lo[1]..=hi[1] {
                cells.extend_from_slice(&self.row(y, z)[lo[0]..=hi[0]]);
            }
        }

        tracing::trace!(from = ?self.size, to = ?new_size, "pruned volume");
        for axis in 0..3 {
            self.origin[axis] = self.origin[axis].wrapping_add(lo[axis] as i32);
        }
        self.size = new_size;
        self.cells = cells;
    }

    /// Counts allocated cells that differ from the default value.
    #[must_use]
    pub fn non_default_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&value| value != self.default_value)
            .count()
    }

    /// Iterates over every cell differing from the default value, as
    /// `([x, y, z], value)` in storage order.
    pub fn iter_non_default(&self) -> impl Iterator<Item = ([i32; 3], i32)> + '_ {
        let [sx, sy, _] = self.size;
        let origin = self.origin;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &value)| value != self.default_value)
            .map(move |(index, &value)| {
                let x = index % sx;
                let y = (index / sx) % sy;
                let z = index / (sx * sy);
                (
                    [
                        origin[0].wrapping_add(x as i32),
                        origin[1].wrapping_add(y as i32),
                        origin[2].wrapping_add(z as i32),
                    ],
                    value,
                )
            })
    }

    /// Replaces any allocation with a fresh default-filled one for `bounds`.
    fn allocate_exact(&mut self, bounds: &Bounds3) {
        self.origin = bounds.min();
        self.size = bounds.extent();
        self.cells = vec![self.default_value; bounds.volume()];
    }

    /// Corner-driven growth shared by `fill` and `ensure_allocated`.
    fn grow_to_cover(&mut self, bounds: &Bounds3) {
        if !self.is_allocated() {
            self.allocate_exact(bounds);
            return;
        }
        let covered = self
            .bounds()
            .is_some_and(|current| current.contains(bounds.min()) && current.contains(bounds.max()));
        if covered {
            return;
        }
        let [x0, y0, z0] = bounds.min();
        let [x1, y1, z1] = bounds.max();
        self.ensure_allocated_at(x0, y0, z0);
        self.ensure_allocated_at(x1, y1, z1);
    }

    /// Inserts default planes along `axis` until `coord` is inside the box.
    fn grow_axis(&mut self, axis: usize, coord: i32) {
        let origin = self.origin[axis];
        let offset = wrapped_offset(origin, coord);
        if offset < self.size[axis] {
            return;
        }
        // Grow toward whichever side is nearer on the wrapping axis.
        let below = wrapped_offset(coord, origin);
        let above = offset - self.size[axis] + 1;
        let (below, above) = if below <= above { (below, 0) } else { (0, above) };

        let [sx, sy, sz] = self.size;
        let mut size = self.size;
        size[axis] += below + above;
        let mut shift = [0usize; 3];
        shift[axis] = below;

        let mut cells = vec![self.default_value; size.iter().product()];
        for z in 0..sz {
            for y in 0..sy {
                let src = (y + z * sy) * sx;
                let dst = shift[0] + ((y + shift[1]) + (z + shift[2]) * size[1]) * size[0];
                cells[dst..dst + sx].copy_from_slice(&self.cells[src..src + sx]);
            }
        }

        tracing::trace!(axis, below, above, "grew volume");
        if below > 0 {
            self.origin[axis] = coord;
        }
        self.size = size;
        self.cells = cells;
    }

    /// The x row at local `(y, z)`.
    #[inline]
    fn row(&self, y: usize, z: usize) -> &[i32] {
        let start = (y + z * self.size[1]) * self.size[0];
        &self.cells[start..start + self.size[0]]
    }

    /// Local inclusive index ranges holding non-default cells, found z first,
    /// then y within those planes, then x within those rows.
    fn occupied_range(&self) -> Option<([usize; 3], [usize; 3])> {
        let [sx, sy, sz] = self.size;
        let default = self.default_value;
        let plane = sx * sy;

        let z_set = |z: usize| self.cells[z * plane..(z + 1) * plane].iter().any(|&v| v != default);
        let z_lo = (0..sz).find(|&z| z_set(z))?;
        let z_hi = (z_lo..sz).rev().find(|&z| z_set(z))?;

        let y_set = |y: usize| (z_lo..=z_hi).any(|z| self.row(y, z).iter().any(|&v| v != default));
        let y_lo = (0..sy).find(|&y| y_set(y))?;
        let y_hi = (y_lo..sy).rev().find(|&y| y_set(y))?;

        let x_set = |x: usize| {
            (z_lo..=z_hi).any(|z| (y_lo..=y_hi).any(|y| self.row(y, z)[x] != default))
        };
        let x_lo = (0..sx).find(|&x| x_set(x))?;
        let x_hi = (x_lo..sx).rev().find(|&x| x_set(x))?;

        Some(([x_lo, y_lo, z_lo], [x_hi, y_hi, z_hi]))
    }
}

impl Default for VolumeStore {
    fn default() -> Self {
        Self::new(0)
    }
}

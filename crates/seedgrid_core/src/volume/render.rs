//! # Volume Text Dump
//!
//! Diagnostic rendering of a [`VolumeStore`] as one grid per z layer.
//! Handy in test failures; not a stable format.
//!
//! ```text
//! volume origin=(-1, 0, 0) size=3x2x1 default=0
//! z=0
//!   y=0:  0  4  0
//!   y=1: -1  0  0
//! ```

use std::fmt;

use super::store::VolumeStore;

impl fmt::Display for VolumeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bounds) = self.bounds() else {
            return write!(f, "volume <unallocated> default={}", self.default_value());
        };
        let [ox, oy, oz] = bounds.min();
        let [mx, my, mz] = bounds.max();
        let [sx, sy, sz] = self.size();
        writeln!(
            f,
            "volume origin=({ox}, {oy}, {oz}) size={sx}x{sy}x{sz} default={}",
            self.default_value()
        )?;

        let width = (oz..=mz)
            .flat_map(|z| (oy..=my).flat_map(move |y| (ox..=mx).map(move |x| (x, y, z))))
            .map(|(x, y, z)| self.get(x, y, z).to_string().len())
            .max()
            .unwrap_or(1);

        for z in oz..=mz {
            writeln!(f, "z={z}")?;
            for y in oy..=my {
                write!(f, "  y={y}:")?;
                for x in ox..=mx {
                    write!(f, " {:>width$}", self.get(x, y, z))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

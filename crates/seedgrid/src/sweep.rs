//! # Seed Sweep
//!
//! The per-seed evaluation loop:
//!
//! ```text
//! for each seed:
//! ┌──────────────────────────────────────────────┐
//! │ 1. PASS                                      │
//! │    ├─ acquire scratch buffers                │
//! │    └─ write results into the volume          │
//! │                                              │
//! │ 2. RELEASE                                   │
//! │    └─ one pool release for the whole pass    │
//! │                                              │
//! │ 3. PRUNE (every `prune_interval` passes)     │
//! │    └─ shrink the volume to its values        │
//! └──────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use seedgrid_core::{BufferPool, GridError, GridResult, IntBuffer, PoolConfig, VolumeStore};

/// Configuration for a [`SeedSweep`].
///
/// ```toml
/// default_value = -1
/// prune_interval = 64
///
/// [pool]
/// small_capacity = 256
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Value unset volume cells read as.
    pub default_value: i32,
    /// Prune the volume after this many passes. Zero disables pruning.
    pub prune_interval: u32,
    /// Scratch pool capacities.
    pub pool: PoolConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            default_value: 0,
            prune_interval: 64,
            pool: PoolConfig::default(),
        }
    }
}

impl SweepConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] if the text does not parse or the
    /// pool section is invalid.
    pub fn from_toml_str(text: &str) -> GridResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        config.pool.validate()?;
        Ok(config)
    }
}

/// Counters for a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Completed passes.
    pub passes: u64,
    /// Prunes performed.
    pub prunes: u64,
}

/// What a single pass can touch.
pub struct PassContext<'a> {
    seed: u64,
    pool: &'a BufferPool,
    volume: &'a mut VolumeStore,
}

impl PassContext<'_> {
    /// The seed being evaluated.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Borrows a scratch buffer of at least `minimum_size` values.
    ///
    /// Contents are unspecified. The buffer is recycled after the pass.
    #[inline]
    #[must_use]
    pub fn scratch(&self, minimum_size: usize) -> IntBuffer {
        self.pool.acquire(minimum_size)
    }

    /// The shared output volume.
    #[inline]
    pub fn volume(&mut self) -> &mut VolumeStore {
        self.volume
    }
}

/// Drives evaluation passes over a sequence of seeds.
///
/// # Thread Safety
///
/// One sweep per worker. Workers sharing a pool through
/// [`SeedSweep::with_pool`] also share its release epoch, so their passes
/// must not overlap.
#[derive(Debug)]
pub struct SeedSweep {
    config: SweepConfig,
    pool: BufferPool,
    volume: VolumeStore,
    stats: SweepStats,
}

impl SeedSweep {
    /// Creates a sweep with its own pool.
    #[must_use]
    pub fn new(config: SweepConfig) -> Self {
        Self::with_pool(config, BufferPool::new(config.pool))
    }

    /// Creates a sweep drawing scratch from an existing pool.
    #[must_use]
    pub fn with_pool(config: SweepConfig, pool: BufferPool) -> Self {
        Self {
            config,
            pool,
            volume: VolumeStore::new(config.default_value),
            stats: SweepStats::default(),
        }
    }

    /// The sweep configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// The scratch pool.
    #[inline]
    #[must_use]
    pub const fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// The output volume.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> &VolumeStore {
        &self.volume
    }

    /// Mutable access to the output volume between passes.
    #[inline]
    pub fn volume_mut(&mut self) -> &mut VolumeStore {
        &mut self.volume
    }

    /// Pass counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> SweepStats {
        self.stats
    }

    /// Runs one pass for `seed`, then releases the pool once and prunes the
    /// volume if the interval is due.
    ///
    /// Scratch buffers still held when the pass returns are recycled by a
    /// later release instead.
    pub fn run_seed<F, R>(&mut self, seed: u64, pass: F) -> R
    where
        F: FnOnce(&mut PassContext<'_>) -> R,
    {
        let mut ctx = PassContext {
            seed,
            pool: &self.pool,
            volume: &mut self.volume,
        };
        let result = pass(&mut ctx);

        self.pool.release();
        self.stats.passes += 1;

        let interval = u64::from(self.config.prune_interval);
        if interval > 0 && self.stats.passes % interval == 0 {
            self.volume.prune();
            self.stats.prunes += 1;
            tracing::trace!(passes = self.stats.passes, size = ?self.volume.size(), "pruned sweep volume");
        }
        result
    }

    /// Runs a pass for every seed, collecting `(seed, result)` pairs.
    pub fn run<I, F, R>(&mut self, seeds: I, mut pass: F) -> Vec<(u64, R)>
    where
        I: IntoIterator<Item = u64>,
        F: FnMut(&mut PassContext<'_>) -> R,
    {
        let results: Vec<_> = seeds
            .into_iter()
            .map(|seed| (seed, self.run_seed(seed, &mut pass)))
            .collect();
        tracing::debug!(count = results.len(), stats = ?self.stats, "sweep batch finished");
        results
    }
}

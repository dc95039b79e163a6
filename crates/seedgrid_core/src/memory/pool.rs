//! # Buffer Pool
//!
//! Reusable `i32` scratch buffers in two size classes.
//!
//! ## Size Classes
//!
//! | Class | Capacity                              | Served when                    |
//! |-------|---------------------------------------|--------------------------------|
//! | Small | fixed (`small_capacity`, default 256) | `size <= small_capacity`       |
//! | Large | largest size ever requested           | everything else                |
//!
//! A request above the current large capacity raises it and abandons every
//! large buffer the pool was tracking, free or handed out.
//!
//! ## Cycle
//!
//! ```text
//! acquire() ─► IntBuffer ─► drop ─► pending ─► release() ─► free ─► acquire()
//! ```
//!
//! A dropped buffer is not reused until the next [`BufferPool::release`].
//! Each release first evicts the least recently freed entry of each free
//! list, then merges the pending buffers, so a class that stops being used
//! drains over time.

use std::collections::VecDeque;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::config::PoolConfig;

/// Which partition of the pool a buffer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Fixed-capacity buffers for small requests.
    Small,
    /// Buffers sized to the largest request seen so far.
    Large,
}

/// Snapshot of one size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassStats {
    /// Capacity of every buffer in this class.
    pub capacity: usize,
    /// Buffers ready to be handed out.
    pub free: usize,
    /// Buffers returned since the last release, waiting for it.
    pub pending: usize,
    /// Handles of the current generation still held by callers.
    pub outstanding: usize,
}

/// Snapshot of the whole pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Small class.
    pub small: ClassStats,
    /// Large class.
    pub large: ClassStats,
    /// Completed `release` calls.
    pub cycles: u64,
    /// Free buffers evicted by `release`.
    pub evictions: u64,
}

/// Bookkeeping for one size class.
struct ClassState {
    capacity: usize,
    /// Bumped whenever tracked buffers are abandoned.
    generation: u64,
    /// Back is the most recently freed.
    free: VecDeque<Box<[i32]>>,
    pending: Vec<Box<[i32]>>,
    outstanding: usize,
}

impl ClassState {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            generation: 0,
            free: VecDeque::new(),
            pending: Vec::new(),
            outstanding: 0,
        }
    }

    fn take(&mut self) -> Box<[i32]> {
        self.outstanding += 1;
        self.free
            .pop_back()
            .unwrap_or_else(|| vec![0; self.capacity].into_boxed_slice())
    }

    fn give_back(&mut self, data: Box<[i32]>, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.outstanding = self.outstanding.saturating_sub(1);
        self.pending.push(data);
    }

    /// Evicts one free entry, then merges pending. Returns true on eviction.
    fn recycle(&mut self) -> bool {
        let evicted = self.free.pop_front().is_some();
        self.free.extend(self.pending.drain(..));
        evicted
    }

    fn discard_all(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.generation += 1;
        self.free.clear();
        self.pending.clear();
        self.outstanding = 0;
    }

    fn stats(&self) -> ClassStats {
        ClassStats {
            capacity: self.capacity,
            free: self.free.len(),
            pending: self.pending.len(),
            outstanding: self.outstanding,
        }
    }
}

struct PoolState {
    small: ClassState,
    large: ClassState,
    cycles: u64,
    evictions: u64,
}

impl PoolState {
    fn new(config: &PoolConfig) -> Self {
        Self {
            small: ClassState::new(config.small_capacity),
            large: ClassState::new(config.initial_large_capacity),
            cycles: 0,
            evictions: 0,
        }
    }

    fn class_mut(&mut self, class: SizeClass) -> &mut ClassState {
        match class {
            SizeClass::Small => &mut self.small,
            SizeClass::Large => &mut self.large,
        }
    }
}

struct Shared {
    state: Mutex<PoolState>,
    config: PoolConfig,
}

/// A pool of reusable integer buffers.
///
/// Cloning a `BufferPool` yields another handle to the same pool.
///
/// # Thread Safety
///
/// Every operation takes one lock, so threads may interleave freely. There is
/// only one acquire/release epoch per pool though: a `release` from any
/// thread recycles buffers returned by all threads. Workers that want their
/// own epoch need their own pool.
///
/// # Example
///
/// ```rust
/// use seedgrid_core::{BufferPool, PoolConfig};
///
/// let pool = BufferPool::new(PoolConfig::default());
/// {
///     let mut scratch = pool.acquire(300);
///     scratch[..300].fill(1);
/// }
/// pool.release();
/// ```
#[derive(Clone)]
pub struct BufferPool {
    shared: Arc<Shared>,
}

impl BufferPool {
    /// Creates an isolated pool.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PoolState::new(&config)),
                config,
            }),
        }
    }

    /// The process-wide pool, created with the default configuration on
    /// first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceCell<BufferPool> = OnceCell::new();
        GLOBAL.get_or_init(Self::default)
    }

    /// The configuration this pool was created with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> PoolConfig {
        self.shared.config
    }

    /// Hands out a buffer holding at least `minimum_size` values.
    ///
    /// Contents are unspecified: a reused buffer keeps whatever its previous
    /// user wrote.
    #[must_use]
    pub fn acquire(&self, minimum_size: usize) -> IntBuffer {
        let mut state = self.shared.state.lock();
        let class = if minimum_size <= state.small.capacity {
            SizeClass::Small
        } else {
            if minimum_size > state.large.capacity {
                tracing::debug!(
                    from = state.large.capacity,
                    to = minimum_size,
                    "raising large buffer capacity"
                );
                state.large.discard_all(minimum_size);
            }
            SizeClass::Large
        };

        let slot = state.class_mut(class);
        let data = slot.take();
        let generation = slot.generation;
        drop(state);

        IntBuffer {
            data,
            class,
            generation,
            home: Arc::downgrade(&self.shared),
        }
    }

    /// Makes every buffer returned since the last release available again,
    /// for both size classes.
    pub fn release(&self) {
        let mut state = self.shared.state.lock();
        let evicted = u64::from(state.small.recycle()) + u64::from(state.large.recycle());
        state.evictions += evicted;
        state.cycles += 1;
    }

    /// Abandons every tracked buffer and restores the configured capacities.
    pub fn reset(&self) {
        let config = self.shared.config;
        let mut state = self.shared.state.lock();
        state.small.discard_all(config.small_capacity);
        state.large.discard_all(config.initial_large_capacity);
        tracing::debug!("buffer pool reset");
    }

    /// Current pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let state = self.shared.state.lock();
        PoolStats {
            small: state.small.stats(),
            large: state.large.stats(),
            cycles: state.cycles,
            evictions: state.evictions,
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.shared.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// A scratch buffer on loan from a [`BufferPool`].
///
/// Derefs to `[i32]` with length equal to its class capacity. Dropping it
/// returns the storage to the pool, where it waits for the next release.
pub struct IntBuffer {
    data: Box<[i32]>,
    class: SizeClass,
    generation: u64,
    home: Weak<Shared>,
}

impl IntBuffer {
    /// Number of values this buffer holds.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The size class this buffer was drawn from.
    #[inline]
    #[must_use]
    pub const fn size_class(&self) -> SizeClass {
        self.class
    }
}

impl Deref for IntBuffer {
    type Target = [i32];

    #[inline]
    fn deref(&self) -> &[i32] {
        &self.data
    }
}

impl DerefMut for IntBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}

impl fmt::Debug for IntBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntBuffer")
            .field("class", &self.class)
            .field("capacity", &self.data.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Drop for IntBuffer {
    fn drop(&mut self) {
        if let Some(shared) = self.home.upgrade() {
            let data = std::mem::take(&mut self.data);
            shared
                .state
                .lock()
                .class_mut(self.class)
                .give_back(data, self.generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> BufferPool {
        BufferPool::new(PoolConfig::default())
    }

    #[test]
    fn test_small_request_uses_small_class() {
        let pool = pool();
        let buffer = pool.acquire(10);
        assert!(buffer.capacity() >= 10);
        assert_eq!(buffer.capacity(), 256);
        assert_eq!(buffer.size_class(), SizeClass::Small);
    }

    #[test]
    fn test_zero_request_is_small() {
        let pool = pool();
        assert_eq!(pool.acquire(0).size_class(), SizeClass::Small);
    }

    #[test]
    fn test_large_acquires_do_not_alias() {
        let pool = pool();
        let a = pool.acquire(300);
        let b = pool.acquire(300);
        assert_eq!(a.size_class(), SizeClass::Large);
        assert_eq!(a.capacity(), 300);
        assert_eq!(b.capacity(), 300);
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn test_release_makes_buffer_reusable() {
        let pool = pool();
        let first = pool.acquire(300);
        let ptr = first.as_ptr();
        drop(first);
        pool.release();

        let again = pool.acquire(300);
        assert_eq!(again.as_ptr(), ptr);
    }

    #[test]
    fn test_dropped_buffer_waits_for_release() {
        let pool = pool();
        let first = pool.acquire(10);
        let ptr = first.as_ptr();
        drop(first);

        let second = pool.acquire(10);
        assert_ne!(second.as_ptr(), ptr);
        assert_eq!(pool.stats().small.pending, 1);
    }

    #[test]
    fn test_larger_request_abandons_large_class() {
        let pool = pool();
        drop(pool.acquire(9000));
        pool.release();
        assert_eq!(pool.stats().large.free, 1);

        let big = pool.acquire(50_000);
        assert_eq!(big.capacity(), 50_000);
        let stats = pool.stats();
        assert_eq!(stats.large.capacity, 50_000);
        assert_eq!(stats.large.free, 0);
    }

    #[test]
    fn test_stale_handle_not_pooled() {
        let pool = pool();
        let old = pool.acquire(1000);
        let new = pool.acquire(2000);
        drop(old);

        let stats = pool.stats();
        assert_eq!(stats.large.pending, 0);
        assert_eq!(stats.large.outstanding, 1);
        drop(new);
        assert_eq!(pool.stats().large.pending, 1);
    }

    #[test]
    fn test_release_evicts_before_merge() {
        let pool = pool();
        let held: Vec<_> = (0..3).map(|_| pool.acquire(16)).collect();
        drop(held);
        pool.release();
        assert_eq!(pool.stats().small.free, 3);
        assert_eq!(pool.stats().evictions, 0);

        pool.release();
        pool.release();
        let stats = pool.stats();
        assert_eq!(stats.small.free, 1);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.cycles, 3);
    }

    #[test]
    fn test_reset_restores_capacities() {
        let pool = pool();
        drop(pool.acquire(4096));
        drop(pool.acquire(8));
        pool.release();
        pool.reset();

        let stats = pool.stats();
        assert_eq!(stats.large.capacity, 256);
        assert_eq!(stats.small.free, 0);
        assert_eq!(stats.large.free, 0);
    }

    #[test]
    fn test_buffer_outlives_pool() {
        let pool = pool();
        let mut buffer = pool.acquire(5);
        drop(pool);
        buffer[0] = 3;
        assert_eq!(buffer[0], 3);
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = pool();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let mut buffer = pool.acquire(10);
                        buffer[0] = 1;
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        pool.release();
        let stats = pool.stats();
        assert_eq!(stats.small.outstanding, 0);
        assert_eq!(stats.small.free, 400);
    }

    #[test]
    fn test_global_pool_is_shared() {
        assert!(std::ptr::eq(BufferPool::global(), BufferPool::global()));
    }
}

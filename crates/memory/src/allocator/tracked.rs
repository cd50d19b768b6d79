//! Allocation accounting wrapper

use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

use super::{Allocator, SystemAllocator};
use crate::error::MemoryResult;
use crate::stats::{Counter, CounterType};

/// Point-in-time view of a [`TrackedAllocator`]'s counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Successful non-empty allocations
    pub allocations: usize,
    /// Regions handed back
    pub deallocations: usize,
    /// Requests the inner allocator refused
    pub failures: usize,
    /// Total bytes ever allocated
    pub bytes_allocated: usize,
    /// Total bytes ever released
    pub bytes_released: usize,
    /// Bytes currently held by live regions
    pub bytes_live: usize,
}

impl AllocStats {
    /// Every allocated region has been released exactly once
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.allocations == self.deallocations && self.bytes_live == 0
    }
}

impl fmt::Display for AllocStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} allocations ({} bytes), {} releases ({} bytes), {} live bytes, {} failures",
            self.allocations,
            self.bytes_allocated,
            self.deallocations,
            self.bytes_released,
            self.bytes_live,
            self.failures
        )
    }
}

/// Counts every request that flows through to the inner allocator.
///
/// Zero-sized requests never reach the allocator from this crate's buffers,
/// so they show up here only if a caller issues them directly.
pub struct TrackedAllocator<A = SystemAllocator> {
    inner: A,
    allocations: Counter,
    deallocations: Counter,
    failures: Counter,
    bytes_allocated: Counter,
    bytes_released: Counter,
    bytes_live: Counter,
}

impl<A> TrackedAllocator<A> {
    /// Wrap `inner`
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            allocations: Counter::new(CounterType::Counter),
            deallocations: Counter::new(CounterType::Counter),
            failures: Counter::new(CounterType::Counter),
            bytes_allocated: Counter::new(CounterType::Counter),
            bytes_released: Counter::new(CounterType::Counter),
            bytes_live: Counter::new(CounterType::Gauge),
        }
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocations: self.allocations.value(),
            deallocations: self.deallocations.value(),
            failures: self.failures.value(),
            bytes_allocated: self.bytes_allocated.value(),
            bytes_released: self.bytes_released.value(),
            bytes_live: self.bytes_live.value(),
        }
    }
}

impl Default for TrackedAllocator<SystemAllocator> {
    fn default() -> Self {
        Self::new(SystemAllocator)
    }
}

// SAFETY: forwards to `inner`; bookkeeping does not touch the regions.
unsafe impl<A: Allocator> Allocator for TrackedAllocator<A> {
    fn allocate(&self, layout: Layout) -> MemoryResult<NonNull<[u8]>> {
        match self.inner.allocate(layout) {
            Ok(region) => {
                self.allocations.increment(1);
                self.bytes_allocated.increment(layout.size());
                self.bytes_live.increment(layout.size());
                Ok(region)
            }
            Err(err) => {
                self.failures.increment(1);
                Err(err)
            }
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocations.increment(1);
        self.bytes_released.increment(layout.size());
        self.bytes_live.decrement(layout.size());
        // SAFETY: caller's guarantees are forwarded unchanged.
        unsafe { self.inner.deallocate(ptr, layout) }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

impl<A: fmt::Debug> fmt::Debug for TrackedAllocator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedAllocator")
            .field("inner", &self.inner)
            .field("stats", &self.stats())
            .finish()
    }
}

//! Fault injection for exercising the exhaustion path
//!
//! The checked allocation path terminates the process, so it cannot be
//! observed by running out of real memory in a test. Wrapping a backend in a
//! [`FaultInjector`] makes exhaustion deterministic instead.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use super::{Allocator, SystemAllocator};
use crate::error::{MemoryError, MemoryResult};

/// Serves the first `budget` requests from `inner`, then refuses everything.
#[derive(Debug)]
pub struct FaultInjector<A = SystemAllocator> {
    inner: A,
    budget: usize,
    served: Cell<usize>,
}

impl FaultInjector<SystemAllocator> {
    /// Fails every non-empty request
    pub const fn always() -> Self {
        Self::fail_after(SystemAllocator, 0)
    }
}

impl<A> FaultInjector<A> {
    /// Let `budget` requests through to `inner`, then fail
    pub const fn fail_after(inner: A, budget: usize) -> Self {
        Self {
            inner,
            budget,
            served: Cell::new(0),
        }
    }

    /// Requests served so far
    pub fn served(&self) -> usize {
        self.served.get()
    }
}

// SAFETY: successful requests are forwarded to `inner` unchanged.
unsafe impl<A: Allocator> Allocator for FaultInjector<A> {
    fn allocate(&self, layout: Layout) -> MemoryResult<NonNull<[u8]>> {
        let served = self.served.get();
        if served >= self.budget {
            return Err(MemoryError::injected_fault(served));
        }
        let region = self.inner.allocate(layout)?;
        self.served.set(served + 1);
        Ok(region)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: only regions obtained from `inner` were handed out.
        unsafe { self.inner.deallocate(ptr, layout) }
    }

    fn name(&self) -> &'static str {
        "fault-injector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_fails() {
        let alloc = FaultInjector::always();
        let err = alloc.allocate(Layout::array::<u8>(8).unwrap()).unwrap_err();
        assert_eq!(err, MemoryError::InjectedFault { served: 0 });
    }

    #[test]
    fn fails_once_budget_is_spent() {
        let alloc = FaultInjector::fail_after(SystemAllocator, 2);
        let layout = Layout::array::<u8>(4).unwrap();

        let first = alloc.allocate(layout).unwrap();
        let second = alloc.allocate(layout).unwrap();
        assert!(alloc.allocate(layout).is_err());
        assert_eq!(alloc.served(), 2);

        // SAFETY: both regions were served by `alloc` with this layout.
        unsafe {
            alloc.deallocate(first.cast(), layout);
            alloc.deallocate(second.cast(), layout);
        }
    }
}

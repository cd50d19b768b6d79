//! Atomic counters backing allocation accounting

use core::sync::atomic::{AtomicUsize, Ordering};

/// How a counter's value is meant to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterType {
    /// Monotonic total
    Counter,

    /// Current level (goes up and down, e.g. live bytes)
    Gauge,
}

/// Atomic counter for allocation statistics
#[derive(Debug)]
pub struct Counter {
    value: AtomicUsize,
    counter_type: CounterType,
}

impl Counter {
    /// Creates a zeroed counter of the given type
    pub const fn new(counter_type: CounterType) -> Self {
        Self {
            value: AtomicUsize::new(0),
            counter_type,
        }
    }

    /// Current value
    pub fn value(&self) -> usize {
        self.value.load(Ordering::Acquire)
    }

    /// Adds `delta`
    pub fn increment(&self, delta: usize) {
        self.value.fetch_add(delta, Ordering::AcqRel);
    }

    /// Subtracts `delta`; only meaningful for gauges
    pub fn decrement(&self, delta: usize) {
        debug_assert_eq!(self.counter_type, CounterType::Gauge);
        self.value.fetch_sub(delta, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_operations() {
        let counter = Counter::new(CounterType::Counter);
        assert_eq!(counter.value(), 0);

        counter.increment(5);
        assert_eq!(counter.value(), 5);

        counter.increment(2);
        assert_eq!(counter.value(), 7);
    }

    #[test]
    fn gauge_goes_both_ways() {
        let gauge = Counter::new(CounterType::Gauge);
        gauge.increment(10);
        gauge.decrement(4);
        assert_eq!(gauge.value(), 6);
    }
}

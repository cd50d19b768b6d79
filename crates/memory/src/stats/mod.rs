//! Allocation statistics primitives

pub mod counter;

pub use counter::{Counter, CounterType};

//! Standalone error types for lenstr-memory
//!
//! These errors only ever surface from the fallible layer
//! ([`Region::try_allocate`](crate::buffer::Region::try_allocate) and the
//! [`Allocator`](crate::allocator::Allocator) backends). The checked path in
//! [`allocator::checked`](crate::allocator::checked) turns every one of them
//! into process termination.

use core::alloc::Layout;
use thiserror::Error;

#[cfg(feature = "logging")]
use lenstr_log::{error, warn};

// ============================================================================
// Main Error Types
// ============================================================================

/// Memory management errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    // --- Allocation Errors ---
    #[error("Memory allocation failed: {size} bytes with {align} byte alignment")]
    AllocationFailed { size: usize, align: usize },

    #[error("Invalid memory layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("Size overflow during operation: {operation}")]
    SizeOverflow { operation: String },

    // --- Arena Errors ---
    #[error("Arena '{arena_id}' exhausted: requested {requested} bytes, available {available}")]
    ArenaExhausted {
        arena_id: String,
        requested: usize,
        available: usize,
    },

    // --- Test Support ---
    #[error("Injected allocation fault after {served} successful requests")]
    InjectedFault { served: usize },
}

impl MemoryError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AllocationFailed { .. } => "MEM:ALLOC:FAILED",
            Self::InvalidLayout { .. } => "MEM:ALLOC:LAYOUT",
            Self::SizeOverflow { .. } => "MEM:ALLOC:OVERFLOW",
            Self::ArenaExhausted { .. } => "MEM:ARENA:EXHAUSTED",
            Self::InjectedFault { .. } => "MEM:FAULT:INJECTED",
        }
    }

    /// Whether the error means "the backend has no memory left" as opposed to
    /// a request that could never be satisfied
    #[must_use]
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. } | Self::ArenaExhausted { .. } | Self::InjectedFault { .. }
        )
    }

    // ============================================================================
    // Convenience Constructors
    // ============================================================================

    /// Create allocation failed error
    pub fn allocation_failed(size: usize, align: usize) -> Self {
        #[cfg(feature = "logging")]
        error!(size, align, "system allocation failed");

        Self::AllocationFailed { size, align }
    }

    /// Create allocation failed error from layout
    pub fn allocation_failed_with_layout(layout: Layout) -> Self {
        Self::allocation_failed(layout.size(), layout.align())
    }

    /// Create invalid layout error
    pub fn invalid_layout(reason: &str) -> Self {
        Self::InvalidLayout {
            reason: reason.to_string(),
        }
    }

    /// Create size overflow error
    pub fn size_overflow(operation: &str) -> Self {
        Self::SizeOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create arena exhausted error
    pub fn arena_exhausted(arena_id: &str, requested: usize, available: usize) -> Self {
        #[cfg(feature = "logging")]
        warn!(arena_id, requested, available, "arena exhausted");

        Self::ArenaExhausted {
            arena_id: arena_id.to_string(),
            requested,
            available,
        }
    }

    /// Create injected fault error
    #[must_use]
    pub fn injected_fault(served: usize) -> Self {
        Self::InjectedFault { served }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

// ============================================================================
// Tests
// ============================================================================

//! Error types for allocation and container construction
//!
//! Uses thiserror for clean, idiomatic Rust error definitions.

use core::alloc::Layout;
use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::{error, warn};

/// Memory management errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    // --- Allocation Errors ---
    /// The underlying memory source returned no memory
    #[error("Memory allocation failed: {size} bytes with {align} byte alignment")]
    AllocationFailed {
        /// Requested size in bytes
        size: usize,
        /// Requested alignment in bytes
        align: usize,
    },

    /// A layout could not be formed or served
    #[error("Invalid memory layout: {reason}")]
    InvalidLayout {
        /// Why the layout was rejected
        reason: String,
    },

    // --- Pool Errors ---
    /// A single request was larger than a pool chunk can ever hold
    #[error("Request of {requested} bytes exceeds chunk capacity {capacity}")]
    ChunkCapacityExceeded {
        /// Requested size in bytes
        requested: usize,
        /// Usable bytes per chunk
        capacity: usize,
    },

    /// A configuration value failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },
}

impl MemoryError {
    /// Check if error is retryable
    ///
    /// System allocation pressure can clear once other memory is released;
    /// layout, capacity, and configuration errors never resolve on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AllocationFailed { .. } => "MEM:ALLOC:FAILED",
            Self::InvalidLayout { .. } => "MEM:ALLOC:LAYOUT",
            Self::ChunkCapacityExceeded { .. } => "MEM:POOL:CHUNK_CAPACITY",
            Self::InvalidConfig { .. } => "MEM:CONFIG:INVALID",
        }
    }

    // --- Convenience Constructors ---

    /// Create allocation failed error
    pub fn allocation_failed(size: usize, align: usize) -> Self {
        #[cfg(feature = "logging")]
        error!(size, align, "memory allocation failed");

        Self::AllocationFailed { size, align }
    }

    /// Create allocation failed error from layout
    #[must_use]
    pub fn allocation_failed_with_layout(layout: Layout) -> Self {
        Self::allocation_failed(layout.size(), layout.align())
    }

    /// Create out of memory error (alias for `allocation_failed`)
    #[must_use]
    pub fn out_of_memory(size: usize, align: usize) -> Self {
        Self::allocation_failed(size, align)
    }

    /// Create invalid layout error
    pub fn invalid_layout(reason: &str) -> Self {
        Self::InvalidLayout {
            reason: reason.to_string(),
        }
    }

    /// Create chunk capacity exceeded error
    pub fn chunk_capacity_exceeded(requested: usize, capacity: usize) -> Self {
        #[cfg(feature = "logging")]
        warn!(requested, capacity, "pool request exceeds chunk capacity");

        Self::ChunkCapacityExceeded {
            requested,
            capacity,
        }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for memory operations
pub type MemoryResult<T> = core::result::Result<T, MemoryError>;

/// Error type returned by [`Allocator`](crate::allocator::Allocator) methods
pub type AllocError = MemoryError;

/// Result type for [`Allocator`](crate::allocator::Allocator) methods
pub type AllocResult<T> = MemoryResult<T>;

// ============================================================================
// Tests
// ============================================================================

//! Pool configuration

use crate::error::{MemoryError, MemoryResult};

/// Default usable bytes per chunk.
pub const DEFAULT_CHUNK_CAPACITY: usize = 512;

/// Default size threshold, in bytes, at or below which [`PoolAllocator`]
/// routes a request to the pool.
///
/// [`PoolAllocator`]: crate::allocator::PoolAllocator
pub const DEFAULT_SMALL_THRESHOLD: usize = 64;

/// Configuration for [`PoolAllocator`].
///
/// [`PoolAllocator`]: crate::allocator::PoolAllocator
///
/// # Examples
///
/// ```
/// use fastalloc::pool::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_chunk_capacity(1024)
///     .with_small_threshold(128);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Usable bytes per chunk.
    pub chunk_capacity: usize,
    /// Requests of at most this many bytes go to the pool; larger ones go
    /// to the global allocator.
    pub small_threshold: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            small_threshold: DEFAULT_SMALL_THRESHOLD,
        }
    }
}

impl PoolConfig {
    /// Preset tuned for many tiny objects.
    #[must_use]
    pub fn small_objects() -> Self {
        Self {
            chunk_capacity: 256,
            small_threshold: 32,
        }
    }

    /// Preset tuned for fewer, larger objects.
    #[must_use]
    pub fn large_objects() -> Self {
        Self {
            chunk_capacity: 4096,
            small_threshold: 512,
        }
    }

    /// Sets the chunk capacity in bytes.
    #[must_use = "builder methods return a new config"]
    pub fn with_chunk_capacity(mut self, bytes: usize) -> Self {
        self.chunk_capacity = bytes;
        self
    }

    /// Sets the pool routing threshold in bytes.
    #[must_use = "builder methods return a new config"]
    pub fn with_small_threshold(mut self, bytes: usize) -> Self {
        self.small_threshold = bytes;
        self
    }

    /// Checks the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::InvalidConfig`] if the chunk capacity is zero
    /// or the threshold exceeds the chunk capacity.
    pub fn validate(&self) -> MemoryResult<()> {
        if self.chunk_capacity == 0 {
            return Err(MemoryError::invalid_config(
                "chunk capacity must be non-zero",
            ));
        }
        if self.small_threshold > self.chunk_capacity {
            return Err(MemoryError::invalid_config(
                "small threshold cannot exceed chunk capacity",
            ));
        }
        Ok(())
    }
}

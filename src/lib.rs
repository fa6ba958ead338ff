//! # fastalloc
//!
//! Chunked pool allocation and an allocation-strategy-aware doubly linked
//! list.
//!
//! The crate has two halves that compose:
//!
//! - [`ChunkPool`] and the [`Allocator`] strategies built on it: small
//!   allocations are bump-allocated out of fixed-capacity chunks and freed
//!   all at once when the pool is dropped.
//! - [`LinkedList`], a sentinel-anchored doubly linked list that allocates
//!   every node through a pluggable strategy, with cursors for in-place
//!   editing and a reverse adapter.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastalloc::prelude::*;
//!
//! // Small nodes land in the pool, large ones on the heap.
//! let alloc = PoolAllocator::new();
//! let mut list = LinkedList::new_in(alloc)?;
//!
//! list.push_back("a")?;
//! list.push_back("b")?;
//! list.push_front("start")?;
//!
//! let mut cursor = list.cursor_front_mut();
//! cursor.move_next();
//! cursor.insert_after("between")?;
//!
//! assert_eq!(
//!     list.iter().copied().collect::<Vec<_>>(),
//!     ["start", "a", "between", "b"],
//! );
//! # Ok::<(), fastalloc::MemoryError>(())
//! ```
//!
//! ## Features
//!
//! - `logging` (default): structured tracing of pool growth and allocation
//!   failures via `tracing`
//!
//! ## Architecture
//!
//! - [`pool`]: the chunked bump pool, its configuration and statistics
//! - [`allocator`]: the [`Allocator`] contract, identity tokens, and the
//!   [`SystemAllocator`] / [`PoolAllocator`] strategies
//! - [`list`]: the linked list, its cursors and iterators
//! - [`error`]: standalone error handling via `thiserror`
//!
//! Everything is single-threaded: pools use interior mutability without
//! locks, so strategies move between threads but are never shared.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// inline(always) on the small alignment helpers is intentional for hot paths
#![allow(clippy::inline_always)]

// Error types
pub mod error;

// Core modules
pub mod allocator;
pub mod list;
pub mod pool;
pub mod utils;

// Re-export core types for convenience
pub use crate::error::{AllocError, AllocResult, MemoryError, MemoryResult};

// Public API exports
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    // Error types
    pub use crate::error::{AllocError, AllocResult, MemoryError, MemoryResult};

    // Allocation strategies
    pub use crate::allocator::{Allocator, AllocatorId, PoolAllocator, SystemAllocator};

    // Pool types
    pub use crate::pool::{ChunkPool, PoolConfig, PoolStats};

    // Container types
    pub use crate::list::{Cursor, CursorMut, LinkedList, ReverseCursor};
}

// Re-export the main types at crate root for convenience
pub use crate::allocator::{Allocator, PoolAllocator, SystemAllocator};
pub use crate::list::LinkedList;
pub use crate::pool::{ChunkPool, PoolConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

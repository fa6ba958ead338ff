//! Allocation strategies
//!
//! The [`Allocator`] trait is the seam between containers and memory. Two
//! strategies ship with the crate:
//!
//! - [`SystemAllocator`] forwards every request to the global allocator.
//! - [`PoolAllocator`] routes requests at or below a size threshold into a
//!   [`ChunkPool`](crate::pool::ChunkPool) and everything else to the global
//!   allocator.
//!
//! Strategies are value types. Containers hold their strategy by value, clone
//! it into spawned containers, and consult [`Allocator::select_for_clone`]
//! and [`Allocator::PROPAGATE_ON_COPY_ASSIGN`] when they are copied, so each
//! strategy decides how it travels with its container's data.
//!
//! Every strategy instance carries an [`AllocatorId`]. Equality of strategies
//! follows that identity, not their configuration, because equality answers
//! one question: can memory acquired from one be released through the other?

mod pooled;
mod system;
mod traits;

pub use pooled::PoolAllocator;
pub use system::SystemAllocator;
pub use traits::{Allocator, AllocatorId};

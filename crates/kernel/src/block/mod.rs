//! Block registration and invocation.
//!
//! Blocks are registered by name at startup and rendered on demand with
//! the host attribute map, saved content, and a [`BlockContext`].
//!
//! [`BlockContext`]: site_counts_sdk::block::BlockContext

mod registry;

pub use registry::BlockRegistry;

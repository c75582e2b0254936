//! Content module.
//!
//! This module provides:
//! - ContentStore: In-memory content types and items, serving as both the
//!   content type provider and the query provider for blocks
//! - Query engine: Structured filter evaluation over stored items
//! - Fixtures: YAML loading of types and items

mod fixture;
mod query;
mod store;

pub use fixture::Fixture;
pub use store::{ContentStore, ContentTypeDef, StoredItem};

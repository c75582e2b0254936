#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests run against the real kernel: the demo fixture and catalogs are
//! loaded from `demos/` at the workspace root.

#![allow(dead_code)]

use std::path::PathBuf;

use site_counts_block::SiteCountsBlock;
use site_counts_kernel::content::Fixture;
use site_counts_kernel::{BlockRegistry, ContentStore};

/// Path of a file under the workspace `demos/` directory.
pub fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

/// Store loaded from the demo fixture.
pub fn demo_store() -> ContentStore {
    ContentStore::load_fixture(&demo_path("fixture.yml")).expect("demo fixture should load")
}

/// Registry with every block the host ships.
pub fn registry() -> BlockRegistry {
    let mut registry = BlockRegistry::new();
    registry
        .register(SiteCountsBlock)
        .expect("registration should succeed");
    registry
}

/// Store with `count` published posts and nothing else.
pub fn published_posts(count: u64) -> ContentStore {
    let mut yaml = String::from("items:\n");
    for id in 1..=count {
        yaml.push_str(&format!(
            "  - {{ id: {id}, item_type: post, title: P{id}, status: publish, \
             created: \"2024-01-01T03:00:00\" }}\n"
        ));
    }
    Fixture::from_yaml(&yaml).unwrap().into_store().unwrap()
}

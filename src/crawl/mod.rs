// src/crawl/mod.rs
// =============================================================================
// This module handles link discovery across pages.
//
// Features:
// - Breadth-first traversal starting from one seed address
// - Exact-string deduplication of confirmed pages
// - Runs until nothing is left to visit (no depth limit, no delays)
// =============================================================================

mod queue;

// Re-export the traversal entry point and its result type
pub use queue::{traverse, ResultSet};

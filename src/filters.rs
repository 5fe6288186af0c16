//! Report filters module.
//!
//! This module provides the filter registry, request parameters and search
//! backends.
//!
//! # Examples
//!
//! ```rust
//! use query_report::filters::{FilterRegistry, MemorySearchBackend};
//!
//! let mut registry = FilterRegistry::new(MemorySearchBackend::new());
//! registry.register("created_at", "date");
//! assert_eq!(registry.len(), 1);
//! ```

pub use query_report_filters::*;

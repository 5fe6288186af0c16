//! # Query Report
//!
//! Declarative filters for reports.
//!
//! A report registers its filters once (a column, a comparator set and
//! optionally a custom predicate) and hands every incoming request to
//! [`FilterRegistry::apply_filters`](filters::FilterRegistry::apply_filters).
//! Generic filters are delegated to a search backend in a single call; custom
//! filters apply their own predicate to the searched query.
//!
//! ## Feature Flags
//!
//! - `i18n` (default) - Label catalogs and locale-aware comparator labels
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use query_report::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = FilterRegistry::new(MemorySearchBackend::new());
//! registry.register("status", FilterOptions::new().with_default("open"));
//!
//! let tickets = MemoryQuery::from_json(json!([
//!     {"status": "open"},
//!     {"status": "closed"},
//! ]))
//! .unwrap();
//!
//! let open = registry.apply_filters(tickets, &RequestParams::new()).unwrap();
//! assert_eq!(open.len(), 1);
//! ```

pub mod filters;
#[cfg(feature = "i18n")]
pub mod i18n;

pub use query_report_filters::{
	FilterDefinition, FilterError, FilterOptions, FilterRegistry, FilterResult, Predicate,
	ReportConfig, RequestParams, SearchBackend,
};

#[cfg(feature = "i18n")]
pub use query_report_i18n::{MessageCatalog, Translate, Translator};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::filters::{
		Comparators, CustomPassPolicy, FilterDefinition, FilterError, FilterOptions,
		FilterRegistry, FilterResult, FilterType, MemoryQuery, MemorySearchBackend, Predicate,
		RegistrySettings, ReportConfig, RequestParams, Search, SearchBackend, SearchResult,
	};

	#[cfg(feature = "i18n")]
	pub use crate::i18n::{MessageCatalog, Translate, Translator};
}

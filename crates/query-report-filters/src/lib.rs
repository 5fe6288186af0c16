//! Declarative report filters
//!
//! A report declares its filters once: a column, a comparator set and
//! optionally a custom predicate. At request time the [`FilterRegistry`]
//! turns HTTP request parameters into query predicates:
//!
//! - defaults declared on filters are merged into the request,
//! - every generic filter is delegated to a [`SearchBackend`] in one call,
//! - at most one custom filter predicate is applied to the searched query.
//!
//! Request values are read from the `q` bucket (generic filters) and the
//! `custom_search` bucket (custom filters) under `"{column}_{comparator}"`
//! keys, for example `q[created_at_gteq]=2020-01-01`.
//!
//! # Example
//!
//! ```
//! use query_report_filters::{FilterRegistry, MemoryQuery, MemorySearchBackend, RequestParams};
//! use serde_json::json;
//!
//! let mut registry = FilterRegistry::new(MemorySearchBackend::new());
//! registry.register("created_at", "date");
//! registry.register("title", "text");
//!
//! let books = MemoryQuery::from_json(json!([
//!     {"title": "Rust in Action", "created_at": "2021-08-10"},
//!     {"title": "Programming Rust", "created_at": "2017-12-21"},
//! ]))
//! .unwrap();
//! let params = RequestParams::from_query_string(
//!     "q[title_cont]=Rust&q[created_at_gteq]=2020-01-01",
//! )
//! .unwrap();
//!
//! let found = registry.apply_filters(books, &params).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

pub mod comparator;
pub mod config;
pub mod definition;
pub mod error;
pub mod memory;
pub mod options;
pub mod params;
pub mod predicate;
pub mod registry;
pub mod search;

pub use comparator::{Comparators, FilterType, LabelKey};
pub use config::{FilterConfig, ReportConfig};
pub use definition::FilterDefinition;
pub use error::{FilterError, FilterResult};
pub use memory::{MemoryPredicate, MemoryQuery, MemorySearchBackend, Record};
pub use options::FilterOptions;
pub use params::{
	CUSTOM_BUCKET, GENERIC_BUCKET, ParamBucket, RequestParams, is_present, present_value,
};
pub use predicate::Predicate;
pub use registry::{CustomPassPolicy, FilterRegistry, RegistrySettings};
pub use search::{Search, SearchBackend, SearchResult};

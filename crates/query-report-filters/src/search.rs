//! The seam to the search collaborator handling all generic filters
//!
//! A [`SearchBackend`] receives the generic bucket (`q`) in one call and
//! interprets every `"{column}_{comparator}"` key as a predicate on the query.
//! The registry keeps the returned search object so callers can inspect it
//! after the request (sort state, the applied parameters, ...).

use crate::error::FilterResult;
use crate::params::ParamBucket;

/// Search collaborator for non-custom filters
///
/// # Examples
///
/// ```
/// use query_report_filters::{FilterResult, ParamBucket, Search, SearchBackend, SearchResult};
///
/// struct CountingBackend;
///
/// impl SearchBackend<usize> for CountingBackend {
///     type Search = Search<usize>;
///
///     fn search(&self, query: usize, params: &ParamBucket) -> FilterResult<Search<usize>> {
///         Ok(Search::new(query + params.len(), params.clone()))
///     }
/// }
///
/// let search = CountingBackend.search(1, &ParamBucket::new()).unwrap();
/// assert_eq!(search.result(), 1);
/// ```
pub trait SearchBackend<Q> {
	type Search: SearchResult<Q>;

	fn search(&self, query: Q, params: &ParamBucket) -> FilterResult<Self::Search>;
}

/// Object returned by a search, exposing the filtered query
pub trait SearchResult<Q> {
	fn result(&self) -> Q;
}

/// Plain search outcome: the filtered query plus the parameters it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct Search<Q> {
	result: Q,
	params: ParamBucket,
}

impl<Q> Search<Q> {
	pub fn new(result: Q, params: ParamBucket) -> Self {
		Self { result, params }
	}

	/// Parameters the search was executed with
	pub fn params(&self) -> &ParamBucket {
		&self.params
	}

	pub fn into_result(self) -> Q {
		self.result
	}
}

impl<Q: Clone> SearchResult<Q> for Search<Q> {
	fn result(&self) -> Q {
		self.result.clone()
	}
}

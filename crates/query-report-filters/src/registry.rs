//! Filter registry and the request-time filter engine
//!
//! # Request flow
//!
//! 1. Defaults declared on filters are injected into the request buckets,
//!    never overriding values sent by the client.
//! 2. The generic bucket (`q`) is handed to the [`SearchBackend`] in a single
//!    call which covers every non-custom filter.
//! 3. Custom filters are scanned in registration order and at most one of
//!    their predicates is applied to the query returned by the search.

use crate::definition::FilterDefinition;
use crate::error::FilterResult;
use crate::options::FilterOptions;
use crate::params::{CUSTOM_BUCKET, GENERIC_BUCKET, ParamBucket, RequestParams, present_value};
use crate::predicate::Predicate;
use crate::search::{SearchBackend, SearchResult};
use query_report_i18n::{Translate, Translator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// When the custom filter pass stops scanning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomPassPolicy {
	/// Stop at the first custom filter with one or two comparators, whether
	/// or not its values were present
	#[default]
	FirstEligible,
	/// Keep scanning until a predicate has been applied
	UntilApplied,
}

/// Registry-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
	/// Request bucket handed to the search backend
	pub generic_bucket: String,
	/// Request bucket read by custom predicates
	pub custom_bucket: String,
	pub custom_pass: CustomPassPolicy,
}

impl Default for RegistrySettings {
	fn default() -> Self {
		Self {
			generic_bucket: GENERIC_BUCKET.to_string(),
			custom_bucket: CUSTOM_BUCKET.to_string(),
			custom_pass: CustomPassPolicy::default(),
		}
	}
}

/// Ordered set of filters for one report
///
/// `Q` is the query type being filtered and `B` the search backend. Each
/// report instance owns its registry; [`apply_filters`](Self::apply_filters)
/// takes `&mut self` because it records the latest search.
///
/// # Examples
///
/// ```
/// use query_report_filters::{
///     FilterOptions, FilterRegistry, MemoryQuery, MemorySearchBackend, Predicate, RequestParams,
/// };
/// use serde_json::json;
///
/// let mut registry = FilterRegistry::new(MemorySearchBackend::new());
/// registry.register("created_at", FilterOptions::from("date").with_default(json!(["2020-01-01"])));
/// registry.register_custom(
///     "owner",
///     FilterOptions::new(),
///     Predicate::one(|query: MemoryQuery, owner| query.filter(|row| row.get("owner") == Some(owner))),
/// );
///
/// let query = MemoryQuery::from_json(json!([
///     {"created_at": "2019-06-01", "owner": "ada"},
///     {"created_at": "2020-02-01", "owner": "ada"},
///     {"created_at": "2020-03-01", "owner": "bob"},
/// ]))
/// .unwrap();
/// let params = RequestParams::new().with_param("custom_search", "owner_eq", "ada");
///
/// let filtered = registry.apply_filters(query, &params).unwrap();
/// assert_eq!(filtered.len(), 1);
/// ```
pub struct FilterRegistry<Q, B: SearchBackend<Q>> {
	filters: Vec<FilterDefinition<Q>>,
	backend: B,
	translator: Arc<dyn Translate>,
	settings: RegistrySettings,
	last_search: Option<B::Search>,
}

impl<Q, B: SearchBackend<Q>> FilterRegistry<Q, B> {
	/// Create an empty registry labelling comparators in English
	pub fn new(backend: B) -> Self {
		Self {
			filters: Vec::new(),
			backend,
			translator: Arc::new(Translator::english()),
			settings: RegistrySettings::default(),
			last_search: None,
		}
	}

	/// Use another label translator for filters registered from now on
	pub fn with_translator(mut self, translator: Arc<dyn Translate>) -> Self {
		self.translator = translator;
		self
	}

	pub fn with_settings(mut self, settings: RegistrySettings) -> Self {
		self.settings = settings;
		self
	}

	/// Register a filter handled by the search backend
	pub fn register(
		&mut self,
		column: impl Into<String>,
		options: impl Into<FilterOptions>,
	) -> &FilterDefinition<Q> {
		let filter = FilterDefinition::new(column, options, self.translator.as_ref());
		self.push(filter)
	}

	/// Register a filter applied through `predicate`
	pub fn register_custom(
		&mut self,
		column: impl Into<String>,
		options: impl Into<FilterOptions>,
		predicate: Predicate<Q>,
	) -> &FilterDefinition<Q> {
		let filter = FilterDefinition::custom(column, options, predicate, self.translator.as_ref());
		self.push(filter)
	}

	fn push(&mut self, filter: FilterDefinition<Q>) -> &FilterDefinition<Q> {
		warn_on_misconfiguration(&filter);
		if self.get(filter.column()).is_some() {
			tracing::debug!(column = filter.column(), "column already has a filter; both stay active");
		}
		tracing::debug!(
			column = filter.column(),
			custom = filter.is_custom(),
			keys = ?filter.search_keys(),
			"registered report filter"
		);

		let index = self.filters.len();
		self.filters.push(filter);
		&self.filters[index]
	}

	pub fn filters(&self) -> &[FilterDefinition<Q>] {
		&self.filters
	}

	pub fn len(&self) -> usize {
		self.filters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// First registered filter for `column`
	pub fn get(&self, column: &str) -> Option<&FilterDefinition<Q>> {
		self.filters.iter().find(|filter| filter.column() == column)
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	pub fn settings(&self) -> &RegistrySettings {
		&self.settings
	}

	/// Search object of the most recent [`apply_filters`](Self::apply_filters)
	///
	/// `None` before the first call and after a call whose search failed.
	pub fn last_search(&self) -> Option<&B::Search> {
		self.last_search.as_ref()
	}

	/// Apply every registered filter to `query`
	///
	/// `http_params` is read, never modified. Missing or blank values simply
	/// leave their filter inactive; only a failing search backend produces an
	/// error.
	pub fn apply_filters(&mut self, query: Q, http_params: &RequestParams) -> FilterResult<Q> {
		let mut generic = http_params.bucket(&self.settings.generic_bucket);
		let mut custom = http_params.bucket(&self.settings.custom_bucket);

		self.inject_defaults(&mut generic, &mut custom);

		self.last_search = None;
		let search = self.backend.search(query, &generic)?;
		let query = search.result();
		self.last_search = Some(search);

		Ok(self.apply_custom_filters(query, &custom))
	}

	fn inject_defaults(&self, generic: &mut ParamBucket, custom: &mut ParamBucket) {
		for filter in &self.filters {
			if !filter.options().has_default() {
				continue;
			}
			let bucket = if filter.is_custom() {
				&mut *custom
			} else {
				&mut *generic
			};
			for (key, default) in filter.search_keys().into_iter().zip(filter.defaults()) {
				if default.is_null() {
					continue;
				}
				let slot = bucket.entry(key).or_insert(Value::Null);
				if slot.is_null() {
					tracing::trace!(column = filter.column(), value = %default, "injecting default");
					*slot = default;
				}
			}
		}
	}

	fn apply_custom_filters(&self, mut query: Q, custom: &ParamBucket) -> Q {
		for filter in self.filters.iter() {
			let Some(predicate) = filter.predicate() else {
				continue;
			};
			let keys = filter.search_keys();
			if !matches!(keys.len(), 1 | 2) {
				continue;
			}
			let first = keys.first().and_then(|key| present_value(custom, key));
			let last = keys.last().and_then(|key| present_value(custom, key));

			// A predicate whose arity does not fit the comparators never runs,
			// but the filter still counts as reached.
			let applied = match (keys.len(), predicate, first, last) {
				(1, Predicate::OneArg(predicate), Some(value), _) => {
					query = predicate(query, value);
					true
				}
				(2, Predicate::TwoArg(predicate), Some(first), Some(last)) => {
					query = predicate(query, first, last);
					true
				}
				_ => false,
			};

			tracing::debug!(column = filter.column(), applied, "custom filter reached");
			match self.settings.custom_pass {
				CustomPassPolicy::FirstEligible => break,
				CustomPassPolicy::UntilApplied if applied => break,
				CustomPassPolicy::UntilApplied => {}
			}
		}
		query
	}
}

fn warn_on_misconfiguration<Q>(filter: &FilterDefinition<Q>) {
	let comparators = filter.comparators().len();
	if let Some(predicate) = filter.predicate() {
		if !(1..=2).contains(&comparators) {
			tracing::warn!(
				column = filter.column(),
				comparators,
				"custom filter needs one or two comparators; it will never apply"
			);
		} else if predicate.arity() != comparators {
			tracing::warn!(
				column = filter.column(),
				comparators,
				arity = predicate.arity(),
				"custom filter predicate arity does not match its comparators; it will never apply"
			);
		}
	}
	let defaults = filter.defaults().len();
	if defaults > comparators {
		tracing::warn!(
			column = filter.column(),
			defaults,
			comparators,
			"more defaults than comparators; extra defaults are ignored"
		);
	}
}

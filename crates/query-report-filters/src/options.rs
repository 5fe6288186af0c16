//! Filter options as supplied at registration or loaded from configuration

use crate::comparator::{Comparators, FilterType};
use crate::params::is_present;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options accepted when registering a filter
///
/// Recognized keys are `type`, `comp` and `default`; anything else is kept
/// untouched in [`extra`](FilterOptions::extra).
///
/// # Examples
///
/// ```
/// use query_report_filters::{FilterOptions, FilterType};
/// use serde_json::json;
///
/// // A plain string is the filter type
/// let options = FilterOptions::from("date");
/// assert_eq!(options.filter_type, Some(FilterType::Date));
///
/// let options = FilterOptions::new()
///     .with_type(FilterType::Date)
///     .with_default(json!(["2020-01-01", "2020-12-31"]));
/// assert_eq!(options.defaults().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub filter_type: Option<FilterType>,
	#[serde(rename = "comp", default, skip_serializing_if = "Option::is_none")]
	pub comparators: Option<Comparators>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,
	#[serde(flatten)]
	pub extra: IndexMap<String, Value>,
}

impl FilterOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_type(mut self, filter_type: impl Into<FilterType>) -> Self {
		self.filter_type = Some(filter_type.into());
		self
	}

	/// Use an explicit comparator set instead of detecting one from the type
	pub fn with_comparators(mut self, comparators: impl Into<Comparators>) -> Self {
		self.comparators = Some(comparators.into());
		self
	}

	/// Default value, or list of values in comparator order
	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Whether a non-blank default is configured
	pub fn has_default(&self) -> bool {
		self.default.as_ref().is_some_and(is_present)
	}

	/// Configured defaults, one per comparator position
	///
	/// A scalar default becomes a single-element list. Blank defaults yield
	/// an empty list.
	pub fn defaults(&self) -> Vec<Value> {
		match &self.default {
			Some(value) if is_present(value) => match value {
				Value::Array(values) => values.clone(),
				scalar => vec![scalar.clone()],
			},
			_ => Vec::new(),
		}
	}
}

impl From<&str> for FilterOptions {
	fn from(filter_type: &str) -> Self {
		Self::new().with_type(filter_type)
	}
}

impl From<String> for FilterOptions {
	fn from(filter_type: String) -> Self {
		Self::new().with_type(filter_type)
	}
}

impl From<FilterType> for FilterOptions {
	fn from(filter_type: FilterType) -> Self {
		Self::new().with_type(filter_type)
	}
}

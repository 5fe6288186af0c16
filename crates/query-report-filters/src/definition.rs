//! A single column filter

use crate::comparator::{Comparators, FilterType};
use crate::options::FilterOptions;
use crate::predicate::Predicate;
use query_report_i18n::Translate;
use serde_json::Value;
use std::fmt;

/// Description of one column's filter
///
/// Built once at registration and never mutated afterwards. A definition is
/// custom iff it carries a [`Predicate`].
///
/// # Examples
///
/// ```
/// use query_report_filters::{FilterDefinition, FilterOptions};
/// use query_report_i18n::MessageCatalog;
///
/// let labels = MessageCatalog::builtin("en");
/// let filter: FilterDefinition<()> =
///     FilterDefinition::new("created_at", FilterOptions::from("date"), &labels);
///
/// assert!(filter.is_date());
/// assert!(!filter.is_custom());
/// assert_eq!(filter.search_keys(), vec!["created_at_gteq", "created_at_lteq"]);
/// assert_eq!(filter.comparators().label("gteq"), Some("From"));
/// ```
pub struct FilterDefinition<Q> {
	column: String,
	filter_type: Option<FilterType>,
	comparators: Comparators,
	predicate: Option<Predicate<Q>>,
	options: FilterOptions,
}

impl<Q> FilterDefinition<Q> {
	/// Filter handled by the generic search backend
	pub fn new(
		column: impl Into<String>,
		options: impl Into<FilterOptions>,
		translator: &dyn Translate,
	) -> Self {
		Self::build(column.into(), options.into(), None, translator)
	}

	/// Filter applied through its own predicate
	pub fn custom(
		column: impl Into<String>,
		options: impl Into<FilterOptions>,
		predicate: Predicate<Q>,
		translator: &dyn Translate,
	) -> Self {
		Self::build(column.into(), options.into(), Some(predicate), translator)
	}

	fn build(
		column: String,
		options: FilterOptions,
		predicate: Option<Predicate<Q>>,
		translator: &dyn Translate,
	) -> Self {
		let filter_type = options.filter_type.clone();
		let comparators = match &options.comparators {
			Some(explicit) if !explicit.is_empty() => explicit.clone(),
			_ => Comparators::detect(filter_type.as_ref(), &column, translator),
		};
		Self {
			column,
			filter_type,
			comparators,
			predicate,
			options,
		}
	}

	pub fn column(&self) -> &str {
		&self.column
	}

	pub fn filter_type(&self) -> Option<&FilterType> {
		self.filter_type.as_ref()
	}

	pub fn comparators(&self) -> &Comparators {
		&self.comparators
	}

	pub fn options(&self) -> &FilterOptions {
		&self.options
	}

	pub fn predicate(&self) -> Option<&Predicate<Q>> {
		self.predicate.as_ref()
	}

	pub fn is_custom(&self) -> bool {
		self.predicate.is_some()
	}

	pub fn is_type(&self, candidate: &FilterType) -> bool {
		self.filter_type.as_ref() == Some(candidate)
	}

	pub fn is_date(&self) -> bool {
		self.is_type(&FilterType::Date)
	}

	pub fn is_text(&self) -> bool {
		self.is_type(&FilterType::Text)
	}

	pub fn is_boolean(&self) -> bool {
		self.is_type(&FilterType::Boolean)
	}

	/// Request parameter keys, one per comparator, as `"{column}_{comparator}"`
	pub fn search_keys(&self) -> Vec<String> {
		self.comparators
			.ids()
			.map(|id| format!("{}_{}", self.column, id))
			.collect()
	}

	/// Configured default values in comparator order
	pub fn defaults(&self) -> Vec<Value> {
		self.options.defaults()
	}
}

impl<Q> fmt::Debug for FilterDefinition<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterDefinition")
			.field("column", &self.column)
			.field("filter_type", &self.filter_type)
			.field("comparators", &self.comparators)
			.field("predicate", &self.predicate)
			.field("options", &self.options)
			.finish()
	}
}

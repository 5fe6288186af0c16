//! Filter types, comparator sets and their label keys

use indexmap::IndexMap;
use query_report_i18n::Translate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of column a filter targets
///
/// Only [`Date`](FilterType::Date) and [`Text`](FilterType::Text) change the
/// detected comparators. Any other tag is kept verbatim in
/// [`Other`](FilterType::Other) and treated like an equality filter.
///
/// # Examples
///
/// ```
/// use query_report_filters::FilterType;
///
/// assert_eq!(FilterType::from("date"), FilterType::Date);
/// assert_eq!(FilterType::from("currency"), FilterType::Other("currency".to_string()));
/// assert_eq!(FilterType::Boolean.as_str(), "boolean");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterType {
	Date,
	Text,
	Boolean,
	Other(String),
}

impl FilterType {
	/// Type tags with dedicated predicates (`is_date`, `is_text`, `is_boolean`)
	pub const SUPPORTED: [FilterType; 3] = [FilterType::Date, FilterType::Text, FilterType::Boolean];

	pub fn as_str(&self) -> &str {
		match self {
			FilterType::Date => "date",
			FilterType::Text => "text",
			FilterType::Boolean => "boolean",
			FilterType::Other(tag) => tag,
		}
	}

	pub fn is_supported(&self) -> bool {
		!matches!(self, FilterType::Other(_))
	}
}

impl From<&str> for FilterType {
	fn from(tag: &str) -> Self {
		match tag {
			"date" => FilterType::Date,
			"text" => FilterType::Text,
			"boolean" => FilterType::Boolean,
			other => FilterType::Other(other.to_string()),
		}
	}
}

impl From<String> for FilterType {
	fn from(tag: String) -> Self {
		FilterType::from(tag.as_str())
	}
}

impl From<FilterType> for String {
	fn from(filter_type: FilterType) -> Self {
		filter_type.as_str().to_string()
	}
}

impl fmt::Display for FilterType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Ordered mapping of comparator id (`gteq`, `cont`, `eq`, ...) to display label
///
/// Iteration order is insertion order; it fixes the order of the filter's
/// search keys and of its default values.
///
/// # Examples
///
/// ```
/// use query_report_filters::Comparators;
///
/// let comparators = Comparators::new()
///     .with("gteq", "From")
///     .with("lteq", "To");
///
/// assert_eq!(comparators.ids().collect::<Vec<_>>(), vec!["gteq", "lteq"]);
/// assert_eq!(comparators.label("lteq"), Some("To"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comparators(IndexMap<String, String>);

impl Comparators {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Append a comparator, replacing the label if the id already exists
	pub fn with(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
		self.insert(id, label);
		self
	}

	pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
		self.0.insert(id.into(), label.into());
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.0.contains_key(id)
	}

	pub fn label(&self, id: &str) -> Option<&str> {
		self.0.get(id).map(String::as_str)
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(id, label)| (id.as_str(), label.as_str()))
	}

	/// Comparators a filter gets when none are configured explicitly
	///
	/// - `date`: `gteq` / `lteq` labelled from the shared from/to keys
	/// - `text`: `cont` labelled from the column's `contains` key
	/// - anything else: `eq` labelled from the column's `equals` key
	pub fn detect(
		filter_type: Option<&FilterType>,
		column: &str,
		translator: &dyn Translate,
	) -> Self {
		match filter_type {
			Some(FilterType::Date) => Self::new()
				.with("gteq", translator.translate(&LabelKey::from_label()))
				.with("lteq", translator.translate(&LabelKey::to_label())),
			Some(FilterType::Text) => {
				Self::new().with("cont", translator.translate(&LabelKey::contains(column)))
			}
			_ => Self::new().with("eq", translator.translate(&LabelKey::equals(column))),
		}
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Comparators {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(id, label)| (id.into(), label.into()))
				.collect(),
		)
	}
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Comparators {
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

/// Builders for the label keys handed to the translator
///
/// The filter layer only decides the key; the text comes from the catalog.
pub struct LabelKey;

impl LabelKey {
	pub const PREFIX: &'static str = "query_report.filters";

	/// Key for the lower bound of a date range
	pub fn from_label() -> String {
		format!("{}.from", Self::PREFIX)
	}

	/// Key for the upper bound of a date range
	pub fn to_label() -> String {
		format!("{}.to", Self::PREFIX)
	}

	pub fn contains(column: &str) -> String {
		format!("{}.{}.contains", Self::PREFIX, column)
	}

	pub fn equals(column: &str) -> String {
		format!("{}.{}.equals", Self::PREFIX, column)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use query_report_i18n::MessageCatalog;
	use rstest::rstest;

	#[rstest]
	#[case(Some(FilterType::Date), vec!["gteq", "lteq"])]
	#[case(Some(FilterType::Text), vec!["cont"])]
	#[case(Some(FilterType::Boolean), vec!["eq"])]
	#[case(Some(FilterType::Other("currency".to_string())), vec!["eq"])]
	#[case(None, vec!["eq"])]
	fn test_detect_comparators_by_type(
		#[case] filter_type: Option<FilterType>,
		#[case] expected: Vec<&str>,
	) {
		let catalog = MessageCatalog::builtin("en");

		let comparators = Comparators::detect(filter_type.as_ref(), "amount", &catalog);

		assert_eq!(comparators.ids().collect::<Vec<_>>(), expected);
	}

	#[rstest]
	fn test_detected_labels_use_translator() {
		// Arrange
		let mut catalog = MessageCatalog::builtin("en");
		catalog.add("query_report.filters.title.contains", "Title contains");

		// Act
		let date = Comparators::detect(Some(&FilterType::Date), "created_at", &catalog);
		let text = Comparators::detect(Some(&FilterType::Text), "title", &catalog);
		let other = Comparators::detect(None, "status", &catalog);

		// Assert
		assert_eq!(date.label("gteq"), Some("From"));
		assert_eq!(date.label("lteq"), Some("To"));
		assert_eq!(text.label("cont"), Some("Title contains"));
		assert_eq!(other.label("eq"), Some("query_report.filters.status.equals"));
	}

	#[rstest]
	#[case("date", FilterType::Date)]
	#[case("text", FilterType::Text)]
	#[case("boolean", FilterType::Boolean)]
	#[case("Date", FilterType::Other("Date".to_string()))]
	fn test_filter_type_from_tag(#[case] tag: &str, #[case] expected: FilterType) {
		assert_eq!(FilterType::from(tag), expected);
	}

	#[rstest]
	fn test_filter_type_serde_uses_tag() {
		let parsed: FilterType = serde_json::from_str(r#""text""#).unwrap();
		let written = serde_json::to_string(&FilterType::Other("money".to_string())).unwrap();

		assert_eq!(parsed, FilterType::Text);
		assert_eq!(written, r#""money""#);
	}

	#[rstest]
	fn test_supported_types() {
		assert!(FilterType::SUPPORTED.iter().all(FilterType::is_supported));
		assert!(!FilterType::Other("x".to_string()).is_supported());
	}

	#[rstest]
	fn test_comparators_deserialize_in_order() {
		let comparators: Comparators =
			serde_json::from_str(r#"{"lteq": "Until", "gteq": "Since"}"#).unwrap();

		assert_eq!(comparators.ids().collect::<Vec<_>>(), vec!["lteq", "gteq"]);
	}
}

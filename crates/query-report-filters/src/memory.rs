//! In-memory search backend
//!
//! Interprets the generic bucket the way a ransack-style search does: each
//! key is `"{column}_{predicate}"` and blank values are ignored. Useful for
//! reports over data already loaded in memory, and as the reference for the
//! key vocabulary other backends are expected to understand.

use crate::error::{FilterError, FilterResult};
use crate::params::{ParamBucket, is_present};
use crate::search::{Search, SearchBackend};
use serde_json::{Map, Value};
use std::cmp::Ordering;

static NULL: Value = Value::Null;

/// One row of a [`MemoryQuery`]
pub type Record = Map<String, Value>;

/// Rows being filtered
///
/// # Examples
///
/// ```
/// use query_report_filters::MemoryQuery;
/// use serde_json::json;
///
/// let query = MemoryQuery::from_json(json!([{"n": 1}, {"n": 2}, {"n": 3}])).unwrap();
/// let odd = query.filter(|row| row["n"].as_i64().is_some_and(|n| n % 2 == 1));
///
/// assert_eq!(odd.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryQuery {
	records: Vec<Record>,
}

impl MemoryQuery {
	pub fn new(records: Vec<Record>) -> Self {
		Self { records }
	}

	/// Build from a JSON array of objects
	pub fn from_json(value: Value) -> FilterResult<Self> {
		let Value::Array(rows) = value else {
			return Err(FilterError::InvalidParameter(
				"records must be a JSON array".to_string(),
			));
		};
		rows.into_iter()
			.map(|row| match row {
				Value::Object(record) => Ok(record),
				other => Err(FilterError::InvalidParameter(format!(
					"record must be an object, got {other}"
				))),
			})
			.collect::<FilterResult<Vec<_>>>()
			.map(Self::new)
	}

	/// Keep the rows matching `keep`
	pub fn filter<F>(self, keep: F) -> Self
	where
		F: Fn(&Record) -> bool,
	{
		Self {
			records: self.records.into_iter().filter(|row| keep(row)).collect(),
		}
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}

	pub fn into_records(self) -> Vec<Record> {
		self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl FromIterator<Record> for MemoryQuery {
	fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

/// Comparison named by a search key suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPredicate {
	Eq,
	NotEq,
	Cont,
	NotCont,
	Start,
	End,
	Gt,
	Gteq,
	Lt,
	Lteq,
	In,
	NotIn,
	Null,
	Present,
	True,
	False,
}

impl MemoryPredicate {
	/// Every predicate, longest suffix first so `not_eq` wins over `eq`
	pub const ALL: [MemoryPredicate; 16] = [
		MemoryPredicate::NotCont,
		MemoryPredicate::Present,
		MemoryPredicate::NotEq,
		MemoryPredicate::NotIn,
		MemoryPredicate::Start,
		MemoryPredicate::False,
		MemoryPredicate::Gteq,
		MemoryPredicate::Lteq,
		MemoryPredicate::Cont,
		MemoryPredicate::Null,
		MemoryPredicate::True,
		MemoryPredicate::End,
		MemoryPredicate::Eq,
		MemoryPredicate::Gt,
		MemoryPredicate::Lt,
		MemoryPredicate::In,
	];

	pub fn suffix(self) -> &'static str {
		match self {
			MemoryPredicate::Eq => "eq",
			MemoryPredicate::NotEq => "not_eq",
			MemoryPredicate::Cont => "cont",
			MemoryPredicate::NotCont => "not_cont",
			MemoryPredicate::Start => "start",
			MemoryPredicate::End => "end",
			MemoryPredicate::Gt => "gt",
			MemoryPredicate::Gteq => "gteq",
			MemoryPredicate::Lt => "lt",
			MemoryPredicate::Lteq => "lteq",
			MemoryPredicate::In => "in",
			MemoryPredicate::NotIn => "not_in",
			MemoryPredicate::Null => "null",
			MemoryPredicate::Present => "present",
			MemoryPredicate::True => "true",
			MemoryPredicate::False => "false",
		}
	}

	/// Split a search key into column and predicate
	///
	/// ```
	/// use query_report_filters::MemoryPredicate;
	///
	/// assert_eq!(
	///     MemoryPredicate::parse_key("created_at_gteq"),
	///     Some(("created_at", MemoryPredicate::Gteq))
	/// );
	/// assert_eq!(
	///     MemoryPredicate::parse_key("status_not_eq"),
	///     Some(("status", MemoryPredicate::NotEq))
	/// );
	/// assert_eq!(MemoryPredicate::parse_key("status"), None);
	/// ```
	pub fn parse_key(key: &str) -> Option<(&str, MemoryPredicate)> {
		Self::ALL.into_iter().find_map(|predicate| {
			let column = key.strip_suffix(predicate.suffix())?.strip_suffix('_')?;
			(!column.is_empty()).then_some((column, predicate))
		})
	}

	fn is_textual(self) -> bool {
		matches!(
			self,
			MemoryPredicate::Cont
				| MemoryPredicate::NotCont
				| MemoryPredicate::Start
				| MemoryPredicate::End
		)
	}

	/// Whether `expected` has a shape this predicate can compare against
	///
	/// Text predicates take a scalar or a list of scalars, any of which may
	/// match.
	fn accepts(self, expected: &Value) -> bool {
		if !self.is_textual() {
			return true;
		}
		match expected {
			Value::Array(values) => values.iter().all(is_scalar),
			other => is_scalar(other),
		}
	}

	fn matches(self, field: Option<&Value>, expected: &Value) -> bool {
		let field = field.unwrap_or(&NULL);
		match self {
			MemoryPredicate::Eq => values_equal(field, expected),
			MemoryPredicate::NotEq => !values_equal(field, expected),
			MemoryPredicate::Cont => text_matches(field, expected, |text, needle| text.contains(needle)),
			MemoryPredicate::NotCont => {
				!text_matches(field, expected, |text, needle| text.contains(needle))
			}
			MemoryPredicate::Start => {
				text_matches(field, expected, |text, needle| text.starts_with(needle))
			}
			MemoryPredicate::End => text_matches(field, expected, |text, needle| text.ends_with(needle)),
			MemoryPredicate::Gt => compare(field, expected) == Some(Ordering::Greater),
			MemoryPredicate::Gteq => matches!(
				compare(field, expected),
				Some(Ordering::Greater | Ordering::Equal)
			),
			MemoryPredicate::Lt => compare(field, expected) == Some(Ordering::Less),
			MemoryPredicate::Lteq => {
				matches!(compare(field, expected), Some(Ordering::Less | Ordering::Equal))
			}
			MemoryPredicate::In => candidates(expected).any(|c| values_equal(field, c)),
			MemoryPredicate::NotIn => !candidates(expected).any(|c| values_equal(field, c)),
			MemoryPredicate::Null => field.is_null() == truthy(expected),
			MemoryPredicate::Present => is_present(field) == truthy(expected),
			MemoryPredicate::True => (field == &Value::Bool(true)) == truthy(expected),
			MemoryPredicate::False => (field == &Value::Bool(false)) == truthy(expected),
		}
	}
}

/// Search backend over [`MemoryQuery`]
///
/// # Examples
///
/// ```
/// use query_report_filters::{MemoryQuery, MemorySearchBackend, ParamBucket, SearchBackend, SearchResult};
/// use serde_json::json;
///
/// let query = MemoryQuery::from_json(json!([
///     {"title": "Rust in Action", "pages": 456},
///     {"title": "Programming Rust", "pages": 738},
///     {"title": "The Go Programming Language", "pages": 380},
/// ]))
/// .unwrap();
///
/// let mut params = ParamBucket::new();
/// params.insert("title_cont".to_string(), json!("Rust"));
/// params.insert("pages_gteq".to_string(), json!("500"));
///
/// let search = MemorySearchBackend::new().search(query, &params).unwrap();
/// assert_eq!(search.result().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySearchBackend {
	strict: bool,
}

impl MemorySearchBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reject keys that do not end in a known predicate
	pub fn strict(mut self) -> Self {
		self.strict = true;
		self
	}
}

impl SearchBackend<MemoryQuery> for MemorySearchBackend {
	type Search = Search<MemoryQuery>;

	fn search(&self, query: MemoryQuery, params: &ParamBucket) -> FilterResult<Self::Search> {
		let mut conditions = Vec::new();
		for (key, expected) in params {
			if !is_present(expected) {
				continue;
			}
			match MemoryPredicate::parse_key(key) {
				Some((_, predicate)) if !predicate.accepts(expected) => {
					if self.strict {
						return Err(FilterError::InvalidParameter(format!(
							"{key}: unsupported value {expected}"
						)));
					}
					tracing::debug!(key = %key, value = %expected, "skipping search key with an unsupported value");
				}
				Some((column, predicate)) => conditions.push((column, predicate, expected)),
				None if self.strict => return Err(FilterError::UnknownPredicate(key.clone())),
				None => tracing::debug!(key = %key, "skipping search key without a known predicate"),
			}
		}

		tracing::trace!(conditions = conditions.len(), rows = query.len(), "memory search");
		let result = query.filter(|row| {
			conditions
				.iter()
				.all(|(column, predicate, expected)| predicate.matches(row.get(*column), expected))
		});
		Ok(Search::new(result, params.clone()))
	}
}

fn text_of(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

fn is_scalar(value: &Value) -> bool {
	matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Whether any non-blank needle in `expected` passes `test` against the field text
fn text_matches(field: &Value, expected: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
	let Some(text) = text_of(field) else {
		return false;
	};
	candidates(expected)
		.filter(|needle| is_present(needle))
		.filter_map(text_of)
		.any(|needle| test(&text, &needle))
}

/// Numeric value of a JSON number or a finite numeric string
fn number_of(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
		_ => None,
	}
}

/// Ordering of a field against an expected value
///
/// Two strings compare lexically. Numbers compare numerically, the other
/// side being parsed when it is a numeric string.
fn compare(field: &Value, expected: &Value) -> Option<Ordering> {
	match (field, expected) {
		(Value::String(left), Value::String(right)) => Some(left.cmp(right)),
		_ => number_of(field)?.partial_cmp(&number_of(expected)?),
	}
}

fn values_equal(field: &Value, expected: &Value) -> bool {
	if (field.is_number() || expected.is_number())
		&& let Some(ordering) = compare(field, expected)
	{
		return ordering == Ordering::Equal;
	}
	match (text_of(field), text_of(expected)) {
		(Some(left), Some(right)) => left == right,
		_ => field == expected,
	}
}

/// Values of an `in` condition: an array, or a single value
fn candidates(expected: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
	match expected {
		Value::Array(values) => Box::new(values.iter()),
		single => Box::new(std::iter::once(single)),
	}
}

fn truthy(expected: &Value) -> bool {
	match expected {
		Value::Bool(flag) => *flag,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => matches!(
			text.trim().to_ascii_lowercase().as_str(),
			"1" | "t" | "true" | "y" | "yes" | "on"
		),
		_ => false,
	}
}

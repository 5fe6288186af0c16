//! Request parameters and the buckets filters read from
//!
//! Filter values travel in named sub-maps of the request parameters: the
//! generic search bucket (`q`) and the custom search bucket
//! (`custom_search`). Values are kept as [`serde_json::Value`] so that both
//! decoded query strings and JSON bodies can be fed in.

use crate::error::{FilterError, FilterResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the bucket consumed by the search backend
pub const GENERIC_BUCKET: &str = "q";

/// Name of the bucket consumed by custom filter predicates
pub const CUSTOM_BUCKET: &str = "custom_search";

/// One sub-map of request parameters, keyed by search key
pub type ParamBucket = IndexMap<String, Value>;

/// Whether a request value carries something to filter on
///
/// Null, `false`, blank strings, empty arrays and empty objects are not
/// present. Numbers and `true` are.
///
/// # Examples
///
/// ```
/// use query_report_filters::is_present;
/// use serde_json::json;
///
/// assert!(is_present(&json!("active")));
/// assert!(is_present(&json!(0)));
/// assert!(!is_present(&json!("   ")));
/// assert!(!is_present(&json!(null)));
/// assert!(!is_present(&json!([])));
/// ```
pub fn is_present(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(_) => true,
		Value::String(text) => !text.trim().is_empty(),
		Value::Array(values) => !values.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Look up a bucket value, treating absent and blank values alike
pub fn present_value<'a>(bucket: &'a ParamBucket, key: &str) -> Option<&'a Value> {
	bucket.get(key).filter(|value| is_present(value))
}

/// Top-level HTTP request parameters
///
/// # Examples
///
/// ```
/// use query_report_filters::RequestParams;
/// use serde_json::json;
///
/// let params = RequestParams::from_query_string(
///     "q[created_at_gteq]=2020-01-01&custom_search[status_eq]=active&page=2",
/// )
/// .unwrap();
///
/// assert_eq!(params.bucket("q").get("created_at_gteq"), Some(&json!("2020-01-01")));
/// assert_eq!(params.bucket("custom_search").get("status_eq"), Some(&json!("active")));
/// assert_eq!(params.get("page"), Some(&json!("2")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(IndexMap<String, Value>);

impl RequestParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build parameters from a JSON object
	pub fn from_json(value: Value) -> FilterResult<Self> {
		match value {
			Value::Object(map) => Ok(Self(map.into_iter().collect())),
			Value::Null => Ok(Self::new()),
			other => Err(FilterError::InvalidParameter(format!(
				"request parameters must be an object, got {other}"
			))),
		}
	}

	/// Decode an `application/x-www-form-urlencoded` query string
	///
	/// `bucket[key]=value` pairs are folded into buckets and
	/// `bucket[key][]=value` pairs accumulate into arrays. Keys without
	/// brackets stay top-level strings.
	pub fn from_query_string(query: &str) -> FilterResult<Self> {
		let pairs: Vec<(String, String)> =
			serde_urlencoded::from_str(query.trim_start_matches('?'))?;

		let mut params = Self::new();
		for (raw_key, value) in pairs {
			match parse_bracket_key(&raw_key) {
				Some(BracketKey {
					bucket,
					key,
					array,
				}) => params.push_bucket_value(bucket, key, value, array),
				None => {
					params.0.insert(raw_key, Value::String(value));
				}
			}
		}
		Ok(params)
	}

	/// Builder variant of [`insert_param`](Self::insert_param)
	pub fn with_param(
		mut self,
		bucket: &str,
		key: impl Into<String>,
		value: impl Into<Value>,
	) -> Self {
		self.insert_param(bucket, key, value);
		self
	}

	/// Set `bucket[key] = value`, creating the bucket when needed
	///
	/// A non-object value already stored under `bucket` is replaced.
	pub fn insert_param(&mut self, bucket: &str, key: impl Into<String>, value: impl Into<Value>) {
		let slot = self
			.0
			.entry(bucket.to_string())
			.or_insert_with(|| Value::Object(Default::default()));
		if !slot.is_object() {
			*slot = Value::Object(Default::default());
		}
		if let Value::Object(map) = slot {
			map.insert(key.into(), value.into());
		}
	}

	/// Set a top-level parameter
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Copy of the named bucket
	///
	/// An absent bucket, or one that is not an object, yields an empty bucket.
	pub fn bucket(&self, name: &str) -> ParamBucket {
		match self.0.get(name) {
			Some(Value::Object(map)) => map
				.iter()
				.map(|(key, value)| (key.clone(), value.clone()))
				.collect(),
			None | Some(Value::Null) => ParamBucket::new(),
			Some(other) => {
				tracing::warn!(bucket = name, value = %other, "ignoring non-map filter bucket");
				ParamBucket::new()
			}
		}
	}

	fn push_bucket_value(&mut self, bucket: String, key: String, value: String, array: bool) {
		let slot = self
			.0
			.entry(bucket)
			.or_insert_with(|| Value::Object(Default::default()));
		if !slot.is_object() {
			tracing::warn!(key = %key, previous = %slot, "bracketed parameter replaces a plain one of the same name");
			*slot = Value::Object(Default::default());
		}
		let Value::Object(map) = slot else {
			return;
		};
		if !array {
			map.insert(key, Value::String(value));
			return;
		}
		match map.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
			Value::Array(values) => values.push(Value::String(value)),
			existing => *existing = Value::Array(vec![Value::String(value)]),
		}
	}
}

impl From<IndexMap<String, Value>> for RequestParams {
	fn from(map: IndexMap<String, Value>) -> Self {
		Self(map)
	}
}

impl FromIterator<(String, Value)> for RequestParams {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

struct BracketKey {
	bucket: String,
	key: String,
	array: bool,
}

/// Split `bucket[key]` / `bucket[key][]` into its parts
fn parse_bracket_key(raw: &str) -> Option<BracketKey> {
	let (bucket, rest) = raw.split_once('[')?;
	let (key, tail) = rest.split_once(']')?;
	if bucket.is_empty() || key.is_empty() {
		return None;
	}
	let array = match tail {
		"" => false,
		"[]" => true,
		_ => {
			tracing::debug!(key = raw, "unsupported nested parameter key");
			return None;
		}
	};
	Some(BracketKey {
		bucket: bucket.to_string(),
		key: key.to_string(),
		array,
	})
}

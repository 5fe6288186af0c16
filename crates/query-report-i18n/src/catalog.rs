//! Message catalog for storing filter labels

use crate::{I18nError, I18nResult};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Labels shipped with the crate, keyed by locale
const BUILTIN_EN: &[(&str, &str)] = &[
	("query_report.filters.from", "From"),
	("query_report.filters.to", "To"),
];

/// A label catalog for a single locale
///
/// Keys are dotted paths such as `query_report.filters.status.equals`.
/// Nested TOML tables or JSON objects are flattened into that form on load.
///
/// # Example
/// ```
/// use query_report_i18n::MessageCatalog;
///
/// let catalog = MessageCatalog::from_toml_str(
///     "en",
///     r#"
///     [query_report.filters]
///     from = "Since"
///
///     [query_report.filters.status]
///     equals = "Status is"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(catalog.get("query_report.filters.from"), Some(&"Since".to_string()));
/// assert_eq!(
///     catalog.get("query_report.filters.status.equals"),
///     Some(&"Status is".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	/// Create an empty catalog for the given locale
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
		}
	}

	/// Catalog holding the labels bundled with this crate
	///
	/// Only `en` ships labels; any other locale yields an empty catalog.
	pub fn builtin(locale: &str) -> Self {
		let mut catalog = Self::new(locale);
		if primary_language(locale) == "en" {
			for (key, text) in BUILTIN_EN {
				catalog.add(*key, *text);
			}
		} else {
			tracing::debug!(locale, "no builtin filter labels for locale");
		}
		catalog
	}

	/// Get the locale for this catalog
	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Add a label
	pub fn add(&mut self, key: impl Into<String>, text: impl Into<String>) {
		self.messages.insert(key.into(), text.into());
	}

	/// Get a label
	pub fn get(&self, key: &str) -> Option<&String> {
		self.messages.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.messages.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// Copy every label of `other` into this catalog, overriding existing keys
	pub fn merge(&mut self, other: MessageCatalog) {
		if other.locale != self.locale {
			tracing::warn!(
				locale = %self.locale,
				incoming = %other.locale,
				"merging catalogs of different locales"
			);
		}
		self.messages.extend(other.messages);
	}

	/// Load a catalog from TOML source
	///
	/// A single top-level table named after the locale (`[en.query_report]`)
	/// is unwrapped, so locale files shared with other tools load as-is.
	pub fn from_toml_str(locale: &str, source: &str) -> I18nResult<Self> {
		let tree: Value = toml::from_str(source)?;
		Self::from_tree(locale, tree)
	}

	/// Load a catalog from JSON source
	pub fn from_json_str(locale: &str, source: &str) -> I18nResult<Self> {
		let tree: Value = serde_json::from_str(source)?;
		Self::from_tree(locale, tree)
	}

	/// Load a catalog from a `.toml` or `.json` file
	pub fn from_path(locale: &str, path: impl AsRef<Path>) -> I18nResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => Self::from_toml_str(locale, &source),
			Some("json") => Self::from_json_str(locale, &source),
			_ => Err(I18nError::InvalidCatalog(format!(
				"unsupported catalog format: {}",
				path.display()
			))),
		}
	}

	fn from_tree(locale: &str, tree: Value) -> I18nResult<Self> {
		let Value::Object(mut root) = tree else {
			return Err(I18nError::InvalidCatalog(
				"catalog root must be a table".to_string(),
			));
		};

		if root.len() == 1
			&& matches!(root.get(locale), Some(Value::Object(_)))
			&& let Some(Value::Object(inner)) = root.remove(locale)
		{
			root = inner;
		}

		let mut catalog = Self::new(locale);
		for (key, value) in root {
			flatten_into(&mut catalog.messages, key, value)?;
		}
		tracing::debug!(locale, labels = catalog.len(), "loaded label catalog");
		Ok(catalog)
	}
}

fn flatten_into(
	messages: &mut HashMap<String, String>,
	prefix: String,
	value: Value,
) -> I18nResult<()> {
	match value {
		Value::String(text) => {
			messages.insert(prefix, text);
		}
		Value::Object(table) => {
			for (key, child) in table {
				flatten_into(messages, format!("{prefix}.{key}"), child)?;
			}
		}
		Value::Number(n) => {
			messages.insert(prefix, n.to_string());
		}
		Value::Bool(b) => {
			messages.insert(prefix, b.to_string());
		}
		Value::Null | Value::Array(_) => {
			return Err(I18nError::InvalidCatalog(format!(
				"{prefix}: expected a string label"
			)));
		}
	}
	Ok(())
}

pub(crate) fn primary_language(locale: &str) -> &str {
	locale.split(['-', '_']).next().unwrap_or(locale)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Translate;
	use rstest::rstest;

	#[rstest]
	fn test_message_catalog_basic() {
		// Arrange
		let mut catalog = MessageCatalog::new("es");
		catalog.add("query_report.filters.from", "Desde");

		// Act
		let result = catalog.get("query_report.filters.from");
		let missing = catalog.get("query_report.filters.to");

		// Assert
		assert_eq!(result, Some(&"Desde".to_string()));
		assert_eq!(missing, None);
	}

	#[rstest]
	#[case("en")]
	#[case("en-US")]
	#[case("en_GB")]
	fn test_builtin_english_labels(#[case] locale: &str) {
		let catalog = MessageCatalog::builtin(locale);

		assert_eq!(catalog.get("query_report.filters.from"), Some(&"From".to_string()));
		assert_eq!(catalog.get("query_report.filters.to"), Some(&"To".to_string()));
	}

	#[rstest]
	fn test_builtin_unknown_locale_is_empty() {
		let catalog = MessageCatalog::builtin("ja");

		assert!(catalog.is_empty());
		assert_eq!(catalog.locale(), "ja");
	}

	#[rstest]
	fn test_toml_unwraps_locale_table() {
		// Arrange
		let source = r#"
			[fr.query_report.filters]
			from = "Du"
			to = "Au"
		"#;

		// Act
		let catalog = MessageCatalog::from_toml_str("fr", source).unwrap();

		// Assert
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.get("query_report.filters.to"), Some(&"Au".to_string()));
	}

	#[rstest]
	fn test_json_nested_keys_are_flattened() {
		let source = r#"{"query_report": {"filters": {"title": {"contains": "Title contains"}}}}"#;

		let catalog = MessageCatalog::from_json_str("en", source).unwrap();

		assert_eq!(
			catalog.get("query_report.filters.title.contains"),
			Some(&"Title contains".to_string())
		);
	}

	#[rstest]
	fn test_array_leaf_is_rejected() {
		let source = r#"{"query_report": {"filters": {"from": ["a", "b"]}}}"#;

		let result = MessageCatalog::from_json_str("en", source);

		assert!(matches!(result, Err(I18nError::InvalidCatalog(_))));
	}

	#[rstest]
	fn test_non_table_root_is_rejected() {
		let result = MessageCatalog::from_json_str("en", r#""just a string""#);

		assert!(matches!(result, Err(I18nError::InvalidCatalog(_))));
	}

	#[rstest]
	fn test_merge_overrides_existing_labels() {
		// Arrange
		let mut base = MessageCatalog::builtin("en");
		let mut overrides = MessageCatalog::new("en");
		overrides.add("query_report.filters.from", "Since");

		// Act
		base.merge(overrides);

		// Assert
		assert_eq!(base.get("query_report.filters.from"), Some(&"Since".to_string()));
		assert_eq!(base.get("query_report.filters.to"), Some(&"To".to_string()));
	}

	#[rstest]
	fn test_from_path_by_extension() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let toml_path = dir.path().join("en.toml");
		std::fs::write(&toml_path, "[query_report.filters]\nto = \"Until\"\n").unwrap();
		let yaml_path = dir.path().join("en.yml");
		std::fs::write(&yaml_path, "query_report: {}\n").unwrap();

		// Act
		let loaded = MessageCatalog::from_path("en", &toml_path).unwrap();
		let unsupported = MessageCatalog::from_path("en", &yaml_path);

		// Assert
		assert_eq!(loaded.get("query_report.filters.to"), Some(&"Until".to_string()));
		assert!(matches!(unsupported, Err(I18nError::InvalidCatalog(_))));
	}

	#[rstest]
	fn test_translate_falls_back_to_key() {
		let catalog = MessageCatalog::builtin("en");

		assert_eq!(
			catalog.translate("query_report.filters.status.equals"),
			"query_report.filters.status.equals"
		);
	}
}

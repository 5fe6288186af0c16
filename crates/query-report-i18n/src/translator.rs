//! Locale-aware label lookup over several catalogs

use crate::Translate;
use crate::catalog::{MessageCatalog, primary_language};
use std::collections::HashMap;

/// Translation context holding one catalog per locale
///
/// Lookup order for a key: the active locale, its primary language
/// (`pt` for `pt-BR`), the fallback locale, the fallback's primary language.
/// When nothing matches, the key itself is returned.
///
/// # Example
/// ```
/// use query_report_i18n::{MessageCatalog, Translate, Translator};
///
/// let mut de = MessageCatalog::new("de");
/// de.add("query_report.filters.to", "Bis");
///
/// let mut translator = Translator::new("de-AT", "en");
/// translator.add_catalog(de);
/// translator.add_catalog(MessageCatalog::builtin("en"));
///
/// assert_eq!(translator.translate("query_report.filters.to"), "Bis");
/// assert_eq!(translator.translate("query_report.filters.from"), "From");
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
	locale: String,
	fallback: String,
	catalogs: HashMap<String, MessageCatalog>,
}

impl Translator {
	pub fn new(locale: impl Into<String>, fallback: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
			fallback: fallback.into(),
			catalogs: HashMap::new(),
		}
	}

	/// Translator with the builtin English labels and `en` as both locales
	pub fn english() -> Self {
		let mut translator = Self::new("en", "en");
		translator.add_catalog(MessageCatalog::builtin("en"));
		translator
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	pub fn fallback(&self) -> &str {
		&self.fallback
	}

	/// Switch the active locale
	pub fn set_locale(&mut self, locale: impl Into<String>) {
		self.locale = locale.into();
	}

	/// Register a catalog under its own locale
	///
	/// Adding a second catalog for the same locale merges the labels, later
	/// catalogs winning on conflicting keys.
	pub fn add_catalog(&mut self, catalog: MessageCatalog) {
		match self.catalogs.get_mut(catalog.locale()) {
			Some(existing) => existing.merge(catalog),
			None => {
				self.catalogs.insert(catalog.locale().to_string(), catalog);
			}
		}
	}

	pub fn catalog(&self, locale: &str) -> Option<&MessageCatalog> {
		self.catalogs.get(locale)
	}

	fn lookup(&self, key: &str) -> Option<&String> {
		[
			self.locale.as_str(),
			primary_language(&self.locale),
			self.fallback.as_str(),
			primary_language(&self.fallback),
		]
		.into_iter()
		.filter_map(|locale| self.catalogs.get(locale))
		.find_map(|catalog| catalog.get(key))
	}
}

impl Default for Translator {
	fn default() -> Self {
		Self::english()
	}
}

impl Translate for Translator {
	fn translate(&self, key: &str) -> String {
		match self.lookup(key) {
			Some(text) => text.clone(),
			None => {
				tracing::trace!(key, locale = %self.locale, "label missing, using key");
				key.to_string()
			}
		}
	}
}

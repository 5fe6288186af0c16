//! Label translation for query-report filters
//!
//! Filters never carry display text of their own. They build a dotted lookup
//! key (for example `query_report.filters.from`) and ask a [`Translate`]
//! implementation for the text. This crate provides that seam together with
//! a [`MessageCatalog`] that can be loaded from TOML or JSON locale files and a
//! [`Translator`] that chains catalogs with a fallback locale.
//!
//! # Example
//!
//! ```
//! use query_report_i18n::{MessageCatalog, Translate, Translator};
//!
//! let mut fr = MessageCatalog::new("fr");
//! fr.add("query_report.filters.from", "Du");
//!
//! let mut translator = Translator::new("fr", "en");
//! translator.add_catalog(fr);
//! translator.add_catalog(MessageCatalog::builtin("en"));
//!
//! assert_eq!(translator.translate("query_report.filters.from"), "Du");
//! assert_eq!(translator.translate("query_report.filters.to"), "To");
//! ```

pub mod catalog;
pub mod translator;

pub use catalog::MessageCatalog;
pub use translator::Translator;

use thiserror::Error;

/// Errors raised while loading label catalogs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum I18nError {
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid catalog: {0}")]
	InvalidCatalog(String),
}

pub type I18nResult<T> = Result<T, I18nError>;

/// Resolves a dotted label key to display text
///
/// Implementations return the key itself when no translation exists, so a
/// missing label never breaks filter construction.
pub trait Translate: Send + Sync {
	fn translate(&self, key: &str) -> String;
}

impl Translate for MessageCatalog {
	fn translate(&self, key: &str) -> String {
		self.get(key).cloned().unwrap_or_else(|| key.to_string())
	}
}

impl<T: Translate + ?Sized> Translate for std::sync::Arc<T> {
	fn translate(&self, key: &str) -> String {
		(**self).translate(key)
	}
}

//! Declarative report configuration
//!
//! A report's filters can be described in TOML or JSON and registered in one
//! go. Custom filters still need their predicate supplied from code.
//!
//! ```toml
//! [settings]
//! custom_pass = "first_eligible"
//!
//! [[filters]]
//! column = "created_at"
//! type = "date"
//! default = ["2020-01-01", "2020-12-31"]
//!
//! [[filters]]
//! column = "owner"
//! custom = true
//! ```

use crate::error::{FilterError, FilterResult};
use crate::options::FilterOptions;
use crate::predicate::Predicate;
use crate::registry::{FilterRegistry, RegistrySettings};
use crate::search::SearchBackend;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One filter entry of a [`ReportConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
	pub column: String,
	/// Whether the filter is applied through a predicate supplied in code
	#[serde(default)]
	pub custom: bool,
	#[serde(flatten)]
	pub options: FilterOptions,
}

/// Filters and registry settings of one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
	pub settings: RegistrySettings,
	pub filters: Vec<FilterConfig>,
}

impl ReportConfig {
	pub fn from_toml_str(source: &str) -> FilterResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_json_str(source: &str) -> FilterResult<Self> {
		Ok(serde_json::from_str(source)?)
	}

	/// Load a `.toml` or `.json` configuration file
	pub fn from_path(path: impl AsRef<Path>) -> FilterResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => Self::from_toml_str(&source),
			Some("json") => Self::from_json_str(&source),
			_ => Err(FilterError::Config(format!(
				"unsupported configuration format: {}",
				path.display()
			))),
		}
	}

	/// Register every configured filter into `registry`, in file order
	///
	/// Custom entries take their predicate from `predicates`, keyed by column.
	/// A custom entry without a predicate is a configuration error; predicates
	/// left unused are logged and dropped.
	pub fn register_into<Q, B: SearchBackend<Q>>(
		&self,
		registry: &mut FilterRegistry<Q, B>,
		mut predicates: HashMap<String, Predicate<Q>>,
	) -> FilterResult<()> {
		for filter in &self.filters {
			if filter.custom {
				let predicate = predicates.remove(&filter.column).ok_or_else(|| {
					FilterError::Config(format!(
						"custom filter `{}` has no predicate",
						filter.column
					))
				})?;
				registry.register_custom(filter.column.clone(), filter.options.clone(), predicate);
			} else {
				registry.register(filter.column.clone(), filter.options.clone());
			}
		}

		for column in predicates.keys() {
			tracing::warn!(column = %column, "predicate supplied for a column with no custom filter");
		}
		Ok(())
	}
}

impl<Q, B: SearchBackend<Q>> FilterRegistry<Q, B> {
	/// Registry with the configured settings and generic filters
	///
	/// Fails when the configuration declares custom filters; use
	/// [`ReportConfig::register_into`] to supply their predicates.
	pub fn from_config(backend: B, config: &ReportConfig) -> FilterResult<Self> {
		let mut registry = Self::new(backend).with_settings(config.settings.clone());
		config.register_into(&mut registry, HashMap::new())?;
		Ok(registry)
	}
}

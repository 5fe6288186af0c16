use thiserror::Error;

/// Errors surfaced by the filter layer
///
/// Missing or blank request values are never errors; these variants cover
/// configuration loading, malformed request input and search backend failures.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FilterError {
	#[error("Search backend error: {0}")]
	Search(String),
	#[error("Unknown search predicate: {0}")]
	UnknownPredicate(String),
	#[error("Invalid filter parameter: {0}")]
	InvalidParameter(String),
	#[error("Invalid filter configuration: {0}")]
	Config(String),
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Query string error: {0}")]
	QueryString(#[from] serde_urlencoded::de::Error),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type FilterResult<T> = Result<T, FilterError>;

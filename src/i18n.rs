//! Label translation module.
//!
//! # Examples
//!
//! ```rust
//! use query_report::i18n::{Translate, Translator};
//!
//! let translator = Translator::english();
//! assert_eq!(translator.translate("query_report.filters.from"), "From");
//! ```

pub use query_report_i18n::*;

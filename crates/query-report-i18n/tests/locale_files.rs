//! Loading locale files from disk into a translator

use query_report_i18n::{I18nError, MessageCatalog, Translate, Translator};
use rstest::*;
use std::fs;
use tempfile::TempDir;

#[fixture]
fn locale_dir() -> TempDir {
	let dir = tempfile::tempdir().unwrap();
	fs::write(
		dir.path().join("fr.toml"),
		r#"
		[fr.query_report.filters]
		from = "Du"
		to = "Au"

		[fr.query_report.filters.status]
		equals = "Statut"
		"#,
	)
	.unwrap();
	fs::write(
		dir.path().join("de.json"),
		r#"{"query_report": {"filters": {"from": "Von"}}}"#,
	)
	.unwrap();
	dir
}

#[rstest]
fn test_translator_over_loaded_files(locale_dir: TempDir) {
	// Arrange
	let fr = MessageCatalog::from_path("fr", locale_dir.path().join("fr.toml")).unwrap();
	let de = MessageCatalog::from_path("de", locale_dir.path().join("de.json")).unwrap();
	let mut translator = Translator::new("fr", "en");
	translator.add_catalog(fr);
	translator.add_catalog(de);
	translator.add_catalog(MessageCatalog::builtin("en"));

	// Act
	let french = translator.translate("query_report.filters.status.equals");
	translator.set_locale("de-CH");
	let german_from = translator.translate("query_report.filters.from");
	let german_to = translator.translate("query_report.filters.to");

	// Assert
	assert_eq!(french, "Statut");
	assert_eq!(german_from, "Von");
	assert_eq!(german_to, "To");
}

#[rstest]
fn test_missing_file_is_io_error(locale_dir: TempDir) {
	let result = MessageCatalog::from_path("it", locale_dir.path().join("it.toml"));

	assert!(matches!(result, Err(I18nError::Io(_))));
}

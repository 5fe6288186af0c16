//! End-to-end report filtering through the facade crate

use query_report::prelude::*;
use rstest::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

#[fixture]
fn orders() -> MemoryQuery {
	MemoryQuery::from_json(json!([
		{"id": 1, "created_at": "2019-11-30", "customer": "Ada Lovelace", "status": "paid", "owner": "ada"},
		{"id": 2, "created_at": "2020-02-14", "customer": "Grace Hopper", "status": "paid", "owner": "grace"},
		{"id": 3, "created_at": "2020-06-01", "customer": "Alan Turing", "status": "refunded", "owner": "ada"},
		{"id": 4, "created_at": "2021-01-09", "customer": "Ada Byron", "status": "paid", "owner": "ada"},
	]))
	.unwrap()
}

fn ids(query: &MemoryQuery) -> Vec<i64> {
	query
		.records()
		.iter()
		.filter_map(|row| row.get("id").and_then(Value::as_i64))
		.collect()
}

fn owner_predicate() -> Predicate<MemoryQuery> {
	Predicate::one(|query: MemoryQuery, owner: &Value| {
		query.filter(|row| row.get("owner") == Some(owner))
	})
}

fn report_registry() -> FilterRegistry<MemoryQuery, MemorySearchBackend> {
	let mut registry = FilterRegistry::new(MemorySearchBackend::new());
	registry.register(
		"created_at",
		FilterOptions::from("date").with_default(json!(["2020-01-01", "2020-12-31"])),
	);
	registry.register("customer", "text");
	registry.register_custom("owner", FilterOptions::new(), owner_predicate());
	registry
}

#[rstest]
fn test_defaults_restrict_the_report(orders: MemoryQuery) {
	// Arrange
	let mut registry = report_registry();

	// Act
	let result = registry.apply_filters(orders, &RequestParams::new()).unwrap();

	// Assert
	assert_eq!(ids(&result), vec![2, 3]);
}

#[rstest]
fn test_query_string_drives_generic_and_custom_filters(orders: MemoryQuery) {
	// Arrange
	let mut registry = report_registry();
	let params = RequestParams::from_query_string(
		"q[created_at_gteq]=2019-01-01&q[created_at_lteq]=2021-12-31\
		 &q[customer_cont]=Ada&custom_search[owner_eq]=ada",
	)
	.unwrap();

	// Act
	let result = registry.apply_filters(orders, &params).unwrap();

	// Assert
	assert_eq!(ids(&result), vec![1, 4]);
	let search = registry.last_search().unwrap();
	assert_eq!(search.params().get("customer_cont"), Some(&json!("Ada")));
}

#[rstest]
fn test_blank_request_values_fall_back_to_nothing(orders: MemoryQuery) {
	// Arrange
	let mut registry = report_registry();
	let params = RequestParams::from_query_string("q[customer_cont]=&custom_search[owner_eq]=").unwrap();

	// Act
	let result = registry.apply_filters(orders, &params).unwrap();

	// Assert
	assert_eq!(ids(&result), vec![2, 3]);
}

#[rstest]
fn test_configured_report(orders: MemoryQuery) {
	// Arrange
	let config = ReportConfig::from_toml_str(
		r#"
		[settings]
		custom_pass = "until_applied"

		[[filters]]
		column = "status"
		default = "paid"

		[[filters]]
		column = "owner"
		custom = true
		"#,
	)
	.unwrap();
	let mut registry =
		FilterRegistry::new(MemorySearchBackend::new()).with_settings(config.settings.clone());
	let predicates = HashMap::from([("owner".to_string(), owner_predicate())]);
	config.register_into(&mut registry, predicates).unwrap();
	let params = RequestParams::new().with_param("custom_search", "owner_eq", "ada");

	// Act
	let result = registry.apply_filters(orders, &params).unwrap();

	// Assert
	assert_eq!(ids(&result), vec![1, 4]);
	assert_eq!(registry.settings().custom_pass, CustomPassPolicy::UntilApplied);
}

#[rstest]
fn test_strict_backend_reports_unknown_keys(orders: MemoryQuery) {
	let mut registry = FilterRegistry::new(MemorySearchBackend::new().strict());
	let params = RequestParams::new().with_param("q", "customer_sounds_like", "ada");

	let result = registry.apply_filters(orders, &params);

	assert!(matches!(result, Err(FilterError::UnknownPredicate(_))));
	assert!(registry.last_search().is_none());
}

#[rstest]
fn test_labels_follow_translator() {
	// Arrange
	let mut fr = MessageCatalog::new("fr");
	fr.add("query_report.filters.from", "Du");
	fr.add("query_report.filters.to", "Au");
	fr.add("query_report.filters.customer.contains", "Client contient");
	let mut translator = Translator::new("fr", "en");
	translator.add_catalog(fr);
	translator.add_catalog(MessageCatalog::builtin("en"));
	let mut registry =
		FilterRegistry::<MemoryQuery, _>::new(MemorySearchBackend::new()).with_translator(Arc::new(translator));

	// Act
	registry.register("created_at", "date");
	registry.register("customer", "text");
	registry.register("status", FilterOptions::new());

	// Assert
	let created_at = registry.get("created_at").unwrap().comparators();
	assert_eq!(created_at.label("gteq"), Some("Du"));
	assert_eq!(created_at.label("lteq"), Some("Au"));
	assert_eq!(
		registry.get("customer").unwrap().comparators().label("cont"),
		Some("Client contient")
	);
	assert_eq!(
		registry.get("status").unwrap().comparators().label("eq"),
		Some("query_report.filters.status.equals")
	);
}

#[rstest]
fn test_mismatched_range_filter_ends_the_custom_pass(orders: MemoryQuery) {
	// Arrange
	let mut registry = FilterRegistry::new(MemorySearchBackend::new());
	registry.register_custom(
		"created_at",
		"date",
		Predicate::one(|query: MemoryQuery, _: &Value| query),
	);
	registry.register_custom("owner", FilterOptions::new(), owner_predicate());
	let params = RequestParams::from_query_string("custom_search[owner_eq]=ada").unwrap();

	// Act
	let result = registry.apply_filters(orders, &params).unwrap();

	// Assert
	assert_eq!(ids(&result), vec![1, 2, 3, 4]);
}

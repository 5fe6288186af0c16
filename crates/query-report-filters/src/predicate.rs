//! User-supplied predicates for custom filters

use serde_json::Value;
use std::fmt;

pub type OneArgFn<Q> = dyn Fn(Q, &Value) -> Q + Send + Sync;
pub type TwoArgFn<Q> = dyn Fn(Q, &Value, &Value) -> Q + Send + Sync;

/// Query transformation attached to a custom filter
///
/// A filter with one comparator takes a [`OneArg`](Predicate::OneArg)
/// predicate, a filter with two comparators (a range) takes a
/// [`TwoArg`](Predicate::TwoArg) predicate.
///
/// # Examples
///
/// ```
/// use query_report_filters::Predicate;
/// use serde_json::json;
///
/// let predicate = Predicate::one(|query: Vec<&str>, value| {
///     query.into_iter().filter(|status| value == *status).collect()
/// });
/// assert_eq!(predicate.arity(), 1);
///
/// if let Predicate::OneArg(apply) = &predicate {
///     assert_eq!(apply(vec!["active", "archived"], &json!("active")), vec!["active"]);
/// }
/// ```
pub enum Predicate<Q> {
	OneArg(Box<OneArgFn<Q>>),
	TwoArg(Box<TwoArgFn<Q>>),
}

impl<Q> Predicate<Q> {
	/// Predicate receiving the query and the single filter value
	pub fn one<F>(predicate: F) -> Self
	where
		F: Fn(Q, &Value) -> Q + Send + Sync + 'static,
	{
		Predicate::OneArg(Box::new(predicate))
	}

	/// Predicate receiving the query and both range values
	pub fn two<F>(predicate: F) -> Self
	where
		F: Fn(Q, &Value, &Value) -> Q + Send + Sync + 'static,
	{
		Predicate::TwoArg(Box::new(predicate))
	}

	/// Number of filter values the predicate expects
	pub fn arity(&self) -> usize {
		match self {
			Predicate::OneArg(_) => 1,
			Predicate::TwoArg(_) => 2,
		}
	}
}

impl<Q> fmt::Debug for Predicate<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Predicate::OneArg(_) => f.write_str("Predicate::OneArg(..)"),
			Predicate::TwoArg(_) => f.write_str("Predicate::TwoArg(..)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_two_arg_predicate() {
		let between = Predicate::two(|query: Vec<i64>, low: &Value, high: &Value| {
			let (low, high) = (low.as_i64().unwrap_or(i64::MIN), high.as_i64().unwrap_or(i64::MAX));
			query.into_iter().filter(|n| (low..=high).contains(n)).collect()
		});

		assert_eq!(between.arity(), 2);
		let Predicate::TwoArg(apply) = &between else {
			panic!("expected a two-value predicate");
		};
		assert_eq!(apply(vec![1, 5, 9], &json!(2), &json!(9)), vec![5, 9]);
	}

	#[rstest]
	fn test_arity_follows_constructor() {
		let one = Predicate::one(|query: u32, _: &Value| query + 1);
		let two = Predicate::two(|query: u32, _: &Value, _: &Value| query + 2);

		assert_eq!(one.arity(), 1);
		assert_eq!(two.arity(), 2);
	}

	#[rstest]
	fn test_debug_hides_closure() {
		let one = Predicate::one(|query: u32, _: &Value| query);

		assert_eq!(format!("{one:?}"), "Predicate::OneArg(..)");
	}
}

//! Per-file bucketing of parsed diagnostics.

use std::collections::HashMap;

use tracing::trace;

use crate::problem::{Problem, RawProblem};

const BUCKET_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bucket");

/// Partitions `problems` into one list per entry of `files`.
///
/// The result is index-aligned with `files` and preserves input order within
/// each list. Diagnostics naming a file outside `files` are dropped. When a
/// file name appears more than once in `files`, its last position receives
/// the diagnostics. An empty `problems` slice yields an empty result rather
/// than a list of empty buckets.
///
/// # Example
///
/// ```
/// use compilot_toolchains::{RawProblem, bucket_problems};
///
/// let files = vec!["a.c".to_owned(), "b.c".to_owned()];
/// let problems = [RawProblem::new("b.c", "error", 1, 1, "boom")];
/// let buckets = bucket_problems(&files, &problems);
/// assert!(buckets[0].is_empty());
/// assert_eq!(buckets[1][0].text(), "boom");
/// ```
#[must_use]
pub fn bucket_problems(files: &[String], problems: &[RawProblem]) -> Vec<Vec<Problem>> {
    if problems.is_empty() {
        return Vec::new();
    }
    let index: HashMap<&str, usize> = files
        .iter()
        .enumerate()
        .map(|(position, file)| (file.as_str(), position))
        .collect();
    let mut buckets = vec![Vec::new(); files.len()];
    for problem in problems {
        match index
            .get(problem.file())
            .and_then(|&position| buckets.get_mut(position))
        {
            Some(bucket) => bucket.push(Problem::from(problem)),
            None => trace!(
                target: BUCKET_TARGET,
                file = problem.file(),
                row = problem.row(),
                "dropping diagnostic for unrequested file"
            ),
        }
    }
    buckets
}

//! Test outcomes and run summaries

use std::time::Duration;

/// Outcome of a single test method
///
/// The only constructors are [`TestResult::pass`] and [`TestResult::fail`],
/// so a result carries an error message exactly when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    name: String,
    error: Option<String>,
    duration: Duration,
}

impl TestResult {
    /// A passing result
    pub fn pass(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            error: None,
            duration,
        }
    }

    /// A failing result with the message of the underlying cause
    pub fn fail(name: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            error: Some(error.into()),
            duration,
        }
    }

    /// Qualified name, `Component.method`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the test passed
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// Failure message, present iff the test failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Wall-clock time from before setup until after teardown
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Aggregate of one full run
///
/// Results keep execution order. Counts are recomputed from the results
/// whenever the sequence changes, never adjusted incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSummary {
    total: usize,
    passed: usize,
    failed: usize,
    results: Vec<TestResult>,
}

impl TestSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a finalized summary from an ordered result sequence
    pub fn from_results(results: Vec<TestResult>) -> Self {
        let mut summary = Self {
            results,
            ..Self::default()
        };
        summary.recount();
        summary
    }

    /// Append one component's batch of results
    pub fn extend(&mut self, batch: impl IntoIterator<Item = TestResult>) {
        self.results.extend(batch);
        self.recount();
    }

    fn recount(&mut self) {
        self.total = self.results.len();
        self.passed = self.results.iter().filter(|r| r.passed()).count();
        self.failed = self.results.iter().filter(|r| !r.passed()).count();
    }

    /// Number of executed tests
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of passing tests
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failing tests
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// All results in execution order
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Failed results in execution order
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Sum of per-test durations
    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(TestResult::duration).sum()
    }

    /// True when no test failed (an empty run counts as a success)
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pass_has_no_error() {
        let result = TestResult::pass("SampleTests.test_basic_math", ms(3));
        assert!(result.passed());
        assert_eq!(result.error(), None);
        assert_eq!(result.duration(), ms(3));
    }

    #[test]
    fn test_fail_keeps_message() {
        let result = TestResult::fail("SampleTests.test_that_fails", "This test always fails", ms(1));
        assert!(!result.passed());
        assert_eq!(result.error(), Some("This test always fails"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = TestSummary::new();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.passed(), 0);
        assert_eq!(summary.failed(), 0);
        assert!(summary.results().is_empty());
        assert!(summary.is_success());
    }

    #[test]
    fn test_extend_recounts_and_keeps_order() {
        let mut summary = TestSummary::new();
        summary.extend(vec![TestResult::pass("A.one", ms(1))]);
        summary.extend(vec![
            TestResult::fail("B.two", "nope", ms(2)),
            TestResult::pass("B.three", ms(3)),
        ]);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 1);
        let names: Vec<_> = summary.results().iter().map(TestResult::name).collect();
        assert_eq!(names, vec!["A.one", "B.two", "B.three"]);
        assert_eq!(summary.total_duration(), ms(6));
        assert!(!summary.is_success());
    }

    #[test]
    fn test_failures_iterator() {
        let summary = TestSummary::from_results(vec![
            TestResult::fail("A.one", "first", ms(0)),
            TestResult::pass("A.two", ms(0)),
            TestResult::fail("A.three", "second", ms(0)),
        ]);
        let failed: Vec<_> = summary.failures().map(TestResult::name).collect();
        assert_eq!(failed, vec!["A.one", "A.three"]);
    }

    proptest! {
        #[test]
        fn prop_counts_always_match_results(outcomes in proptest::collection::vec(any::<bool>(), 0..64)) {
            let results: Vec<_> = outcomes
                .iter()
                .enumerate()
                .map(|(i, ok)| {
                    let name = format!("C.m{}", i);
                    if *ok {
                        TestResult::pass(name, Duration::ZERO)
                    } else {
                        TestResult::fail(name, "failed", Duration::ZERO)
                    }
                })
                .collect();

            let summary = TestSummary::from_results(results);
            prop_assert_eq!(summary.total(), summary.passed() + summary.failed());
            prop_assert_eq!(summary.total(), summary.results().len());
            prop_assert_eq!(summary.passed(), outcomes.iter().filter(|ok| **ok).count());
        }
    }
}

//! Site Counts test utilities.
//!
//! Mock providers with builder APIs, a configurable locale stub, and
//! assertion helpers for rendered markup.

use std::cell::RefCell;

use site_counts_sdk::i18n::{Translator, group_thousands};
use site_counts_sdk::provider::{ContentTypeProvider, ProviderError, ProviderResult, QueryProvider};
use site_counts_sdk::types::{
    ItemId, QueryCriteria, QueryResultItem, StatusCounts, TypeLabels, status,
};

/// A content type registry backed by a list, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MockTypes {
    types: Vec<(String, TypeLabels, StatusCounts)>,
    fail: Option<ProviderError>,
}

impl MockTypes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose every call fails with `err`.
    pub fn failing(err: ProviderError) -> Self {
        Self {
            types: Vec::new(),
            fail: Some(err),
        }
    }

    /// Add a type with `count` items in the `publish` status.
    pub fn published(self, slug: &str, singular: &str, plural: &str, count: u64) -> Self {
        self.with_counts(
            slug,
            singular,
            plural,
            StatusCounts::new().with(status::PUBLISH, count),
        )
    }

    /// Add a type with explicit status counts.
    pub fn with_counts(
        mut self,
        slug: &str,
        singular: &str,
        plural: &str,
        counts: StatusCounts,
    ) -> Self {
        self.types
            .push((slug.to_string(), TypeLabels::new(singular, plural), counts));
        self
    }

    fn find(&self, slug: &str) -> ProviderResult<&(String, TypeLabels, StatusCounts)> {
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.types
            .iter()
            .find(|(s, _, _)| s == slug)
            .ok_or_else(|| ProviderError::UnknownType(slug.to_string()))
    }
}

impl ContentTypeProvider for MockTypes {
    fn list_public_types(&self) -> ProviderResult<Vec<String>> {
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        Ok(self.types.iter().map(|(s, _, _)| s.clone()).collect())
    }

    fn count_by_status(&self, slug: &str) -> ProviderResult<StatusCounts> {
        self.find(slug).map(|(_, _, counts)| counts.clone())
    }

    fn labels(&self, slug: &str) -> ProviderResult<TypeLabels> {
        self.find(slug).map(|(_, labels, _)| labels.clone())
    }
}

/// A query engine that returns canned results and records every criteria
/// it was called with.
#[derive(Debug, Default)]
pub struct MockQuery {
    results: Vec<QueryResultItem>,
    fail: Option<ProviderError>,
    calls: RefCell<Vec<QueryCriteria>>,
}

impl MockQuery {
    /// Always return no items.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Always return `results`, ignoring the criteria.
    pub fn returning(results: Vec<QueryResultItem>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    /// Always fail with `err`.
    pub fn failing(err: ProviderError) -> Self {
        Self {
            fail: Some(err),
            ..Self::default()
        }
    }

    /// Criteria received so far, oldest first.
    pub fn calls(&self) -> Vec<QueryCriteria> {
        self.calls.borrow().clone()
    }
}

impl QueryProvider for MockQuery {
    fn query(&self, criteria: &QueryCriteria) -> ProviderResult<Vec<QueryResultItem>> {
        self.calls.borrow_mut().push(criteria.clone());
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(self.results.clone()),
        }
    }
}

/// Build result items with ids 1, 2, 3… from titles.
pub fn titles(titles: &[&str]) -> Vec<QueryResultItem> {
    titles
        .iter()
        .zip(1u64..)
        .map(|(title, id)| QueryResultItem::new(ItemId(id), *title))
        .collect()
}

/// A translator with a pluggable plural rule and thousands separator.
///
/// Strings are returned untranslated.
pub struct LocaleStub {
    thousands_sep: String,
    singular: Box<dyn Fn(u64) -> bool>,
}

impl LocaleStub {
    /// `singular(n)` returns true when `n` takes the singular form.
    pub fn new(thousands_sep: &str, singular: impl Fn(u64) -> bool + 'static) -> Self {
        Self {
            thousands_sep: thousands_sep.to_string(),
            singular: Box::new(singular),
        }
    }
}

impl Translator for LocaleStub {
    fn translate(&self, text: &str, _context: &str, _domain: &str) -> String {
        text.to_string()
    }

    fn translate_plural(
        &self,
        single: &str,
        plural: &str,
        n: u64,
        _context: &str,
        _domain: &str,
    ) -> String {
        if (self.singular)(n) { single } else { plural }.to_string()
    }

    fn format_number(&self, n: u64) -> String {
        group_thousands(n, &self.thousands_sep)
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that `needles` all appear, in the given order.
    pub fn in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!("Expected '{needle}' after byte {from}\nActual: {haystack}"),
            }
        }
    }
}

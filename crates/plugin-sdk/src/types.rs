//! Core types shared between blocks and the kernel.
//!
//! Every value here is request-scoped: built for one render call and
//! dropped when the markup has been returned.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Publication status names used by the content store.
pub mod status {
    pub const PUBLISH: &str = "publish";
    pub const INHERIT: &str = "inherit";
    pub const DRAFT: &str = "draft";
    pub const PENDING: &str = "pending";
    pub const PRIVATE: &str = "private";
    pub const FUTURE: &str = "future";
    pub const TRASH: &str = "trash";
    pub const AUTO_DRAFT: &str = "auto-draft";
}

/// Slug of the attachment content type. Attachments inherit their
/// parent's status, so they are counted from the `inherit` bucket.
pub const ATTACHMENT_TYPE: &str = "attachment";

/// Singular and plural display labels of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLabels {
    pub singular: String,
    pub plural: String,
}

impl TypeLabels {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

/// Per-status item totals for one content type.
///
/// Statuses that were never counted read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCounts(HashMap<String, u64>);

impl StatusCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total for a status (0 when absent).
    pub fn get(&self, status: &str) -> u64 {
        self.0.get(status).copied().unwrap_or(0)
    }

    /// Overwrite the total for a status.
    pub fn set(&mut self, status: &str, count: u64) {
        self.0.insert(status.to_string(), count);
    }

    /// Add one to a status.
    pub fn increment(&mut self, status: &str) {
        *self.0.entry(status.to_string()).or_insert(0) += 1;
    }

    /// Builder-style `set`.
    pub fn with(mut self, status: &str, count: u64) -> Self {
        self.set(status, count);
        self
    }
}

/// A public content type with its labels and displayable count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeSummary {
    pub slug: String,
    pub singular_label: String,
    pub plural_label: String,
    pub published_count: u64,
}

impl ContentTypeSummary {
    /// The status bucket that holds the displayable count for a type.
    pub fn count_status(slug: &str) -> &'static str {
        if slug == ATTACHMENT_TYPE {
            status::INHERIT
        } else {
            status::PUBLISH
        }
    }

    /// Combine labels and status counts into a summary.
    pub fn from_parts(slug: &str, labels: TypeLabels, counts: &StatusCounts) -> Self {
        Self {
            slug: slug.to_string(),
            singular_label: labels.singular,
            plural_label: labels.plural,
            published_count: counts.get(Self::count_status(slug)),
        }
    }
}

/// Display attributes handed to a block by the host.
///
/// Only `className` is consumed; any other key is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderAttributes {
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl RenderAttributes {
    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
        }
    }

    /// Parse the host attributes map.
    ///
    /// A map that is not an object, or whose `className` is not a string,
    /// yields default attributes.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// The CSS class to render, if any. Empty strings count as absent.
    pub fn css_class(&self) -> Option<&str> {
        self.class_name.as_deref().filter(|c| !c.is_empty())
    }
}

/// Status filter for content queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every status the host considers listable.
    Any,
    /// Exactly one status.
    Only(String),
}

/// Comparison operators for date clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compare {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Compare {
    /// Evaluate `lhs <op> rhs`.
    pub fn apply(self, lhs: u32, rhs: u32) -> bool {
        match self {
            Compare::Eq => lhs == rhs,
            Compare::Ne => lhs != rhs,
            Compare::Gt => lhs > rhs,
            Compare::Gte => lhs >= rhs,
            Compare::Lt => lhs < rhs,
            Compare::Lte => lhs <= rhs,
        }
    }
}

/// Date component a clause compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

/// One comparison on a component of the item's creation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateClause {
    pub part: DatePart,
    pub compare: Compare,
    pub value: u32,
}

impl DateClause {
    pub fn hour(compare: Compare, value: u32) -> Self {
        Self {
            part: DatePart::Hour,
            compare,
            value,
        }
    }
}

/// How date clauses combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    #[default]
    And,
    Or,
}

/// A set of date clauses and their conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateQuery {
    #[serde(default)]
    pub relation: Relation,
    #[serde(default)]
    pub clauses: Vec<DateClause>,
}

impl DateQuery {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Structured filter for a content query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    /// Content type slugs to include.
    pub item_types: Vec<String>,
    /// Maximum number of results (`None` = unlimited).
    pub per_page: Option<usize>,
    pub status: StatusFilter,
    /// Required tag slug.
    pub tag: Option<String>,
    /// Required category slug.
    pub category: Option<String>,
    /// Items never returned.
    #[serde(default)]
    pub exclude: Vec<ItemId>,
    #[serde(default)]
    pub date_query: DateQuery,
}

/// Minimal projection of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResultItem {
    pub id: ItemId,
    pub title: String,
}

impl QueryResultItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

//! Fixed criteria for the recent-items listing.

use site_counts_sdk::types::{
    Compare, DateClause, DateQuery, ItemId, QueryCriteria, Relation, StatusFilter,
};

/// Immutable description of the listing's filter.
///
/// Only the excluded item varies between renders; see [`ListingConfig::criteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    pub item_types: &'static [&'static str],
    pub per_page: usize,
    pub tag: &'static str,
    pub category: &'static str,
    /// Lower bound of the creation hour, inclusive.
    pub earliest_hour: u32,
    /// Upper bound of the creation hour, inclusive.
    pub latest_hour: u32,
}

/// Five posts or pages in any status, tagged `foo`, filed under `baz`,
/// created between 09:00 and 17:59.
pub const RECENT_POSTS: ListingConfig = ListingConfig {
    item_types: &["post", "page"],
    per_page: 5,
    tag: "foo",
    category: "baz",
    earliest_hour: 9,
    latest_hour: 17,
};

impl ListingConfig {
    /// Build the query for a render inside `current`, which is excluded.
    pub fn criteria(&self, current: ItemId) -> QueryCriteria {
        QueryCriteria {
            item_types: self.item_types.iter().map(|t| t.to_string()).collect(),
            per_page: Some(self.per_page),
            status: StatusFilter::Any,
            tag: Some(self.tag.to_string()),
            category: Some(self.category.to_string()),
            exclude: vec![current],
            date_query: DateQuery {
                relation: Relation::And,
                clauses: vec![
                    DateClause::hour(Compare::Gte, self.earliest_hour),
                    DateClause::hour(Compare::Lte, self.latest_hour),
                ],
            },
        }
    }
}

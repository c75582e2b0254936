//! Query engine over stored items.
//!
//! Every criterion is ANDed: type, status, tag, category, exclusion, and
//! the date query. Within the date query, clauses combine by its
//! relation. Results are newest first, ties broken by descending id.

use chrono::{Datelike, NaiveDateTime, Timelike};
use site_counts_sdk::provider::{ProviderError, ProviderResult};
use site_counts_sdk::types::{
    DateClause, DatePart, DateQuery, QueryCriteria, QueryResultItem, Relation, StatusFilter,
    status,
};

use super::store::StoredItem;

/// Statuses that `StatusFilter::Any` never matches.
const EXCLUDED_FROM_ANY: &[&str] = &[status::TRASH, status::AUTO_DRAFT];

/// Run `criteria` against `items`.
pub(crate) fn run(
    items: &[StoredItem],
    criteria: &QueryCriteria,
) -> ProviderResult<Vec<QueryResultItem>> {
    validate(criteria)?;

    let mut matched: Vec<&StoredItem> = items.iter().filter(|i| matches(i, criteria)).collect();
    matched.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));

    let limit = criteria.per_page.unwrap_or(usize::MAX);
    Ok(matched
        .into_iter()
        .take(limit)
        .map(|i| QueryResultItem::new(i.id, i.title.clone()))
        .collect())
}

fn validate(criteria: &QueryCriteria) -> ProviderResult<()> {
    if criteria.item_types.is_empty() {
        return Err(ProviderError::InvalidCriteria(
            "no content types requested".into(),
        ));
    }
    if criteria.per_page == Some(0) {
        return Err(ProviderError::InvalidCriteria(
            "per_page must be at least 1".into(),
        ));
    }
    for clause in &criteria.date_query.clauses {
        let (min, max) = part_range(clause.part);
        if clause.value < min || clause.value > max {
            return Err(ProviderError::InvalidCriteria(format!(
                "{:?} value {} outside {min}..={max}",
                clause.part, clause.value
            )));
        }
    }
    Ok(())
}

fn part_range(part: DatePart) -> (u32, u32) {
    match part {
        DatePart::Year => (1000, 9999),
        DatePart::Month => (1, 12),
        DatePart::Day => (1, 31),
        DatePart::Hour => (0, 23),
        DatePart::Minute => (0, 59),
    }
}

fn matches(item: &StoredItem, criteria: &QueryCriteria) -> bool {
    criteria.item_types.iter().any(|t| *t == item.item_type)
        && status_matches(&item.status, &criteria.status)
        && criteria
            .tag
            .as_ref()
            .is_none_or(|tag| item.tags.contains(tag))
        && criteria
            .category
            .as_ref()
            .is_none_or(|cat| item.categories.contains(cat))
        && !criteria.exclude.contains(&item.id)
        && date_matches(&item.created, &criteria.date_query)
}

fn status_matches(item_status: &str, filter: &StatusFilter) -> bool {
    match filter {
        StatusFilter::Any => !EXCLUDED_FROM_ANY.contains(&item_status),
        StatusFilter::Only(s) => s == item_status,
    }
}

fn date_matches(created: &NaiveDateTime, query: &DateQuery) -> bool {
    if query.is_empty() {
        return true;
    }
    let check = |clause: &DateClause| {
        clause
            .compare
            .apply(date_part(created, clause.part), clause.value)
    };
    match query.relation {
        Relation::And => query.clauses.iter().all(check),
        Relation::Or => query.clauses.iter().any(check),
    }
}

fn date_part(dt: &NaiveDateTime, part: DatePart) -> u32 {
    match part {
        DatePart::Year => u32::try_from(dt.year()).unwrap_or(0),
        DatePart::Month => dt.month(),
        DatePart::Day => dt.day(),
        DatePart::Hour => dt.hour(),
        DatePart::Minute => dt.minute(),
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use site_counts_sdk::types::{Compare, ItemId};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn item(id: u64, item_type: &str, status: &str, created: NaiveDateTime) -> StoredItem {
        StoredItem {
            id: ItemId(id),
            item_type: item_type.into(),
            title: format!("T{id}"),
            status: status.into(),
            tags: vec!["foo".into()],
            categories: vec!["baz".into()],
            created,
        }
    }

    fn criteria() -> QueryCriteria {
        QueryCriteria {
            item_types: vec!["post".into(), "page".into()],
            per_page: Some(5),
            status: StatusFilter::Any,
            tag: Some("foo".into()),
            category: Some("baz".into()),
            exclude: vec![],
            date_query: DateQuery {
                relation: Relation::And,
                clauses: vec![
                    DateClause::hour(Compare::Gte, 9),
                    DateClause::hour(Compare::Lte, 17),
                ],
            },
        }
    }

    fn ids(results: &[QueryResultItem]) -> Vec<u64> {
        results.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn hour_window_is_inclusive() {
        let items = vec![
            item(1, "post", "publish", at(1, 8, 59)),
            item(2, "post", "publish", at(1, 9, 0)),
            item(3, "post", "publish", at(1, 17, 59)),
            item(4, "post", "publish", at(1, 18, 0)),
        ];
        let results = run(&items, &criteria()).unwrap();
        assert_eq!(ids(&results), vec![3, 2]);
    }

    #[test]
    fn or_relation_matches_either_clause() {
        let items = vec![
            item(1, "post", "publish", at(1, 3, 0)),
            item(2, "post", "publish", at(1, 20, 0)),
        ];
        let mut c = criteria();
        c.date_query.relation = Relation::Or;
        // Every hour satisfies ">= 9 OR <= 17".
        assert_eq!(run(&items, &c).unwrap().len(), 2);
    }

    #[test]
    fn requires_tag_and_category() {
        let mut no_tag = item(1, "post", "publish", at(1, 10, 0));
        no_tag.tags = vec!["bar".into()];
        let mut no_cat = item(2, "post", "publish", at(1, 10, 0));
        no_cat.categories.clear();
        let both = item(3, "post", "publish", at(1, 10, 0));

        let results = run(&[no_tag, no_cat, both], &criteria()).unwrap();
        assert_eq!(ids(&results), vec![3]);
    }

    #[test]
    fn filters_by_type() {
        let items = vec![
            item(1, "post", "publish", at(1, 10, 0)),
            item(2, "page", "publish", at(2, 10, 0)),
            item(3, "attachment", "inherit", at(3, 10, 0)),
        ];
        assert_eq!(ids(&run(&items, &criteria()).unwrap()), vec![2, 1]);
    }

    #[test]
    fn any_status_skips_trash_and_auto_drafts() {
        let items = vec![
            item(1, "post", "publish", at(1, 10, 0)),
            item(2, "post", "draft", at(2, 10, 0)),
            item(3, "post", "private", at(3, 10, 0)),
            item(4, "post", "trash", at(4, 10, 0)),
            item(5, "post", "auto-draft", at(5, 10, 0)),
        ];
        assert_eq!(ids(&run(&items, &criteria()).unwrap()), vec![3, 2, 1]);

        let mut only = criteria();
        only.status = StatusFilter::Only("trash".into());
        assert_eq!(ids(&run(&items, &only).unwrap()), vec![4]);
    }

    #[test]
    fn excludes_listed_ids() {
        let items = vec![
            item(1, "post", "publish", at(1, 10, 0)),
            item(2, "post", "publish", at(2, 10, 0)),
        ];
        let mut c = criteria();
        c.exclude = vec![ItemId(2)];
        assert_eq!(ids(&run(&items, &c).unwrap()), vec![1]);
    }

    #[test]
    fn newest_first_and_limited() {
        let items: Vec<StoredItem> = (1..=8)
            .map(|d| item(u64::from(d), "post", "publish", at(d, 12, 0)))
            .collect();
        assert_eq!(ids(&run(&items, &criteria()).unwrap()), vec![8, 7, 6, 5, 4]);

        let mut unlimited = criteria();
        unlimited.per_page = None;
        assert_eq!(run(&items, &unlimited).unwrap().len(), 8);
    }

    #[test]
    fn equal_timestamps_order_by_id_descending() {
        let items = vec![
            item(4, "post", "publish", at(1, 12, 0)),
            item(9, "post", "publish", at(1, 12, 0)),
            item(6, "post", "publish", at(1, 12, 0)),
        ];
        assert_eq!(ids(&run(&items, &criteria()).unwrap()), vec![9, 6, 4]);
    }

    #[test]
    fn optional_filters_can_be_omitted() {
        let mut bare = item(1, "post", "publish", at(1, 2, 0));
        bare.tags.clear();
        bare.categories.clear();
        let c = QueryCriteria {
            item_types: vec!["post".into()],
            per_page: None,
            status: StatusFilter::Any,
            tag: None,
            category: None,
            exclude: vec![],
            date_query: DateQuery::default(),
        };
        assert_eq!(run(&[bare], &c).unwrap().len(), 1);
    }

    #[test]
    fn rejects_invalid_criteria() {
        let mut no_types = criteria();
        no_types.item_types.clear();
        assert!(matches!(
            run(&[], &no_types),
            Err(ProviderError::InvalidCriteria(_))
        ));

        let mut zero = criteria();
        zero.per_page = Some(0);
        assert!(run(&[], &zero).is_err());

        let mut bad_hour = criteria();
        bad_hour.date_query.clauses = vec![DateClause::hour(Compare::Gte, 24)];
        assert!(run(&[], &bad_hour).is_err());
    }
}

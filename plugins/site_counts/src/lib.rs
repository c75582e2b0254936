//! Site Counts block.
//!
//! A dynamic block that reports how many published items exist for each
//! public content type, the ID of the item it is rendered in, and up to
//! five other posts or pages tagged `foo` and filed under `baz`.
//!
//! Sections with nothing to show are left out entirely: no heading, no
//! empty list.

pub mod criteria;

use site_counts_sdk::prelude::*;
use tracing::debug;

pub use criteria::{ListingConfig, RECENT_POSTS};

/// Registry name of the block.
pub const BLOCK_NAME: &str = "xwp/site-counts";

/// Translation domain for the block's copy.
pub const TEXT_DOMAIN: &str = "site-counts";

/// Message context of the per-type count sentence.
pub const COUNT_CONTEXT: &str = "Post Count List Item";

/// The Site Counts dynamic block.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteCountsBlock;

impl BlockRender for SiteCountsBlock {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            name: BLOCK_NAME.into(),
            title: "Site Counts".into(),
            category: "widgets".into(),
            text_domain: TEXT_DOMAIN.into(),
        }
    }

    fn render(
        &self,
        attributes: &RenderAttributes,
        _content: &str,
        ctx: &BlockContext<'_>,
    ) -> ProviderResult<String> {
        render_site_counts(
            attributes,
            ctx.current_item,
            ctx.types,
            ctx.query,
            ctx.translator,
        )
    }
}

/// Render the block markup.
///
/// Provider errors are returned unchanged; nothing else can fail.
pub fn render_site_counts(
    attributes: &RenderAttributes,
    current_item: ItemId,
    types: &dyn ContentTypeProvider,
    query: &dyn QueryProvider,
    t: &dyn Translator,
) -> ProviderResult<String> {
    let mut html = match attributes.css_class() {
        Some(class) => format!("<div class=\"{}\">", escape_attr(class)),
        None => "<div>".to_string(),
    };

    let slugs = types.list_public_types()?;
    if !slugs.is_empty() {
        html.push_str(&heading(&t.translate("Post Counts", "", TEXT_DOMAIN)));
        html.push_str("<ul>");
        for slug in &slugs {
            let summary = types.summary(slug)?;
            html.push_str(&format!("<li>{}</li>", count_sentence(&summary, t)));
        }
        html.push_str("</ul>");
    }

    let id = current_item.to_string();
    let sentence = sprintf(
        &t.translate("The current post ID is %s.", "", TEXT_DOMAIN),
        &[id.as_str()],
    );
    html.push_str(&format!("<p>{}</p>", html_escape(&sentence)));

    let items = query.query(&RECENT_POSTS.criteria(current_item))?;
    if !items.is_empty() {
        html.push_str(&heading(&t.translate(
            "Any 5 posts with the tag of foo and the category of baz",
            "",
            TEXT_DOMAIN,
        )));
        html.push_str("<ul>");
        for item in &items {
            html.push_str(&format!("<li>{}</li>", html_escape(&item.title)));
        }
        html.push_str("</ul>");
    }

    html.push_str("</div>");

    debug!(
        block = BLOCK_NAME,
        current_item = %current_item,
        types = slugs.len(),
        listed = items.len(),
        "rendered block"
    );

    Ok(html)
}

/// "There is 1 Post." / "There are 3 Posts.", escaped for element content.
fn count_sentence(summary: &ContentTypeSummary, t: &dyn Translator) -> String {
    let template = t.translate_plural(
        "There is %1$s %2$s.",
        "There are %1$s %3$s.",
        summary.published_count,
        COUNT_CONTEXT,
        TEXT_DOMAIN,
    );
    let count = t.format_number(summary.published_count);
    let sentence = sprintf(
        &template,
        &[
            count.as_str(),
            summary.singular_label.as_str(),
            summary.plural_label.as_str(),
        ],
    );
    html_escape(&sentence)
}

fn heading(text: &str) -> String {
    format!("<h2>{}</h2>", html_escape(text))
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use site_counts_test_utils::{LocaleStub, MockQuery, MockTypes, count_occurrences, titles};

    fn render(
        attributes: &RenderAttributes,
        current: u64,
        types: &MockTypes,
        query: &MockQuery,
    ) -> String {
        render_site_counts(attributes, ItemId(current), types, query, &PassThrough).unwrap()
    }

    #[test]
    fn renders_documented_example() {
        let types = MockTypes::new().published("post", "Post", "Posts", 3);
        let query = MockQuery::returning(titles(&["Hello"]));

        let html = render(&RenderAttributes::with_class("foo"), 42, &types, &query);

        assert!(html.starts_with("<div class=\"foo\">"));
        assert!(html.contains("<h2>Post Counts</h2>"));
        assert!(html.contains("<li>There are 3 Posts.</li>"));
        assert!(html.contains("<p>The current post ID is 42.</p>"));
        assert!(html.contains("<h2>Any 5 posts with the tag of foo and the category of baz</h2>"));
        assert!(html.contains("<li>Hello</li>"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn exact_markup() {
        let types = MockTypes::new().published("post", "Post", "Posts", 1);
        let query = MockQuery::returning(titles(&["A", "B"]));

        let html = render(&RenderAttributes::default(), 7, &types, &query);

        assert_eq!(
            html,
            "<div><h2>Post Counts</h2><ul><li>There is 1 Post.</li></ul>\
             <p>The current post ID is 7.</p>\
             <h2>Any 5 posts with the tag of foo and the category of baz</h2>\
             <ul><li>A</li><li>B</li></ul></div>"
        );
    }

    #[test]
    fn no_class_attribute_without_class_name() {
        let types = MockTypes::new();
        let query = MockQuery::empty();

        for attrs in [
            RenderAttributes::default(),
            RenderAttributes::with_class(""),
        ] {
            let html = render(&attrs, 1, &types, &query);
            assert!(html.starts_with("<div>"), "got: {html}");
            assert!(!html.contains("class="), "got: {html}");
        }
    }

    #[test]
    fn class_attribute_escaped_once() {
        let html = render(
            &RenderAttributes::with_class("a\"b <c>"),
            1,
            &MockTypes::new(),
            &MockQuery::empty(),
        );
        assert!(html.starts_with("<div class=\"a&quot;b &lt;c&gt;\">"));
        assert_eq!(count_occurrences(&html, "class="), 1);
    }

    #[test]
    fn one_item_per_type_in_provider_order() {
        let types = MockTypes::new()
            .published("post", "Post", "Posts", 5)
            .published("page", "Page", "Pages", 1)
            .with_counts(
                "attachment",
                "Media",
                "Media",
                StatusCounts::new().with("inherit", 12).with("publish", 99),
            );

        let html = render(&RenderAttributes::default(), 1, &types, &MockQuery::empty());

        assert_eq!(count_occurrences(&html, "<li>"), 3);
        let posts = html.find("There are 5 Posts.").unwrap();
        let pages = html.find("There is 1 Page.").unwrap();
        let media = html.find("There are 12 Media.").unwrap();
        assert!(posts < pages && pages < media);
        assert!(!html.contains("99"));
    }

    #[test]
    fn zero_count_uses_plural_form() {
        let types = MockTypes::new().published("page", "Page", "Pages", 0);
        let html = render(&RenderAttributes::default(), 1, &types, &MockQuery::empty());
        assert!(html.contains("<li>There are 0 Pages.</li>"));
    }

    #[test]
    fn counts_use_thousands_separator() {
        let types = MockTypes::new().published("post", "Post", "Posts", 1_234_567);
        let html = render(&RenderAttributes::default(), 1, &types, &MockQuery::empty());
        assert!(html.contains("There are 1,234,567 Posts."));
    }

    #[test]
    fn plural_choice_follows_locale_rule() {
        // A rule where 21 takes the singular form (as in Slavic languages).
        let locale = LocaleStub::new("\u{a0}", |n| n % 10 == 1 && n % 100 != 11);
        let types = MockTypes::new()
            .published("post", "Post", "Posts", 21)
            .published("page", "Page", "Pages", 1_000);

        let html = render_site_counts(
            &RenderAttributes::default(),
            ItemId(1),
            &types,
            &MockQuery::empty(),
            &locale,
        )
        .unwrap();

        assert!(html.contains("There is 21 Post."), "got: {html}");
        assert!(html.contains("There are 1\u{a0}000 Pages."), "got: {html}");
    }

    #[test]
    fn no_types_omits_count_section() {
        let html = render(
            &RenderAttributes::default(),
            3,
            &MockTypes::new(),
            &MockQuery::returning(titles(&["Only"])),
        );
        assert!(!html.contains("Post Counts"));
        assert_eq!(count_occurrences(&html, "<ul>"), 1);
        assert!(html.contains("<li>Only</li>"));
    }

    #[test]
    fn empty_query_omits_listing() {
        let types = MockTypes::new().published("post", "Post", "Posts", 2);
        let html = render(&RenderAttributes::default(), 3, &types, &MockQuery::empty());
        assert!(!html.contains("Any 5 posts"));
        assert_eq!(count_occurrences(&html, "<ul>"), 1);
    }

    #[test]
    fn empty_everything_leaves_id_sentence() {
        let html = render(&RenderAttributes::default(), 9, &MockTypes::new(), &MockQuery::empty());
        assert_eq!(html, "<div><p>The current post ID is 9.</p></div>");
    }

    #[test]
    fn listing_preserves_provider_order() {
        let query = MockQuery::returning(titles(&["Zeta", "Alpha", "Mu"]));
        let html = render(&RenderAttributes::default(), 1, &MockTypes::new(), &query);

        let z = html.find("<li>Zeta</li>").unwrap();
        let a = html.find("<li>Alpha</li>").unwrap();
        let m = html.find("<li>Mu</li>").unwrap();
        assert!(z < a && a < m);
        assert_eq!(count_occurrences(&html, "<li>"), 3);
    }

    #[test]
    fn titles_and_labels_are_escaped() {
        let types = MockTypes::new().published("post", "<b>Post</b>", "<b>Posts</b>", 2);
        let query = MockQuery::returning(titles(&["1 < 2 & <script>x</script>"]));

        let html = render(&RenderAttributes::default(), 1, &types, &query);

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("<li>1 &lt; 2 &amp; &lt;script&gt;x&lt;/script&gt;</li>"));
        assert!(html.contains("There are 2 &lt;b&gt;Posts&lt;/b&gt;."));
    }

    #[test]
    fn query_excludes_current_item() {
        let query = MockQuery::empty();
        render(&RenderAttributes::default(), 42, &MockTypes::new(), &query);

        let calls = query.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], RECENT_POSTS.criteria(ItemId(42)));
        assert_eq!(calls[0].exclude, vec![ItemId(42)]);
    }

    #[test]
    fn type_provider_errors_propagate() {
        let types = MockTypes::failing(ProviderError::Unavailable("registry down".into()));
        let err = render_site_counts(
            &RenderAttributes::default(),
            ItemId(1),
            &types,
            &MockQuery::empty(),
            &PassThrough,
        )
        .unwrap_err();
        assert_eq!(err, ProviderError::Unavailable("registry down".into()));
    }

    #[test]
    fn query_provider_errors_propagate() {
        let query = MockQuery::failing(ProviderError::InvalidCriteria("bad".into()));
        let err = render_site_counts(
            &RenderAttributes::default(),
            ItemId(1),
            &MockTypes::new(),
            &query,
            &PassThrough,
        )
        .unwrap_err();
        assert_eq!(err, ProviderError::InvalidCriteria("bad".into()));
    }

    #[test]
    fn block_trait_ignores_saved_content() {
        let types = MockTypes::new().published("post", "Post", "Posts", 3);
        let query = MockQuery::returning(titles(&["Hello"]));
        let ctx = BlockContext {
            current_item: ItemId(42),
            types: &types,
            query: &query,
            translator: &PassThrough,
        };
        let attrs = RenderAttributes::from_value(&serde_json::json!({ "className": "foo" }));

        let via_block = SiteCountsBlock.render(&attrs, "<p>saved</p>", &ctx).unwrap();
        let direct = render(&attrs, 42, &types, &MockQuery::returning(titles(&["Hello"])));

        assert_eq!(via_block, direct);
        assert!(!via_block.contains("saved"));
    }

    #[test]
    fn metadata_names_block() {
        let meta = SiteCountsBlock.metadata();
        assert_eq!(meta.name, "xwp/site-counts");
        assert_eq!(meta.text_domain, "site-counts");
    }
}

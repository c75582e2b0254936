#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Translated rendering: catalogs, plural rules and number separators.

mod common;

use serde_json::json;
use site_counts_block::{BLOCK_NAME, TEXT_DOMAIN};
use site_counts_kernel::locale::DEFAULT_DOMAIN;
use site_counts_kernel::{ContentStore, LocaleService};
use site_counts_sdk::block::BlockContext;
use site_counts_sdk::i18n::Translator;
use site_counts_sdk::types::ItemId;
use site_counts_test_utils::assert;

use common::{demo_path, demo_store, published_posts, registry};

const RUSSIAN: &str = r#"
msgid ""
msgstr ""
"Language: ru_RU\n"
"Plural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n"

msgctxt "Post Count List Item"
msgid "There is %1$s %2$s."
msgid_plural "There are %1$s %3$s."
msgstr[0] "Есть %1$s запись."
msgstr[1] "Есть %1$s записи."
msgstr[2] "Есть %1$s записей."
"#;

const GERMAN_CORE: &str = r#"
msgid ""
msgstr ""
"Language: de_DE\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgctxt "thousands separator"
msgid ","
msgstr "."

msgctxt "decimal point"
msgid "."
msgstr ","
"#;

fn render(store: &ContentStore, locale: &LocaleService, current: u64) -> String {
    let ctx = BlockContext {
        current_item: ItemId(current),
        types: store,
        query: store,
        translator: locale,
    };
    registry().render(BLOCK_NAME, &json!({}), "", &ctx).unwrap()
}

fn french() -> LocaleService {
    let locale = LocaleService::new("fr_FR");
    let loaded = locale
        .load_po_file(TEXT_DOMAIN, &demo_path("fr_FR.po"))
        .unwrap();
    assert_eq!(loaded, 4);
    locale
}

#[test]
fn test_french_render() {
    let html = render(&demo_store(), &french(), 1);

    assert::contains(&html, "<h2>Nombre de publications</h2>");
    assert::in_order(
        &html,
        &["<li>Il y a 3 Posts.</li>", "<li>Il y a 1 Page.</li>"],
    );
    assert::contains(
        &html,
        "<p>L&#x27;identifiant de la publication actuelle est 1.</p>",
    );
    assert::contains(
        &html,
        "<h2>5 publications avec l&#x27;étiquette foo et la catégorie baz</h2>",
    );
}

#[test]
fn test_french_zero_is_singular() {
    let html = render(&ContentStore::with_builtin_types(), &french(), 0);

    assert::contains(&html, "<li>Il y a 0 Post.</li>");
    assert::contains(&html, "<li>Il y a 0 Media.</li>");
}

#[test]
fn test_russian_three_forms() {
    let locale = LocaleService::new("ru_RU");
    locale.load_po(TEXT_DOMAIN, RUSSIAN);

    for (count, expected) in [
        (1, "<li>Есть 1 запись.</li>"),
        (3, "<li>Есть 3 записи.</li>"),
        (5, "<li>Есть 5 записей.</li>"),
        (11, "<li>Есть 11 записей.</li>"),
        (21, "<li>Есть 21 запись.</li>"),
    ] {
        let html = render(&published_posts(count), &locale, 0);
        assert::contains(&html, expected);
    }
}

#[test]
fn test_number_separators_from_core_catalog() {
    let locale = LocaleService::new("de_DE");
    locale.load_po(DEFAULT_DOMAIN, GERMAN_CORE);

    assert_eq!(locale.format_number(1_234), "1.234");

    let html = render(&published_posts(1_200), &locale, 0);
    assert::contains(&html, "<li>There are 1.200 Posts.</li>");
}

#[test]
fn test_untranslated_locale_falls_back_to_source() {
    let locale = LocaleService::new("pt_BR");
    let html = render(&demo_store(), &locale, 2);

    assert::contains(&html, "<h2>Post Counts</h2>");
    assert::contains(&html, "<li>There is 1 Product.</li>");
    assert::contains(&html, "<p>The current post ID is 2.</p>");
}

#[test]
fn test_catalog_for_other_domain_is_ignored() {
    let locale = LocaleService::new("fr_FR");
    locale
        .load_po_file("another-plugin", &demo_path("fr_FR.po"))
        .unwrap();

    let html = render(&demo_store(), &locale, 1);
    assert::contains(&html, "<h2>Post Counts</h2>");
    assert::not_contains(&html, "Nombre de publications");
}

#[test]
fn test_missing_catalog_file() {
    let locale = LocaleService::new("fr_FR");
    let err = locale
        .load_po_file(TEXT_DOMAIN, &demo_path("xx_XX.po"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("xx_XX.po"));
    assert!(locale.is_empty());
}

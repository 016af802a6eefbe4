//! Tests for whitespace normalization, measurement, wrapping and the text cache.

use plainview_core::dom::{parse_html, ParseMode};
use plainview_core::text::{clean_text, extract_text, wrap_text, GlyphMetrics, TextCache, TextMeasure};
use pretty_assertions::assert_eq;
use std::borrow::Cow;

/// Line height 10, every glyph 6 units wide.
fn narrow_metrics() -> GlyphMetrics {
    GlyphMetrics::monospace(10.0).with_fallback_advance(6.0)
}

#[test]
fn test_clean_text_collapses_whitespace() {
    assert_eq!(clean_text("  hello   world \n"), "hello world");
    assert_eq!(clean_text("a\t\tb\r\nc"), "a b c");
    assert_eq!(clean_text("a\u{00A0}\u{2003}b"), "a b");
    assert_eq!(clean_text(" \n\t "), "");
    assert_eq!(clean_text(""), "");
}

#[test]
fn test_clean_text_fast_path_borrows() {
    assert!(matches!(clean_text("unchanged"), Cow::Borrowed("unchanged")));
    assert!(matches!(clean_text("ünïcödé"), Cow::Borrowed(_)));
}

#[test]
fn test_clean_text_is_idempotent() {
    let samples = [
        "",
        "   ",
        "word",
        "  leading",
        "trailing  ",
        "many     inner \n\n spaces",
        "\u{3000}ideographic\u{3000}space\u{3000}",
    ];
    for s in samples {
        let once = clean_text(s).into_owned();
        assert_eq!(clean_text(&once), once.as_str(), "not idempotent for {:?}", s);
    }
}

#[test]
fn test_glyph_metrics_measure() {
    let metrics = narrow_metrics();
    assert_eq!(metrics.measure("ab", 1.0), (12.0, 10.0));
    assert_eq!(metrics.measure("ab", 2.0), (24.0, 20.0));
    assert_eq!(metrics.line_height(1.5), 15.0);

    let exact = GlyphMetrics::monospace(10.0)
        .with_fallback_advance(1.0)
        .with_advance('W', 8.0);
    assert_eq!(exact.measure("Wii", 1.0).0, 10.0);
}

#[test]
fn test_wrap_text_degenerate_inputs() {
    let metrics = GlyphMetrics::default();
    assert!(wrap_text("", 100.0, 1.0, &metrics).is_empty());
    assert!(wrap_text("   ", 100.0, 1.0, &metrics).is_empty());
    assert!(wrap_text("", 0.0, 1.0, &metrics).is_empty());

    let text = "a fairly long sentence that would otherwise wrap";
    assert_eq!(wrap_text(text, 0.0, 1.0, &metrics), vec![text.to_string()]);
    assert_eq!(wrap_text(text, -5.0, 1.0, &metrics), vec![text.to_string()]);
}

#[test]
fn test_wrap_text_greedy_packing() {
    let metrics = narrow_metrics();

    let lines = wrap_text("aaa bbb ccc", 50.0, 1.0, &metrics);
    assert_eq!(lines, vec!["aaa bbb".to_string(), "ccc".to_string()]);

    // Scale shrinks the room for words.
    let lines = wrap_text("aaa bbb ccc", 50.0, 2.0, &metrics);
    assert_eq!(lines, vec!["aaa", "bbb", "ccc"]);
}

#[test]
fn test_wrap_text_never_splits_words() {
    let metrics = narrow_metrics();
    let lines = wrap_text("supercalifragilistic a b", 30.0, 1.0, &metrics);
    assert_eq!(lines, vec!["supercalifragilistic", "a b"]);
}

#[test]
fn test_wrap_text_is_lossless() {
    let metrics = GlyphMetrics::default();
    let text = "The quick brown fox jumps over the lazy dog while the \
                 cat watches from a sunny windowsill nearby";
    let lines = wrap_text(text, 120.0, 1.0, &metrics);

    assert!(lines.len() > 1);
    for line in &lines {
        assert!(!line.contains('\n'));
        assert!(!line.starts_with(' ') && !line.ends_with(' '));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(lines.join(" "), words.join(" "));
}

#[test]
fn test_extract_text_flattens_subtree() {
    let doc = parse_html(
        "<body><div>Hello <b>big</b>   world<script>var x = 1;</script></div><p>solo</p></body>",
        ParseMode::Lenient,
    )
    .unwrap();

    let div = doc.find_first("div").unwrap();
    assert_eq!(extract_text(&doc, div), "Hello big world");

    let p = doc.find_first("p").unwrap();
    assert_eq!(extract_text(&doc, p), "solo");

    let script = doc.find_first("script").unwrap();
    assert_eq!(extract_text(&doc, script), "var x = 1;");
}

#[test]
fn test_extract_text_empty_subtree() {
    let doc = parse_html("<body><div><br><hr></div></body>", ParseMode::Lenient).unwrap();
    let div = doc.find_first("div").unwrap();
    assert_eq!(extract_text(&doc, div), "");
}

#[test]
fn test_text_cache_returns_same_text() {
    let doc = parse_html("<body><p>Cached <em>text</em></p></body>", ParseMode::Lenient).unwrap();
    let p = doc.find_first("p").unwrap();

    let mut cache = TextCache::new();
    let first = cache.get_or_extract(&doc, p);
    let second = cache.get_or_extract(&doc, p);

    assert_eq!(&*first, "Cached text");
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_text_cache_stays_bounded() {
    let mut html = String::from("<body>");
    for i in 0..20 {
        html.push_str(&format!("<p>item {}</p>", i));
    }
    html.push_str("</body>");
    let doc = parse_html(&html, ParseMode::Lenient).unwrap();

    let mut cache = TextCache::with_capacity(3);
    for node in doc.iter() {
        let text = cache.get_or_extract(&doc, node.id);
        assert_eq!(&*text, extract_text(&doc, node.id));
        assert!(cache.len() <= cache.capacity());
    }
    assert!(!cache.is_empty());

    cache.clear();
    assert!(cache.is_empty());
}

// src/checker/html.rs
// =============================================================================
// This module extracts candidate addresses from a fetched page.
//
// Two strategies are available:
// - Pattern (default): a regular expression over the raw text. This is the
//   compatibility mode: its output is frozen, quirks included, so results
//   stay comparable between versions.
// - Dom: the `scraper` crate parses the page into a tree and we read every
//   <a href> from it. Better on messy or multi-line markup.
//
// Both strategies share the same filters:
// - mailto: and tel: targets are dropped (case-insensitive)
// - a target identical to the page's own address is dropped
//
// Nothing else is done to the targets. Relative paths, fragments and odd
// strings pass through untouched and in document order, duplicates kept.
// Extraction never fails: a page that was fetched with 200 is valid no
// matter what its markup looks like.
//
// Rust concepts:
// - LazyLock: compile a pattern once, share it across threads
// - partition_point: binary search over a sorted Vec
// =============================================================================

use std::sync::LazyLock;

use clap::ValueEnum;
use fancy_regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};

/// The opening tag `<a ...href="TARGET"...>`, quote style and case ignored.
///
/// The `...</a>` part of an anchor is looked up separately, see
/// `LineIndex`.
static ANCHOR_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"(?i)<a\s+(?:[^>]*?\s+)?href=["']((?!(?:mailto|tel):)[^"']*)["'][^>]*>"#)
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
        .expect("anchor pattern is a valid constant")
});

static ANCHOR_CLOSE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("(?i)</a>").expect("closing tag pattern is a valid constant"));

// Line terminators: `.` in the compatible pattern never crosses these
static LINE_BREAK: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new("[\n\r\u{2028}\u{2029}]").expect("line break pattern is a valid constant")
});

// Per-search budget for the backtracking engine. One search only walks a
// single opening tag, so real pages stay far below this.
const BACKTRACK_LIMIT: usize = 100_000_000;

/// Schemes that never lead to a fetchable page
const NON_NAVIGABLE_SCHEMES: [&str; 2] = ["mailto:", "tel:"];

/// Which link extraction strategy to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LinkExtractor {
    /// Regex over raw markup (stable, compatible output)
    #[default]
    Pattern,
    /// Structural HTML parse via scraper
    Dom,
}

impl LinkExtractor {
    /// Returns the candidate addresses found in `body`, in document order.
    ///
    /// `fetched_from` is the address the body was fetched from; anchors
    /// pointing at exactly that string are left out.
    pub fn extract(self, body: &str, fetched_from: &str) -> Vec<String> {
        match self {
            LinkExtractor::Pattern => extract_pattern_links(body, fetched_from),
            LinkExtractor::Dom => extract_dom_links(body, fetched_from),
        }
    }
}

// Where every `</a>` and every line break sits in one body
struct LineIndex {
    closes: Vec<usize>,
    breaks: Vec<usize>,
}

impl LineIndex {
    fn new(body: &str) -> Self {
        Self {
            closes: ANCHOR_CLOSE.find_iter(body).map(|m| m.start()).collect(),
            breaks: LINE_BREAK.find_iter(body).map(|m| m.start()).collect(),
        }
    }

    // End of the first `</a>` at or after `from`, as long as no line break
    // comes before it. This is what `.*?</a>` would find.
    fn close_after(&self, from: usize) -> Option<usize> {
        let close = *self.closes.get(self.closes.partition_point(|&c| c < from))?;
        match self.breaks.get(self.breaks.partition_point(|&b| b < from)) {
            Some(&line_break) if line_break < close => None,
            _ => Some(close + "</a>".len()),
        }
    }
}

fn extract_pattern_links(body: &str, fetched_from: &str) -> Vec<String> {
    let index = LineIndex::new(body);
    let mut links = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let captures = match ANCHOR_OPEN.captures_from_pos(body, pos) {
            Ok(Some(captures)) => captures,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(
                    url = fetched_from,
                    error = %e,
                    found = links.len(),
                    "anchor scan stopped early"
                );
                break;
            }
        };
        let (Some(tag), Some(target)) = (captures.get(0), captures.get(1)) else {
            break;
        };

        match index.close_after(tag.end()) {
            Some(anchor_end) => {
                if target.as_str() != fetched_from {
                    links.push(target.as_str().to_string());
                }
                pos = anchor_end;
            }
            // Unclosed on its line: this `<a` is not an anchor, resume right after it
            None => pos = tag.start() + 1,
        }
    }

    links
}

fn extract_dom_links(body: &str, fetched_from: &str) -> Vec<String> {
    let document = Html::parse_document(body);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| is_navigable(href))
        .filter(|href| *href != fetched_from)
        .map(str::to_string)
        .collect()
}

// False for mail-composition and telephone targets
fn is_navigable(href: &str) -> bool {
    !NON_NAVIGABLE_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why fancy_regex and not regex?
//    - The scheme filter is a negative lookahead: (?!(?:mailto|tel):)
//    - The regex crate guarantees linear time and so has no lookaround
//    - fancy_regex adds lookaround on top, at the price of backtracking
//    - The plain regex crate still handles the simple lookups (</a>, line
//      breaks) where no lookaround is needed
//
// 2. Why is the anchor matched in two steps?
//    - The full `<a ...>.*?</a>` form re-scans the rest of the line from
//      every `<a`. A long line full of unclosed anchors turns that into
//      quadratic work and trips the engine's backtrack limit.
//    - The opening tag is matched by the regex, then the closing `</a>` is
//      found with two binary searches in LineIndex. Same result, each byte
//      of the line is scanned once.
//    - A line ends at \n, \r, U+2028 or U+2029, so a carriage return on
//      its own also ends the line.
//
// 3. Do both strategies always agree?
//    - No. scraper decodes entities (&amp; becomes &), sees anchors that
//      span lines, and ignores a missing </a>. The pattern does none of
//      that. Pick Dom when correctness on real-world markup matters more
//      than matching the old output.
// -----------------------------------------------------------------------------

//! Field normalization for artwork detail pages
//!
//! Pure functions turning the raw text pulled out of an item page into typed
//! fields. Nothing here touches HTML; see [`crate::parser::item`] for the
//! extraction side.

use crate::types::Dimensions;

/// Leading heading token marking a work without a real title
const UNTITLED: &str = "untitled";

/// Credit prefix for attributions to a style or school rather than an artist
const AFTER_PREFIX: &str = "after";

/// Placeholder the catalog uses for an unknown credit
const NOT_ESTABLISHED: &str = "n/e";

/// Title and heading-derived description of one artwork
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleParts {
    pub title: Option<String>,
    /// Text that was fully wrapped in brackets in the heading
    pub description: Option<String>,
}

/// Split a raw item heading into a title and a description candidate.
///
/// A leading "untitled" word (any case, optionally followed by a comma) is
/// dropped. If what remains is wrapped in a single `(...)` or `[...]` pair it
/// is a description, not a title.
///
/// # Examples
/// ```
/// use artworks_core::normalize::split_title;
///
/// let parts = split_title("Untitled, (study of a woman)");
/// assert_eq!(parts.title, None);
/// assert_eq!(parts.description.as_deref(), Some("study of a woman"));
///
/// let parts = split_title("Sunset Over the Bay");
/// assert_eq!(parts.title.as_deref(), Some("Sunset Over the Bay"));
/// assert_eq!(parts.description, None);
/// ```
pub fn split_title(raw: &str) -> TitleParts {
    let cleaned = strip_untitled(raw.trim());

    if let Some(inner) = unwrap_brackets(cleaned) {
        return TitleParts {
            title: None,
            description: non_empty(inner),
        };
    }

    TitleParts {
        title: non_empty(cleaned),
        description: None,
    }
}

/// Drop every leading "untitled" word and its trailing comma.
fn strip_untitled(text: &str) -> &str {
    let mut rest = text;
    loop {
        let Some(head) = rest.get(..UNTITLED.len()) else {
            return rest;
        };
        if !head.eq_ignore_ascii_case(UNTITLED) {
            return rest;
        }

        let tail = &rest[UNTITLED.len()..];
        // "Untitledness" is a title, not a marker
        if tail.chars().next().is_some_and(char::is_alphanumeric) {
            return rest;
        }

        let tail = tail.trim_start();
        rest = tail.strip_prefix(',').unwrap_or(tail).trim_start();
    }
}

/// Inner text if `text` is exactly one bracket pair from first to last char.
fn unwrap_brackets(text: &str) -> Option<&str> {
    let (open, close) = match text.chars().next()? {
        '(' => ('(', ')'),
        '[' => ('[', ']'),
        _ => return None,
    };

    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                // "(a) and (b)" closes early and is a title
                return (idx + ch.len_utf8() == text.len()).then(|| &text[1..idx]);
            }
        }
    }

    None
}

/// Combine the body paragraph with a bracketed heading description.
///
/// Both present are joined with `", "`; blank inputs count as absent.
///
/// # Examples
/// ```
/// use artworks_core::normalize::merge_description;
///
/// assert_eq!(
///     merge_description(Some("Charcoal sketch"), Some("study of a woman")).as_deref(),
///     Some("Charcoal sketch, study of a woman")
/// );
/// assert_eq!(merge_description(None, Some("study")).as_deref(), Some("study"));
/// assert_eq!(merge_description(Some("  "), None), None);
/// ```
pub fn merge_description(paragraph: Option<&str>, heading: Option<&str>) -> Option<String> {
    match (paragraph.and_then(non_empty), heading.and_then(non_empty)) {
        (Some(paragraph), Some(heading)) => Some(format!("{}, {}", paragraph, heading)),
        (Some(paragraph), None) => Some(paragraph),
        (None, heading) => heading,
    }
}

/// Parse an artist credit line such as `"Artist: John Smith; Engraver: Jane Doe"`.
///
/// Segments are `;`-separated `role: name` pairs. Segments without a colon,
/// empty names, `N/E` placeholders and "After ..." attributions are dropped.
/// Order is preserved.
///
/// # Examples
/// ```
/// use artworks_core::normalize::parse_artists;
///
/// assert_eq!(parse_artists("Artist: John Smith; After: Rembrandt"), vec!["John Smith"]);
/// assert!(parse_artists("no colon here").is_empty());
/// ```
pub fn parse_artists(raw: &str) -> Vec<String> {
    raw.split(';')
        .filter_map(|segment| segment.trim().split_once(':'))
        .map(|(role, name)| (role.trim(), name.trim()))
        .filter(|(role, name)| !starts_with_after(role) && is_credited(name))
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Apply the name filtering of [`parse_artists`] to an already split list.
///
/// Idempotent: normalizing the output again changes nothing.
pub fn normalize_artists<S: AsRef<str>>(artists: &[S]) -> Vec<String> {
    artists
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| is_credited(name))
        .map(str::to_string)
        .collect()
}

fn is_credited(name: &str) -> bool {
    if name.is_empty() || name.eq_ignore_ascii_case(NOT_ESTABLISHED) {
        return false;
    }
    !starts_with_after(name)
}

fn starts_with_after(text: &str) -> bool {
    text.get(..AFTER_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(AFTER_PREFIX))
}

/// Parse height and width from a "Dimensions" cell.
///
/// Looks at the first parenthesized group containing a digit, drops the
/// `cm` unit and reads tokens 0 and 2 (token 1 is the `x` separator) as
/// height and width. Anything less yields `None`; a lone value never
/// produces half a pair.
///
/// # Examples
/// ```
/// use artworks_core::normalize::parse_dimensions;
///
/// let dims = parse_dimensions("Oil on canvas (30 x 40 cm)").unwrap();
/// assert_eq!((dims.height, dims.width), (30.0, 40.0));
/// assert_eq!(parse_dimensions("(30 cm)"), None);
/// assert_eq!(parse_dimensions(""), None);
/// ```
pub fn parse_dimensions(raw: &str) -> Option<Dimensions> {
    let re = regex_lite::Regex::new(r"\(([^()]*\d[^()]*)\)").ok()?;
    let group = re.captures(raw)?.get(1)?.as_str();

    let cleaned = group.replace("cm", "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let height = parse_measure(tokens.first()?)?;
    let width = parse_measure(tokens.get(2)?)?;

    Some(Dimensions { height, width })
}

fn parse_measure(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_title_plain() {
        let parts = split_title("Sunset Over the Bay");
        assert_eq!(parts.title.as_deref(), Some("Sunset Over the Bay"));
        assert_eq!(parts.description, None);
    }

    #[test]
    fn test_split_title_untitled_with_parenthetical() {
        let parts = split_title("Untitled, (study of a woman)");
        assert_eq!(parts.title, None);
        assert_eq!(parts.description.as_deref(), Some("study of a woman"));
    }

    #[test]
    fn test_split_title_square_brackets() {
        let parts = split_title("[Portrait of a man]");
        assert_eq!(parts.title, None);
        assert_eq!(parts.description.as_deref(), Some("Portrait of a man"));
    }

    #[test]
    fn test_split_title_untitled_case_insensitive() {
        assert_eq!(split_title("UNTITLED").title, None);
        assert_eq!(split_title("untitled,").title, None);
        assert_eq!(
            split_title("Untitled, Harbour at Dusk").title.as_deref(),
            Some("Harbour at Dusk")
        );
        assert_eq!(
            split_title("untitled No. 4").title.as_deref(),
            Some("No. 4")
        );
    }

    #[test]
    fn test_split_title_untitled_must_be_whole_word() {
        assert_eq!(
            split_title("Untitledness").title.as_deref(),
            Some("Untitledness")
        );
    }

    #[test]
    fn test_split_title_partial_brackets_stay_title() {
        let parts = split_title("(Study) for a Portrait");
        assert_eq!(parts.title.as_deref(), Some("(Study) for a Portrait"));
        assert_eq!(parts.description, None);

        let parts = split_title("(Left) and (Right)");
        assert_eq!(parts.title.as_deref(), Some("(Left) and (Right)"));
    }

    #[test]
    fn test_split_title_mismatched_brackets_stay_title() {
        let parts = split_title("(Study]");
        assert_eq!(parts.title.as_deref(), Some("(Study]"));
    }

    #[test]
    fn test_split_title_nested_brackets() {
        let parts = split_title("(Study (after nature))");
        assert_eq!(parts.title, None);
        assert_eq!(parts.description.as_deref(), Some("Study (after nature)"));
    }

    #[test]
    fn test_split_title_empty() {
        assert_eq!(split_title(""), TitleParts::default());
        assert_eq!(split_title("   "), TitleParts::default());
        assert_eq!(split_title("()"), TitleParts::default());
    }

    #[test]
    fn test_merge_description() {
        assert_eq!(
            merge_description(Some("Ink on paper"), Some("study of a woman")).as_deref(),
            Some("Ink on paper, study of a woman")
        );
        assert_eq!(
            merge_description(Some("Ink on paper"), None).as_deref(),
            Some("Ink on paper")
        );
        assert_eq!(
            merge_description(None, Some("study of a woman")).as_deref(),
            Some("study of a woman")
        );
        assert_eq!(merge_description(None, None), None);
        assert_eq!(merge_description(Some(""), Some(" ")), None);
    }

    #[test]
    fn test_parse_artists_basic() {
        assert_eq!(
            parse_artists("Artist: John Smith; After: Rembrandt"),
            vec!["John Smith"]
        );
        assert_eq!(
            parse_artists("Painter: Ann Lee; Engraver: Bo Ek"),
            vec!["Ann Lee", "Bo Ek"]
        );
    }

    #[test]
    fn test_parse_artists_drops_segments_without_colon() {
        assert!(parse_artists("no colon here").is_empty());
        assert_eq!(
            parse_artists("anonymous; Artist: Ann Lee"),
            vec!["Ann Lee"]
        );
    }

    #[test]
    fn test_parse_artists_after_is_case_insensitive() {
        assert!(parse_artists("Artist: after Titian").is_empty());
        assert!(parse_artists("Artist: AFTER Titian").is_empty());
        assert!(parse_artists("Artist: Afterglow Studio").is_empty());
    }

    #[test]
    fn test_parse_artists_drops_after_role() {
        assert!(parse_artists("After: Rembrandt").is_empty());
        assert!(parse_artists("after : Rembrandt").is_empty());
        assert_eq!(
            parse_artists("AFTER: Titian; Artist: Ann Lee; After Workshop: Bo Ek"),
            vec!["Ann Lee"]
        );
    }

    #[test]
    fn test_parse_artists_drops_placeholders_and_empty() {
        assert!(parse_artists("Artist: N/E").is_empty());
        assert!(parse_artists("Artist: n/e; Maker:   ").is_empty());
        assert!(parse_artists("").is_empty());
    }

    #[test]
    fn test_parse_artists_splits_on_first_colon_only() {
        assert_eq!(
            parse_artists("Artist: Studio: North Wing"),
            vec!["Studio: North Wing"]
        );
    }

    #[test]
    fn test_normalize_artists() {
        let raw = vec!["  Ann Lee ", "After Titian", "N/E", ""];
        assert_eq!(normalize_artists(&raw), vec!["Ann Lee"]);
    }

    #[test]
    fn test_parse_dimensions_basic() {
        let dims = parse_dimensions("Oil on canvas (30 x 40 cm)").unwrap();
        assert_eq!(dims.height, 30.0);
        assert_eq!(dims.width, 40.0);
    }

    #[test]
    fn test_parse_dimensions_decimal_and_unicode_separator() {
        let dims = parse_dimensions("12 x 16 in. (30.5 × 40.6 cm)").unwrap();
        assert_eq!(dims.height, 30.5);
        assert_eq!(dims.width, 40.6);
    }

    #[test]
    fn test_parse_dimensions_skips_groups_without_digits() {
        let dims = parse_dimensions("Print (framed) (20 x 25 cm)").unwrap();
        assert_eq!((dims.height, dims.width), (20.0, 25.0));
    }

    #[test]
    fn test_parse_dimensions_unit_attached() {
        let dims = parse_dimensions("(20 x 25cm)").unwrap();
        assert_eq!((dims.height, dims.width), (20.0, 25.0));
    }

    #[test]
    fn test_parse_dimensions_absent() {
        assert_eq!(parse_dimensions("(30 cm)"), None);
        assert_eq!(parse_dimensions(""), None);
        assert_eq!(parse_dimensions("30 x 40 cm"), None);
        assert_eq!(parse_dimensions("(30 x cm)"), None);
        assert_eq!(parse_dimensions("(30x40 cm)"), None);
        assert_eq!(parse_dimensions("(sheet 30 x 40)"), None);
    }

    proptest! {
        #[test]
        fn prop_dimensions_from_parenthesized_pair(
            h in 1u32..10_000,
            w in 1u32..10_000,
            prefix in "[A-Za-z ]{0,20}",
        ) {
            let raw = format!("{}({} x {} cm)", prefix, h, w);
            let dims = parse_dimensions(&raw).unwrap();
            prop_assert_eq!(dims.height, h as f64);
            prop_assert_eq!(dims.width, w as f64);
        }

        #[test]
        fn prop_single_value_never_yields_dimensions(v in 0u32..10_000) {
            prop_assert_eq!(parse_dimensions(&format!("({} cm)", v)), None);
        }

        #[test]
        fn prop_split_title_is_idempotent(raw in "[A-Za-z ,()\\[\\]]{0,40}") {
            let first = split_title(&raw);
            if let Some(title) = &first.title {
                let again = split_title(title);
                prop_assert_eq!(again.title.as_ref(), Some(title));
                prop_assert_eq!(again.description, None);
            }
        }

        #[test]
        fn prop_untitled_prefix_is_ignored(rest in "[A-Z][a-z]{1,10}( [a-z]{1,8}){0,3}") {
            let bare = split_title(&rest);
            let prefixed = split_title(&format!("Untitled, {}", rest));
            prop_assert_eq!(bare, prefixed);
        }

        #[test]
        fn prop_normalize_artists_is_idempotent(raw in "([A-Za-z/ ]{0,12}(: ?[A-Za-z/ ]{0,12})?; ?){0,5}") {
            let parsed = parse_artists(&raw);
            prop_assert_eq!(normalize_artists(&parsed), parsed.clone());

            let rebuilt = parsed
                .iter()
                .map(|name| format!("Artist: {}", name))
                .collect::<Vec<_>>()
                .join("; ");
            prop_assert_eq!(parse_artists(&rebuilt), parsed);
        }

        #[test]
        fn prop_artists_keep_order(names in proptest::collection::vec("[B-Z][a-z]{1,8}", 0..6)) {
            let raw = names
                .iter()
                .map(|name| format!("Artist: {}", name))
                .collect::<Vec<_>>()
                .join("; ");
            prop_assert_eq!(parse_artists(&raw), names);
        }
    }
}

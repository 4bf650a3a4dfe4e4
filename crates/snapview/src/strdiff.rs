//! Character-level diff of one property's before/after text.

use similar::{ChangeTag, TextDiff};

/// How a span of characters relates to the other side of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Present on both sides.
    Same,
    /// Present only on the left (removed going old → new).
    Removed,
    /// Present only on the right (inserted going old → new).
    Inserted,
}

/// A run of adjacent characters sharing one [`SpanKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSpan {
    pub kind: SpanKind,
    pub text: String,
}

/// Both strings of a before/after pair, annotated for highlighting.
///
/// `left` reproduces the old string with removed runs marked; `right`
/// reproduces the new string with inserted runs marked. Concatenating the
/// span texts of a side yields that side's original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDiff {
    pub left: Vec<DiffSpan>,
    pub right: Vec<DiffSpan>,
}

impl StringDiff {
    /// True when neither side carries any annotation.
    pub fn is_unchanged(&self) -> bool {
        self.left.iter().all(|s| s.kind == SpanKind::Same)
            && self.right.iter().all(|s| s.kind == SpanKind::Same)
    }
}

/// Compute the character-level alignment of two strings.
///
/// Runs a Myers/LCS diff over the character sequences and projects removals
/// onto the left copy and insertions onto the right copy. Pure and
/// deterministic; the result is meant to be displayed once and discarded.
///
/// # Example
///
/// ```
/// use snapview::{SpanKind, diff_strings};
///
/// let diff = diff_strings("abc", "abd");
/// assert_eq!(diff.left.len(), 2);
/// assert_eq!((diff.left[1].kind, diff.left[1].text.as_str()), (SpanKind::Removed, "c"));
/// assert_eq!((diff.right[1].kind, diff.right[1].text.as_str()), (SpanKind::Inserted, "d"));
/// ```
pub fn diff_strings(old: &str, new: &str) -> StringDiff {
    let diff = TextDiff::from_chars(old, new);
    let mut left = Vec::new();
    let mut right = Vec::new();

    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                push_span(&mut left, SpanKind::Same, text);
                push_span(&mut right, SpanKind::Same, text);
            }
            ChangeTag::Delete => push_span(&mut left, SpanKind::Removed, text),
            ChangeTag::Insert => push_span(&mut right, SpanKind::Inserted, text),
        }
    }

    StringDiff { left, right }
}

fn push_span(spans: &mut Vec<DiffSpan>, kind: SpanKind, text: &str) {
    match spans.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => spans.push(DiffSpan {
            kind,
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side_text(spans: &[DiffSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn marked(spans: &[DiffSpan], kind: SpanKind) -> String {
        spans
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_equal_strings_have_no_annotations() {
        let diff = diff_strings("hello", "hello");
        assert!(diff.is_unchanged());
        assert_eq!(side_text(&diff.left), "hello");
        assert_eq!(side_text(&diff.right), "hello");
    }

    #[test]
    fn test_single_char_replacement() {
        let diff = diff_strings("abc", "abd");
        assert_eq!(marked(&diff.left, SpanKind::Same), "ab");
        assert_eq!(marked(&diff.left, SpanKind::Removed), "c");
        assert_eq!(marked(&diff.right, SpanKind::Same), "ab");
        assert_eq!(marked(&diff.right, SpanKind::Inserted), "d");
    }

    #[test]
    fn test_empty_left_side() {
        let diff = diff_strings("", "xyz");
        assert!(diff.left.is_empty());
        assert_eq!(diff.right.len(), 1);
        assert_eq!(diff.right[0].kind, SpanKind::Inserted);
        assert_eq!(diff.right[0].text, "xyz");
    }

    #[test]
    fn test_empty_right_side() {
        let diff = diff_strings("xyz", "");
        assert!(diff.right.is_empty());
        assert_eq!(marked(&diff.left, SpanKind::Removed), "xyz");
    }

    #[test]
    fn test_disjoint_strings_fully_annotated() {
        let diff = diff_strings("abc", "xyz");
        assert_eq!(marked(&diff.left, SpanKind::Same), "");
        assert_eq!(marked(&diff.left, SpanKind::Removed), "abc");
        assert_eq!(marked(&diff.right, SpanKind::Inserted), "xyz");
    }

    #[test]
    fn test_sides_reconstruct_inputs() {
        let old = "count: Optional(3)";
        let new = "count: Optional(14)";
        let diff = diff_strings(old, new);
        assert_eq!(side_text(&diff.left), old);
        assert_eq!(side_text(&diff.right), new);
    }

    #[test]
    fn test_adjacent_runs_are_coalesced() {
        let diff = diff_strings("aaXXbb", "aabb");
        // One removed run of two characters, not two single-char spans.
        let removed: Vec<_> = diff
            .left
            .iter()
            .filter(|s| s.kind == SpanKind::Removed)
            .collect();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].text, "XX");
    }

    #[test]
    fn test_multibyte_characters() {
        let diff = diff_strings("héllo", "hèllo");
        assert_eq!(side_text(&diff.left), "héllo");
        assert_eq!(side_text(&diff.right), "hèllo");
        assert_eq!(marked(&diff.left, SpanKind::Removed), "é");
        assert_eq!(marked(&diff.right, SpanKind::Inserted), "è");
    }
}

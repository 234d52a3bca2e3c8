use regex::Regex;

/// Source documents embed line breaks either as real newlines or as the
/// literal two-character `\n` sequence; both mean the same thing.
pub fn normalize_passage(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Split a normalized passage into paragraphs.
///
/// A boundary is a blank line (newline, optional whitespace, newline) or a
/// newline followed by an indented line (space, full-width space, or tab).
/// Source documents use the two conventions interchangeably. The indent
/// marker stays with the paragraph it opens. Whitespace-only segments are
/// dropped; a passage without any boundary comes back as one paragraph.
pub fn split_paragraphs(passage: &str) -> Vec<String> {
    let boundary = Regex::new(r"\r?\n\s*\r?\n|\r?\n(?P<indent>[ \t\u{3000}])").unwrap();

    let mut paragraphs = Vec::new();
    let mut start = 0;
    for caps in boundary.captures_iter(passage) {
        let m = caps.get(0).unwrap();
        paragraphs.push(&passage[start..m.start()]);
        start = match caps.name("indent") {
            Some(indent) => indent.start(),
            None => m.end(),
        };
    }
    paragraphs.push(&passage[start..]);

    paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_backslash_n_becomes_newline() {
        assert_eq!(normalize_passage("one\\ntwo\nthree"), "one\ntwo\nthree");
    }

    #[test]
    fn blank_line_is_a_boundary() {
        let paragraphs = split_paragraphs("First paragraph.\n\nSecond paragraph.");
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn blank_line_with_whitespace_is_a_boundary() {
        let paragraphs = split_paragraphs("First.\n   \nSecond.");
        assert_eq!(paragraphs, vec!["First.", "Second."]);
    }

    #[test]
    fn indented_line_opens_a_new_paragraph() {
        let paragraphs = split_paragraphs("First paragraph.\n　Second paragraph.\n\tThird.");
        assert_eq!(
            paragraphs,
            vec!["First paragraph.", "　Second paragraph.", "\tThird."]
        );
    }

    #[test]
    fn unindented_continuation_stays_in_the_paragraph() {
        let paragraphs = split_paragraphs("A line\nthat continues.\n\nNext.");
        assert_eq!(paragraphs, vec!["A line\nthat continues.", "Next."]);
    }

    #[test]
    fn passage_without_breaks_is_one_paragraph() {
        let paragraphs = split_paragraphs("Just one paragraph here.");
        assert_eq!(paragraphs, vec!["Just one paragraph here."]);
    }

    #[test]
    fn whitespace_only_segments_are_dropped() {
        assert!(split_paragraphs("   \n\n  \n　\n\n").is_empty());
        assert!(split_paragraphs("").is_empty());
    }

    #[test]
    fn consecutive_blank_lines_collapse() {
        let paragraphs = split_paragraphs("One.\n\n\n\nTwo.");
        assert_eq!(paragraphs, vec!["One.", "Two."]);
    }
}

//! Whitespace munging of serialized edition blocks.
//!
//! Each fragment is split into lines and every line is trimmed. Whitespace
//! between a `<lb/>` tag and the content that follows it is removed. The
//! lines are then concatenated without a separator.

use std::borrow::Cow;

use regex::Regex;

use crate::error::Result;

/// Group 1 is the line-break tag, group 2 the rest of the line. Only ASCII
/// whitespace after the tag is removed.
pub const LB_WHITESPACE_PATTERN: &str = r"(<lb\b[^>]*/>)(?-u:\s)+(.*)";

/// Owns the compiled line-break pattern.
#[derive(Debug, Clone)]
pub struct Munger {
    lb_whitespace: Regex,
}

impl Munger {
    /// Compile the line-break pattern.
    pub fn new() -> Result<Self> {
        Ok(Self {
            lb_whitespace: Regex::new(LB_WHITESPACE_PATTERN)?,
        })
    }

    /// Drop the whitespace after the first line-break tag on a line.
    ///
    /// Text before the tag is kept as is.
    ///
    /// # Examples
    /// ```
    /// use usep_indexer::munge::Munger;
    ///
    /// let munger = Munger::new().unwrap();
    /// assert_eq!(munger.munge_line("Hello<lb/>   World"), "Hello<lb/>World");
    /// assert_eq!(munger.munge_line("no break here"), "no break here");
    /// ```
    pub fn munge_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.lb_whitespace.replace(line, "${1}${2}")
    }

    /// Munge one serialized fragment and append it to `out`.
    pub fn munge_fragment_into(&self, fragment: &str, out: &mut String) {
        for line in fragment.split('\n') {
            out.push_str(&self.munge_line(line.trim()));
        }
    }

    /// Munge fragments in order and concatenate the results.
    pub fn munge<I, S>(&self, fragments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut munged = String::new();
        for fragment in fragments {
            self.munge_fragment_into(fragment.as_ref(), &mut munged);
        }
        munged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn munger() -> Munger {
        Munger::new().unwrap()
    }

    #[test]
    fn test_munge_line_removes_whitespace_after_lb() {
        assert_eq!(munger().munge_line("<lb/>  \t word"), "<lb/>word");
        assert_eq!(
            munger().munge_line(r#"<lb n="2" break="no"/> DIS MANIBVS"#),
            r#"<lb n="2" break="no"/>DIS MANIBVS"#
        );
    }

    #[test]
    fn test_munge_line_keeps_prefix_text() {
        assert_eq!(
            munger().munge_line("<ab>Hello<lb/>   World</ab>"),
            "<ab>Hello<lb/>World</ab>"
        );
    }

    #[test]
    fn test_munge_line_without_whitespace_is_unchanged() {
        assert!(matches!(munger().munge_line("<lb/>word"), Cow::Borrowed(_)));
        assert_eq!(munger().munge_line("<lb/>word"), "<lb/>word");
    }

    #[test]
    fn test_munge_line_ignores_other_tags() {
        assert_eq!(munger().munge_line("<lbx/> word"), "<lbx/> word");
        assert_eq!(munger().munge_line("<gap/> word"), "<gap/> word");
    }

    #[test]
    fn test_munge_line_first_break_followed_by_space() {
        assert_eq!(
            munger().munge_line("<lb/>a <lb/>   b"),
            "<lb/>a <lb/>b"
        );
    }

    #[test]
    fn test_munge_line_keeps_non_ascii_space() {
        assert_eq!(munger().munge_line("<lb/>\u{a0}word"), "<lb/>\u{a0}word");
        assert_eq!(munger().munge_line("<lb/> \u{a0}word"), "<lb/>\u{a0}word");
    }

    #[test]
    fn test_munge_trims_and_joins_lines() {
        let fragment = "<ab>\n    <lb n=\"1\"/> D M\n    <lb n=\"2\"/>   IVLIAE\n</ab>\n";
        assert_eq!(
            munger().munge([fragment]),
            "<ab><lb n=\"1\"/>D M<lb n=\"2\"/>IVLIAE</ab>"
        );
    }

    #[test]
    fn test_munge_preserves_fragment_order() {
        let munged = munger().munge(["<ab>first</ab>", "<ab>second</ab>", "<ab>third</ab>"]);
        assert_eq!(munged, "<ab>first</ab><ab>second</ab><ab>third</ab>");
    }

    #[test]
    fn test_munge_no_fragments() {
        assert_eq!(munger().munge(Vec::<String>::new()), "");
    }
}

//! Turns subtitle formatted caption text (SRT and friends) into plain prose.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Separator between the start and end timestamps of a cue
pub const TIME_RANGE_SEPARATOR: &str = "-->";

/// Drops cue index lines and time range lines, joins what is left with single
/// spaces and collapses any remaining whitespace runs.
///
/// ```
/// let srt = "1\n00:00:01,000 --> 00:00:02,500\nHello   there\n\n2\n00:00:03,000 --> 00:00:04,000\nworld\n";
/// assert_eq!(caption_pulse::caption::clean(srt), "Hello there world");
/// ```
pub fn clean(raw: &str) -> String {
    let joined = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_index_line(line))
        .filter(|line| !line.contains(TIME_RANGE_SEPARATOR))
        .join(" ");

    WHITESPACE_RUN_RE.replace_all(&joined, " ").trim().to_string()
}

pub fn is_long_enough(cleaned: &str, min_length: usize) -> bool {
    cleaned.chars().count() >= min_length
}

fn is_index_line(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRT: &str = "1
00:00:00,000 --> 00:00:02,120
so today we're going to talk about

2
00:00:02,120 --> 00:00:05,400
git rebase   and why
you should care

3
00:00:05,400 --> 00:00:07,000
42 is not an index here
";

    #[test]
    fn test_clean_srt() {
        assert_eq!(
            clean(SRT),
            "so today we're going to talk about git rebase and why you should care 42 is not an index here"
        );
    }

    #[test]
    fn test_clean_handles_crlf_and_tabs() {
        let raw = "1\r\n00:00:00,000 --> 00:00:01,000\r\n\tHello\t\tworld \r\n";
        assert_eq!(clean(raw), "Hello world");
    }

    #[test]
    fn test_clean_empty_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("1\n2\n00:00:00,000 --> 00:00:01,000\n"), "");
    }

    #[test]
    fn test_numeric_text_inside_a_line_is_kept() {
        assert_eq!(clean("version 2 released\n2\n"), "version 2 released");
    }

    #[test]
    fn test_is_long_enough_counts_chars() {
        assert!(is_long_enough("abc", 3));
        assert!(!is_long_enough("abc", 4));
        // three chars, nine bytes
        assert!(!is_long_enough("字幕长", 4));
        assert!(is_long_enough("字幕长", 3));
    }

    #[quickcheck_macros::quickcheck]
    fn prop_clean_output_shape(lines: Vec<String>) -> bool {
        let cleaned = clean(&lines.join("\n"));

        let no_double_whitespace = !cleaned
            .chars()
            .tuple_windows()
            .any(|(a, b)| a.is_whitespace() && b.is_whitespace());

        no_double_whitespace && !cleaned.contains(TIME_RANGE_SEPARATOR) && cleaned == cleaned.trim()
    }

    #[quickcheck_macros::quickcheck]
    fn prop_cleaning_is_stable(lines: Vec<String>) -> bool {
        let once = clean(&lines.join("\n"));
        clean(&once) == once || once.chars().all(|c| c.is_ascii_digit())
    }
}

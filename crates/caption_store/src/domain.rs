use std::{fmt, ops::Deref, sync::LazyLock};

use regex::Regex;

static ILLEGAL_PATH_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// A filesystem safe storage key derived from a video title.
///
/// Characters that are illegal in paths (`<>:"/\|?*`) become `_`, leading and
/// trailing spaces and dots are removed and the result is capped at
/// [`SafeKey::MAX_LEN`] characters. Deriving a key from a key yields the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeKey(String);

impl SafeKey {
    pub const MAX_LEN: usize = 200;
    const FALLBACK: &str = "untitled";

    pub fn from_title(title: &str) -> Self {
        let replaced = ILLEGAL_PATH_CHARS_RE.replace_all(title, "_");
        let truncated: String = trim_key(&replaced).chars().take(Self::MAX_LEN).collect();

        // truncation can expose a trailing space or dot
        let key = trim_key(&truncated);
        if key.is_empty() {
            return SafeKey(Self::FALLBACK.to_string());
        }

        SafeKey(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn trim_key(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '.')
}

impl Deref for SafeKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SafeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_illegal_characters() {
        let key = SafeKey::from_title(r#"a<b>c:d"e/f\g|h?i*j"#);
        assert_eq!(key.as_str(), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_strips_spaces_and_dots() {
        assert_eq!(SafeKey::from_title("  ..Git Basics.. ").as_str(), "Git Basics");
        assert_eq!(SafeKey::from_title("v1.2 release").as_str(), "v1.2 release");
    }

    #[test]
    fn test_caps_length() {
        let title = "x".repeat(500);
        assert_eq!(SafeKey::from_title(&title).chars().count(), SafeKey::MAX_LEN);
    }

    #[test]
    fn test_caps_length_in_chars_not_bytes() {
        let title = "字".repeat(300);
        let key = SafeKey::from_title(&title);
        assert_eq!(key.chars().count(), SafeKey::MAX_LEN);
    }

    #[test]
    fn test_trailing_dot_after_truncation_is_stripped() {
        let title = format!("{}. tail", "a".repeat(199));
        let key = SafeKey::from_title(&title);
        assert_eq!(key.as_str(), "a".repeat(199));
        assert_eq!(SafeKey::from_title(&key), key);
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(SafeKey::from_title("").as_str(), "untitled");
        assert_eq!(SafeKey::from_title(" ... ").as_str(), "untitled");
    }

    #[quickcheck_macros::quickcheck]
    fn prop_idempotent(title: String) -> bool {
        let once = SafeKey::from_title(&title);
        SafeKey::from_title(&once) == once
    }

    #[quickcheck_macros::quickcheck]
    fn prop_bounded_and_clean(title: String) -> bool {
        let key = SafeKey::from_title(&title);
        key.chars().count() <= SafeKey::MAX_LEN
            && !key.chars().any(|c| r#"<>:"/\|?*"#.contains(c))
    }
}

//! Text helpers

/// Return the prefix of `text` holding at most `max_chars` characters
///
/// Counts Unicode scalar values, not bytes, so multi-byte characters are never
/// split.
///
/// # Examples
///
/// ```
/// use folio_domain::truncate_chars;
///
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("short", 50), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "ééééé";
        assert_eq!(truncate_chars(text, 2), "éé");
        assert_eq!(truncate_chars(text, 2).len(), 4);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the prefix never exceeds the limit and is a true prefix
        #[test]
        fn test_truncate_is_bounded_prefix(text in "\\PC{0,200}", max in 0usize..250) {
            let prefix = truncate_chars(&text, max);
            prop_assert!(text.starts_with(prefix));
            prop_assert_eq!(prefix.chars().count(), text.chars().count().min(max));
        }
    }
}

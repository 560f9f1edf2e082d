use thiserror::Error;

use crate::utils::urls;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("no '/' in '{0}'")]
    NoSeparator(String),

    #[error("only a single '/' in '{0}'")]
    SingleSeparatorOnly(String),
}

/// Return `s` from its second `/` (inclusive) to the end.
///
/// Drops the leading storage-root segment, e.g. `/115/Movies/a.mkv` becomes
/// `/Movies/a.mkv`.
pub fn split_from_second_slash(s: &str) -> Result<String, SplitError> {
    let s = urls::transfer_slash(s);
    let Some(first) = s.find('/') else {
        return Err(SplitError::NoSeparator(s));
    };
    let Some(second) = s[first + 1..].find('/') else {
        return Err(SplitError::SingleSeparatorOnly(s));
    };
    Ok(s[first + 1 + second..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_from_second_slash() {
        assert_eq!(split_from_second_slash("/a/b/c").unwrap(), "/b/c");
        assert_eq!(split_from_second_slash("/a/b").unwrap(), "/b");
        assert_eq!(split_from_second_slash("/115/Movies/Foo.mkv").unwrap(), "/Movies/Foo.mkv");
    }

    #[test]
    fn leading_segment_without_root_slash() {
        assert_eq!(split_from_second_slash("a/b/c").unwrap(), "/c");
        assert_eq!(split_from_second_slash("/a/").unwrap(), "/");
    }

    #[test]
    fn backslashes_count_as_separators() {
        assert_eq!(split_from_second_slash(r"\a\b\c.mkv").unwrap(), "/b/c.mkv");
    }

    #[test]
    fn single_separator_fails() {
        assert_eq!(
            split_from_second_slash("/a"),
            Err(SplitError::SingleSeparatorOnly("/a".to_string()))
        );
    }

    #[test]
    fn no_separator_fails() {
        assert_eq!(
            split_from_second_slash("noslash"),
            Err(SplitError::NoSeparator("noslash".to_string()))
        );
        assert!(matches!(split_from_second_slash(""), Err(SplitError::NoSeparator(_))));
    }
}

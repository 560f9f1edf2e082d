/// Percent-decode `s` once.
///
/// Malformed escapes are kept as-is; if the decoded bytes are not valid UTF-8
/// the input is returned untouched.
pub fn unescape(s: &str) -> String {
    match urlencoding::decode(s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Turn every Windows backslash into a forward slash.
pub fn transfer_slash(s: &str) -> String {
    s.replace('\\', "/")
}

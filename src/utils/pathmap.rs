use crate::config::PathMap;

/// Map a mount-stripped Emby path to its OpenList override.
///
/// Rules are tried in configuration order; the first one whose `from` is a
/// literal prefix of `emby_path` wins and that prefix is replaced once.
pub fn map_emby_to_openlist(emby_path: &str, mappings: &[PathMap]) -> Option<String> {
    mappings.iter().find_map(|m| {
        emby_path
            .strip_prefix(m.from.as_str())
            .map(|suffix| format!("{}{}", m.to, suffix))
    })
}

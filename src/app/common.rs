use std::str::FromStr;

use tracing::Level;

use crate::core::path::{RangeError, Translation};

pub fn init_logging(config: &crate::config::Config) {
    tracing_subscriber::fmt()
        .with_max_level(Level::from_str(&config.logs.level).unwrap_or(Level::INFO))
        .init();
}

/// Human-readable report of a translation and its enumerated candidates.
pub fn render_translation(
    emby_path: &str,
    translation: &Translation,
    range: &Result<Vec<String>, RangeError>,
) -> String {
    let mut out = format!("Emby: {emby_path}\n  Openlist: {}\n", translation.path);
    match range {
        Ok(paths) if paths.is_empty() => out.push_str("  Range: (no storage roots)\n"),
        Ok(paths) => {
            out.push_str("  Range:\n");
            for p in paths {
                out.push_str(&format!("    {p}\n"));
            }
        }
        Err(e) => out.push_str(&format!("  Range error: {e}\n")),
    }
    out
}

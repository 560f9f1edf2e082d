use serde::Deserialize;

impl Config {

    pub fn init() -> Result<Self, config::ConfigError> {
        // get config toml dir from env, with default
        let config_path = std::env::var("EMBY2OPENLIST_CONFIG_PATH")
            .unwrap_or_else(|_| String::from("./config.toml"));

        let config = config::Config::builder()
            // Add in config toml
            .add_source(config::File::with_name(&config_path))
            // Add in settings from the environment (with a prefix of EMBY2OPENLIST)
            .add_source(config::Environment::with_prefix("EMBY2OPENLIST").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

// ================================================================================================
// Models
// ================================================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Config {
    pub logs: LogsConfig,
    pub emby: EmbyConfig,
    pub openlist: OpenlistConfig,
    #[serde(default)]
    pub path: PathConfig,
}

// ===============================================================================
// Logs
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct LogsConfig {
    pub level: String,
}

// ===============================================================================
// Emby
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct EmbyConfig {
    /// Prefix under which Emby sees the library (e.g. "/media")
    #[serde(default)]
    pub mount_path: String,
}

// ===============================================================================
// Openlist
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct OpenlistConfig {
    /// Base URL of the OpenList server (e.g. "http://localhost:5244")
    pub host: String,
    /// Admin token sent as the `Authorization` header.
    pub token: String,
    /// Deadline for a single listing request.
    #[serde(default = "default_openlist_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_openlist_timeout_secs() -> u64 { 10 }

// ===============================================================================
// Path
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct PathConfig {
    /// Resolve local symlinks before stripping the mount path.
    #[serde(default)]
    pub follow_symlink: bool,
    /// Deadline for a single symlink resolution.
    #[serde(default = "default_symlink_timeout_ms")]
    pub symlink_timeout_ms: u64,
    /// Ordered override rules, first match wins.
    #[serde(default)]
    pub emby2openlist: Vec<PathMap>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            follow_symlink: false,
            symlink_timeout_ms: default_symlink_timeout_ms(),
            emby2openlist: Vec::new(),
        }
    }
}

impl PathConfig {
    /// Map a mount-stripped Emby path through `emby2openlist`.
    pub fn map_emby2openlist(&self, path: &str) -> Option<String> {
        crate::utils::pathmap::map_emby_to_openlist(path, &self.emby2openlist)
    }
}

fn default_symlink_timeout_ms() -> u64 { 3000 }

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PathMapRepr")]
pub struct PathMap {
    /// Prefix as left after removing the Emby mount path (e.g. "/movies")
    pub from: String,
    /// Replacement prefix on OpenList (e.g. "/115/movies")
    pub to: String,
}

/// A rule is either a `{ from, to }` table or a compact `"from:to"` string.
#[derive(Deserialize)]
#[serde(untagged)]
enum PathMapRepr {
    Table { from: String, to: String },
    Compact(String),
}

impl TryFrom<PathMapRepr> for PathMap {
    type Error = String;

    fn try_from(repr: PathMapRepr) -> Result<Self, Self::Error> {
        match repr {
            PathMapRepr::Table { from, to } => Ok(Self { from, to }),
            PathMapRepr::Compact(s) => match s.split_once(':') {
                Some((from, to)) => Ok(Self {
                    from: from.to_string(),
                    to: to.to_string(),
                }),
                None => Err(format!("invalid emby2openlist rule '{s}', expected 'from:to'")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_rules_accept_tables_and_compact_strings() {
        let raw = r#"
            follow_symlink = true
            emby2openlist = [
                { from = "/movies", to = "/115/movies" },
                "/shows:/quark/shows",
            ]
        "#;
        let cfg: PathConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(cfg.follow_symlink);
        assert_eq!(cfg.symlink_timeout_ms, 3000);
        assert_eq!(
            cfg.emby2openlist,
            vec![
                PathMap { from: "/movies".into(), to: "/115/movies".into() },
                PathMap { from: "/shows".into(), to: "/quark/shows".into() },
            ]
        );
    }

    #[test]
    fn compact_rule_without_colon_is_rejected() {
        let raw = r#"emby2openlist = ["/movies"]"#;
        let res: Result<PathConfig, _> = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize();
        assert!(res.is_err());
    }

    #[test]
    fn path_section_defaults() {
        let cfg = PathConfig::default();
        assert!(!cfg.follow_symlink);
        assert!(cfg.emby2openlist.is_empty());
        assert_eq!(cfg.map_emby2openlist("/movies/a.mkv"), None);
    }
}

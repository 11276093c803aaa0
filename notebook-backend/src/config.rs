use std::env;
use std::path::PathBuf;

use crate::search::MatchMode;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDR: &str = "NOTEBOOK_BIND_ADDR";
    pub const NOTES_DIR: &str = "NOTEBOOK_NOTES_DIR";
    pub const RESULTS_DIR: &str = "NOTEBOOK_RESULTS_DIR";
    pub const STATIC_DIR: &str = "NOTEBOOK_STATIC_DIR";
    /// Set to "true" or "1" to lowercase note content as well as the query.
    /// Default: false (only the query is lowercased).
    pub const CASE_INSENSITIVE: &str = "NOTEBOOK_CASE_INSENSITIVE";
    /// Set to "false" or "0" to require the note and result directories to exist already.
    pub const CREATE_DIRS: &str = "NOTEBOOK_CREATE_DIRS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BIND_ADDR: &str = "127.0.0.1";
    pub const NOTES_DIR: &str = "note";
    pub const RESULTS_DIR: &str = "search";
    pub const STATIC_DIR: &str = "static";
    pub const CASE_INSENSITIVE: bool = false;
    pub const CREATE_DIRS: bool = true;
}

/// Returns the absolute path to the notebook-backend directory.
/// Bundled assets are found relative to it regardless of the working directory.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_addr: String,
    /// Directory holding one file per note
    pub notes_dir: PathBuf,
    /// Directory mirroring the notes matched by the last search
    pub results_dir: PathBuf,
    /// Static assets; templates are looked up under `templates/` inside it
    pub static_dir: PathBuf,
    pub match_mode: MatchMode,
    pub create_dirs: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            bind_addr: env::var(env_vars::BIND_ADDR)
                .unwrap_or_else(|_| defaults::BIND_ADDR.to_string()),
            notes_dir: path_var(env_vars::NOTES_DIR, defaults::NOTES_DIR),
            results_dir: path_var(env_vars::RESULTS_DIR, defaults::RESULTS_DIR),
            static_dir: env::var(env_vars::STATIC_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| backend_dir().join(defaults::STATIC_DIR)),
            match_mode: if flag_var(env_vars::CASE_INSENSITIVE, defaults::CASE_INSENSITIVE) {
                MatchMode::CaseInsensitive
            } else {
                MatchMode::Observed
            },
            create_dirs: flag_var(env_vars::CREATE_DIRS, defaults::CREATE_DIRS),
        }
    }

    /// Get the template override directory
    pub fn templates_dir(&self) -> PathBuf {
        self.static_dir.join("templates")
    }

    /// Create the note and result directories if they are missing
    pub fn initialize_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.notes_dir, &self.results_dir] {
            if !dir.exists() {
                log::info!("Creating directory {}", dir.display());
                std::fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    PathBuf::from(env::var(name).unwrap_or_else(|_| default.to_string()))
}

fn flag_var(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => parse_flag(&v).unwrap_or_else(|| {
            log::warn!("Ignoring unrecognized value {:?} for {}", v, name);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("OFF"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_initialize_dirs_creates_missing() {
        let dir = tempdir().unwrap();
        let config = Config {
            port: defaults::PORT,
            bind_addr: defaults::BIND_ADDR.to_string(),
            notes_dir: dir.path().join("note"),
            results_dir: dir.path().join("search"),
            static_dir: dir.path().join("static"),
            match_mode: MatchMode::Observed,
            create_dirs: true,
        };

        config.initialize_dirs().unwrap();
        assert!(config.notes_dir.is_dir());
        assert!(config.results_dir.is_dir());
        assert_eq!(config.templates_dir(), dir.path().join("static/templates"));
    }
}

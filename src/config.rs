use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use tracing::{debug, warn};

pub const URL_VAR: &str = "THEHIVE_URL";
pub const API_KEY_VAR: &str = "THEHIVE_API_KEY";

pub const DEFAULT_API_URL: &str = "http://localhost:9000/api";
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
        }
    }
}

impl Config {
    /// Path of the `.env` file consulted by [`Config::load`].
    pub fn dotenv_path() -> PathBuf {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".env")
    }

    /// Load config from the process environment, then `./.env`, then defaults.
    pub fn load() -> Self {
        let path = Self::dotenv_path();
        let dotenv = match read_dotenv(&path) {
            Ok(vars) => vars,
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self::resolve(&dotenv, |key| env::var(key).ok())
    }

    /// Resolve each value from `lookup` first, falling back to `dotenv` and
    /// finally the built-in default.
    pub fn resolve<F>(dotenv: &BTreeMap<String, String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, default: &str| {
            lookup(key)
                .or_else(|| dotenv.get(key).cloned())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_url: pick(URL_VAR, DEFAULT_API_URL),
            api_key: pick(API_KEY_VAR, PLACEHOLDER_API_KEY),
        }
    }

    /// Base URL with a single trailing slash removed.
    pub fn api_base(&self) -> &str {
        self.api_url.strip_suffix('/').unwrap_or(&self.api_url)
    }

    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

/// Read `KEY=value` pairs from a dotenv file. A missing file yields an empty map.
pub fn read_dotenv(path: &Path) -> std::io::Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    debug!("reading {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(parse_dotenv(&content))
}

pub fn parse_dotenv(content: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let assignment = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        if let Some((key, value)) = parse_assignment(assignment) {
            vars.insert(key.to_string(), value);
        }
    }

    vars
}

fn parse_assignment(line: &str) -> Option<(&str, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = strip_quotes(strip_trailing_comment(value));
    Some((key, value))
}

/// `value  # note` → `value`; a `#` inside quotes is kept.
fn strip_trailing_comment(s: &str) -> &str {
    let s = s.trim();
    let mut in_single = false;
    let mut in_double = false;

    for (i, b) in s.bytes().enumerate() {
        match b {
            b'\'' if !in_double => in_single = !in_single,
            b'"' if !in_single => in_double = !in_double,
            b'#' if !in_single && !in_double => return s[..i].trim_end(),
            _ => {}
        }
    }
    s
}

fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = Config::resolve(&BTreeMap::new(), lookup_from(&[]));
        assert_eq!(config, Config::default());
        assert!(config.uses_placeholder_key());
    }

    #[test]
    fn environment_wins_over_dotenv() {
        let dotenv = parse_dotenv("THEHIVE_URL=https://from-file/api\nTHEHIVE_API_KEY=file-key\n");
        let config = Config::resolve(&dotenv, lookup_from(&[("THEHIVE_URL", "https://from-env/api")]));

        assert_eq!(config.api_url, "https://from-env/api");
        assert_eq!(config.api_key, "file-key");
        assert!(!config.uses_placeholder_key());
    }

    #[test]
    fn api_base_strips_one_trailing_slash() {
        let config = Config {
            api_url: "https://hive.local/api/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_base(), "https://hive.local/api");

        let config = Config::default();
        assert_eq!(config.api_base(), DEFAULT_API_URL);
    }

    #[test]
    fn parses_dotenv_syntax() {
        let vars = parse_dotenv(
            r#"
# comment
export THEHIVE_URL="https://hive.example/api"
THEHIVE_API_KEY='abc#123'   # inline note
BROKEN LINE
=novalue
"#,
        );

        assert_eq!(vars.get("THEHIVE_URL").map(String::as_str), Some("https://hive.example/api"));
        assert_eq!(vars.get("THEHIVE_API_KEY").map(String::as_str), Some("abc#123"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn missing_dotenv_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_dotenv(&dir.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn reads_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "THEHIVE_API_KEY=secret\n").unwrap();

        let vars = read_dotenv(&path).unwrap();
        let config = Config::resolve(&vars, |_| None);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}

//! Server configuration, read from `CERTGEN_*` environment variables.
//!
//! A `.env` file in the working directory is loaded first when present. Values that
//! fail to parse fall back to their default with a warning.

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FONTS_DIR: &str = "./fonts";
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory searched first for the certificate font family.
    pub fonts_dir: PathBuf,
    /// Whether well-known system font directories are searched after `fonts_dir`.
    pub system_fonts: bool,
    /// Open the form in the default browser once the server is up.
    pub open_browser: bool,
    /// Maximum accepted JSON body, in bytes.
    pub json_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fonts_dir: PathBuf::from(DEFAULT_FONTS_DIR),
            system_fonts: true,
            open_browser: true,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Self {
            host: lookup("CERTGEN_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "CERTGEN_PORT", defaults.port),
            fonts_dir: lookup("CERTGEN_FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.fonts_dir),
            system_fonts: flag(&lookup, "CERTGEN_SYSTEM_FONTS", defaults.system_fonts),
            open_browser: flag(&lookup, "CERTGEN_OPEN_BROWSER", defaults.open_browser),
            json_limit: parsed(&lookup, "CERTGEN_JSON_LIMIT", defaults.json_limit),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value `{}`, using default", key, raw);
            default
        }),
        None => default,
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") | Some("on") => true,
        Some("0") | Some("false") | Some("no") | Some("off") => false,
        Some(other) => {
            warn!("{} has invalid value `{}`, using default", key, other);
            default
        }
        None => default,
    }
}

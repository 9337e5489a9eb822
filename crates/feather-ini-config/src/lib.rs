//! Default parse and save flags loaded from `.feather-ini.toml`.
//!
//! Flags are resolved once and then passed explicitly to every parse or save
//! call; nothing here is global. A missing file yields the built-in defaults,
//! which strip no comments and apply no output formatting.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use feather_ini::{ParseFlags, SaveFlags};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".feather-ini.toml";

/// Resolved default flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub parse: ParseFlags,
    pub save: SaveFlags,
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config{}: {source}", describe(.path))]
    Parse {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },
    #[error("configuration validation failed: {0}")]
    Validation(ConfigValidationError),
}

/// A value that deserialized but does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.field, self.value)
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

impl Config {
    /// Parses configuration text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(contents).map_err(|source| ConfigError::Parse { path: None, source })?;
        raw.finalize().map_err(ConfigError::Validation)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.into(),
                    source,
                })
            }
        };

        Self::from_toml_str(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.into()),
                source,
            },
            other => other,
        })
    }

    /// Loads `.feather-ini.toml` from `dir`.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_from(&dir.join(CONFIG_FILE_NAME))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    parse: Option<RawParse>,
    #[serde(default)]
    save: Option<RawSave>,
}

impl RawConfig {
    fn finalize(self) -> Result<Config, ConfigValidationError> {
        let parse = match self.parse {
            Some(parse) => parse.into_flags()?,
            None => ParseFlags::default(),
        };
        let save = self.save.map(RawSave::into_flags).unwrap_or_default();
        Ok(Config { parse, save })
    }
}

#[derive(Debug, Deserialize)]
struct RawParse {
    #[serde(default)]
    comments: Vec<String>,
}

impl RawParse {
    fn into_flags(self) -> Result<ParseFlags, ConfigValidationError> {
        let mut flags = ParseFlags::empty();
        for style in self.comments {
            flags |= match style.as_str() {
                "slash" => ParseFlags::COMMENTS_SLASH,
                "hash" => ParseFlags::COMMENTS_HASH,
                "all" => ParseFlags::COMMENTS_ALL,
                _ => {
                    return Err(ConfigValidationError {
                        field: "comment style",
                        value: style,
                    })
                }
            };
        }
        Ok(flags)
    }
}

#[derive(Debug, Deserialize)]
struct RawSave {
    #[serde(default)]
    prune: bool,
    #[serde(default)]
    padding_sections: bool,
    #[serde(default)]
    space_sections: bool,
    #[serde(default)]
    space_keys: bool,
    #[serde(default)]
    tab_keys: bool,
    #[serde(default)]
    semicolon_keys: bool,
}

impl RawSave {
    fn into_flags(self) -> SaveFlags {
        [
            (self.prune, SaveFlags::PRUNE),
            (self.padding_sections, SaveFlags::PADDING_SECTIONS),
            (self.space_sections, SaveFlags::SPACE_SECTIONS),
            (self.space_keys, SaveFlags::SPACE_KEYS),
            (self.tab_keys, SaveFlags::TAB_KEYS),
            (self.semicolon_keys, SaveFlags::SEMICOLON_KEYS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(SaveFlags::empty(), |flags, (_, flag)| flags | flag)
    }
}

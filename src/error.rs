// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// A resource file could not be parsed. Nothing from it is served.
    #[error("parse error in locale '{locale}': {message}")]
    Parse { locale: String, message: String },

    #[error("duplicate key '{key}' in locale '{locale}'")]
    DuplicateKey { locale: String, key: String },

    /// Two resource files resolve to the same canonical locale tag.
    #[error("locale '{0}' is defined by more than one resource file")]
    DuplicateLocale(String),

    #[error("no resource table for the default locale '{0}'")]
    MissingDefaultLocale(String),

    /// Keys that exist in a locale but not in the default locale.
    #[error("locale '{locale}' defines keys unknown to the default locale: {}", .keys.join(", "))]
    OrphanKeys { locale: String, keys: Vec<String> },

    /// Required keys absent from the default locale, which nothing can
    /// fall back past.
    #[error("default locale '{locale}' lacks required keys: {}", .keys.join(", "))]
    MissingRequiredKeys { locale: String, keys: Vec<String> },

    #[error("Config Error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

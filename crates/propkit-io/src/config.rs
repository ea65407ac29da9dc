use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::charset::Charset;
use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoadOptions {
    #[serde(default = "default_charset")]
    pub preferred_charset: String,
}

fn default_charset() -> String {
    Charset::Utf8.name().to_string()
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            preferred_charset: default_charset(),
        }
    }
}

impl LoadOptions {
    pub fn with_charset(charset: impl Into<String>) -> Self {
        Self {
            preferred_charset: charset.into(),
        }
    }
}

pub fn load_options(path: &Path) -> Result<LoadOptions, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let options = toml::from_str(&contents)?;
    Ok(options)
}

pub fn load_options_or_default(path: &Path) -> Result<LoadOptions, ConfigError> {
    if path.exists() {
        load_options(path)
    } else {
        Ok(LoadOptions::default())
    }
}

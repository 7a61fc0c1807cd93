//! Runtime configuration.
//!
//! Every field is defaulted, so an empty document yields the built-in
//! behavior. Unknown keys are rejected.
use crate::error::InternalError;
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid graft config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read graft config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

///
/// GraftConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraftConfig {
    pub preload: PreloadConfig,
}

impl GraftConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, InternalError> {
        toml::from_str(source)
            .map_err(ConfigError::from)
            .map_err(InternalError::from)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InternalError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }
}

///
/// PreloadConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreloadConfig {
    /// Tag holding association declarations.
    pub tag: String,
    /// Tag overriding the external column name of a primary key.
    pub column_tag: String,
    pub column_case: ColumnCase,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            tag: "preload".to_string(),
            column_tag: "column".to_string(),
            column_case: ColumnCase::Camel,
        }
    }
}

///
/// ColumnCase
/// Case rule turning a field name into an external column name.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnCase {
    #[default]
    Camel,
    Snake,
    Pascal,
    Verbatim,
}

impl ColumnCase {
    /// Convert a field name. An `ID` run is folded to `Id` first so
    /// `AssetID` becomes `assetId` rather than `assetID`.
    ///
    /// `Camel` only lowers the leading word of a capitalized name; later
    /// words, acronyms included, are kept as written (`AssetSN` becomes
    /// `assetSN`). Names with separators go through full case conversion.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        if matches!(self, Self::Verbatim) {
            return name.to_string();
        }

        let name = name.replace("ID", "Id");
        match self {
            Self::Camel if !name.contains(['_', '-', ' ']) => lower_leading_word(&name),
            Self::Camel => name.to_case(Case::Camel),
            Self::Snake => name.to_case(Case::Snake),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::Verbatim => name,
        }
    }
}

// Lowercase the leading uppercase run. In a run followed by a lowercase
// letter the last capital starts the next word (`HTTPCode` -> `httpCode`).
fn lower_leading_word(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();

    let lowered = match chars.get(run) {
        Some(next) if run > 1 && next.is_lowercase() => run - 1,
        _ => run,
    };

    let mut out = String::with_capacity(name.len());
    for (pos, c) in chars.into_iter().enumerate() {
        if pos < lowered {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

///
/// TESTS
///

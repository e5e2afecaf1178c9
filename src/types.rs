//! Shared types used across the content model, the view-model, and the
//! presentation controller.
//!
//! Language and theme codes are serialized exactly as they appear in the
//! content document, in `config.toml`, and in the persisted theme preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text written into a slot whose localized value is missing.
///
/// Kept verbatim: a missing translation shows up on the page as the word
/// `undefined` rather than an empty element, and `folio check` lists them.
pub const MISSING: &str = "undefined";

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Th,
    En,
}

impl Lang {
    /// Every supported language, in toggle-button order.
    pub const ALL: [Lang; 2] = [Lang::Th, Lang::En];

    /// The code used in the content document and the root `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Th => "th",
            Lang::En => "en",
        }
    }

    /// Element id of the toggle button that selects this language.
    pub fn toggle_id(self) -> &'static str {
        match self {
            Lang::Th => "btnTh",
            Lang::En => "btnEn",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCodeError {
    #[error("unknown language code '{0}' (expected th or en)")]
    Lang(String),
    #[error("unknown theme '{0}' (expected dark or light)")]
    Theme(String),
}

impl FromStr for Lang {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "th" => Ok(Lang::Th),
            "en" => Ok(Lang::En),
            other => Err(ParseCodeError::Lang(other.to_string())),
        }
    }
}

/// Color theme. Dark is the unmarked state; light adds a marker class to the
/// root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Class added to the root element while the light theme is active.
    pub const LIGHT_MARKER: &'static str = "light";

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Whether the root element carries the light marker class.
    pub fn has_marker(self) -> bool {
        self == Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ParseCodeError::Theme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_codes_round_trip_through_from_str() {
        for lang in Lang::ALL {
            assert_eq!(lang.code().parse::<Lang>().unwrap(), lang);
        }
    }

    #[test]
    fn unknown_lang_is_rejected() {
        let err = "jp".parse::<Lang>().unwrap_err();
        assert_eq!(err, ParseCodeError::Lang("jp".to_string()));
    }

    #[test]
    fn theme_toggles_between_two_values() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn only_light_theme_has_marker() {
        assert!(Theme::Light.has_marker());
        assert!(!Theme::Dark.has_marker());
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let lang: Lang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Lang::En);
    }
}

//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user config file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_path = "data.json"   # Content document the page is rendered from
//!
//! [presentation]
//! default_lang = "th"          # Language shown on first load
//! default_theme = "dark"       # Theme when no preference has been stored
//! storage_key = "theme"        # Key the theme preference is persisted under
//!
//! [reveal]
//! threshold = 0.15             # Visible fraction that triggers a reveal
//! viewport_margin = 0.92       # Rows above this fraction of the viewport show at once
//! initial_stagger = 0.07       # Seconds of delay per row on first load
//! stagger_step = 0.05          # Seconds of delay per row after a language switch
//! stagger_cycle = 5            # Stagger restarts every N rows
//!
//! [counter]
//! duration_ms = 1100           # Count-up animation length
//! frame_interval_ms = 16       # Frame pacing used by `run_until`
//!
//! [form]
//! restore_delay_ms = 3000      # How long the "sent" label stays
//! sent_opacity = 0.5           # Submit button opacity while "sent"
//!
//! [skills]
//! invert_on_light = ["github", "nextjs", "vercel", "express"]
//!
//! [colors.dark]
//! background = "#0b0b0c"
//! # ...
//!
//! [colors.light]
//! background = "#f6f5f1"
//! # ...
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::{Lang, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content document, relative to the working directory.
    pub content_path: String,
    /// Initial language/theme and the preference storage key.
    pub presentation: PresentationConfig,
    /// Scroll reveal thresholds and stagger timing.
    pub reveal: RevealConfig,
    /// Stat counter animation timing.
    pub counter: CounterConfig,
    /// Contact form stub timing.
    pub form: FormConfig,
    /// Skill icon display.
    pub skills: SkillsConfig,
    /// Color schemes for dark and light themes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_path: "data.json".to_string(),
            presentation: PresentationConfig::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            form: FormConfig::default(),
            skills: SkillsConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

/// Upper bound for configured animation and timer durations (one hour).
pub const MAX_DELAY_MS: u64 = 3_600_000;

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reveal = &self.reveal;
        if !(reveal.threshold > 0.0 && reveal.threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be in (0, 1]".into(),
            ));
        }
        if reveal.viewport_margin <= 0.0 {
            return Err(ConfigError::Validation(
                "reveal.viewport_margin must be positive".into(),
            ));
        }
        if reveal.initial_stagger < 0.0 || reveal.stagger_step < 0.0 {
            return Err(ConfigError::Validation(
                "reveal stagger delays must not be negative".into(),
            ));
        }
        if reveal.stagger_cycle == 0 {
            return Err(ConfigError::Validation(
                "reveal.stagger_cycle must be non-zero".into(),
            ));
        }
        if self.counter.duration_ms == 0 || self.counter.frame_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "counter.duration_ms and counter.frame_interval_ms must be non-zero".into(),
            ));
        }
        if self.counter.duration_ms > MAX_DELAY_MS || self.form.restore_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "counter.duration_ms and form.restore_delay_ms must be at most {MAX_DELAY_MS}"
            )));
        }
        if !(0.0..=1.0).contains(&self.form.sent_opacity) {
            return Err(ConfigError::Validation(
                "form.sent_opacity must be 0-1".into(),
            ));
        }
        if self.presentation.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "presentation.storage_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresentationConfig {
    pub default_lang: Lang,
    /// Overridden at boot by a stored preference.
    pub default_theme: Theme,
    pub storage_key: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            default_lang: Lang::Th,
            default_theme: Theme::Dark,
            storage_key: "theme".to_string(),
        }
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible before it triggers.
    pub threshold: f64,
    /// After a language switch, rows whose top is above
    /// `viewport_margin * viewport_height` are shown without waiting.
    pub viewport_margin: f64,
    /// Seconds of transition delay per row index on first load.
    pub initial_stagger: f64,
    /// Seconds of transition delay per row index after a language switch.
    pub stagger_step: f64,
    /// Row index modulus for `stagger_step`.
    pub stagger_cycle: usize,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            viewport_margin: 0.92,
            initial_stagger: 0.07,
            stagger_step: 0.05,
            stagger_cycle: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub duration_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1100,
            frame_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub restore_delay_ms: u64,
    pub sent_opacity: f64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            restore_delay_ms: 3000,
            sent_opacity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillsConfig {
    /// Icon references containing any of these substrings are drawn
    /// inverted in the light theme (dark monochrome logos).
    pub invert_on_light: Vec<String>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            invert_on_light: ["github", "nextjs", "vercel", "express"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Color configuration for dark and light themes.
///
/// Each scheme fills missing keys from its own stock palette, so a partial
/// `[colors.light]` table keeps the light defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ColorOverrides")]
pub struct ColorConfig {
    /// Applied on `:root` (the unmarked, default state).
    pub dark: ColorScheme,
    /// Applied while the root carries the light marker class.
    pub light: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            dark: ColorScheme::default_dark(),
            light: ColorScheme::default_light(),
        }
    }
}

/// Individual color scheme (dark or light).
#[derive(Debug, Clone, Serialize)]
pub struct ColorScheme {
    pub background: String,
    /// Headings, project names.
    pub text_bright: String,
    pub text: String,
    /// Dates, tags, link labels.
    pub text_muted: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_dark() -> Self {
        Self {
            background: "#0b0b0c".to_string(),
            text_bright: "#f2f2f0".to_string(),
            text: "#b9b9b4".to_string(),
            text_muted: "#76766f".to_string(),
            border: "#232325".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#f6f5f1".to_string(),
            text_bright: "#111110".to_string(),
            text: "#3d3d3a".to_string(),
            text_muted: "#7a7a73".to_string(),
            border: "#dcdbd4".to_string(),
        }
    }
}

/// `[colors]` as written in a config file: every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ColorOverrides {
    dark: SchemeOverrides,
    light: SchemeOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SchemeOverrides {
    background: Option<String>,
    text_bright: Option<String>,
    text: Option<String>,
    text_muted: Option<String>,
    border: Option<String>,
}

impl SchemeOverrides {
    fn over(self, base: ColorScheme) -> ColorScheme {
        ColorScheme {
            background: self.background.unwrap_or(base.background),
            text_bright: self.text_bright.unwrap_or(base.text_bright),
            text: self.text.unwrap_or(base.text),
            text_muted: self.text_muted.unwrap_or(base.text_muted),
            border: self.border.unwrap_or(base.border),
        }
    }
}

impl From<ColorOverrides> for ColorConfig {
    fn from(overrides: ColorOverrides) -> Self {
        Self {
            dark: overrides.dark.over(ColorScheme::default_dark()),
            light: overrides.light.over(ColorScheme::default_light()),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given `config.toml` path.
///
/// A missing file yields the stock defaults. Otherwise user values are
/// merged on top of the defaults, unknown keys are rejected, and the result
/// is validated.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Content document the page is rendered from.
content_path = "data.json"

# ---------------------------------------------------------------------------
# Presentation
# ---------------------------------------------------------------------------
[presentation]
# Language shown on first load: "th" or "en".
default_lang = "th"

# Theme used when the visitor has no stored preference: "dark" or "light".
default_theme = "dark"

# Key the theme preference is persisted under.
storage_key = "theme"

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible before it is revealed.
threshold = 0.15

# After a language switch, rows whose top edge is above this fraction of the
# viewport height are shown immediately instead of waiting for a scroll.
viewport_margin = 0.92

# Transition delay per row index on first load (seconds).
initial_stagger = 0.07

# Transition delay per row index after a language switch (seconds),
# restarting every `stagger_cycle` rows.
stagger_step = 0.05
stagger_cycle = 5

# ---------------------------------------------------------------------------
# Stat counters
# ---------------------------------------------------------------------------
[counter]
# Length of the ease-out count-up animation.
duration_ms = 1100

# Frame pacing when the animation is driven by `run_until`.
frame_interval_ms = 16

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[form]
# How long the submit button shows its "sent" label.
restore_delay_ms = 3000

# Submit button opacity while showing "sent" (0-1).
sent_opacity = 0.5

# ---------------------------------------------------------------------------
# Skills
# ---------------------------------------------------------------------------
[skills]
# Icons whose reference contains one of these substrings are inverted in the
# light theme.
invert_on_light = ["github", "nextjs", "vercel", "express"]

# ---------------------------------------------------------------------------
# Colors - Dark theme (default)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0b0c"
text_bright = "#f2f2f0"
text = "#b9b9b4"
text_muted = "#76766f"    # Dates, tags, link labels
border = "#232325"

# ---------------------------------------------------------------------------
# Colors - Light theme (root element carries the `light` class)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f6f5f1"
text_bright = "#111110"
text = "#3d3d3a"
text_muted = "#7a7a73"
border = "#dcdbd4"
"##
}

/// Generate CSS custom properties from color config.
///
/// Dark is the unmarked state; the light scheme applies under `html.light`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {dark_bg};
    --color-text-bright: {dark_bright};
    --color-text: {dark_text};
    --color-text-muted: {dark_muted};
    --color-border: {dark_border};
}}

html.{marker} {{
    --color-bg: {light_bg};
    --color-text-bright: {light_bright};
    --color-text: {light_text};
    --color-text-muted: {light_muted};
    --color-border: {light_border};
}}"#,
        marker = Theme::LIGHT_MARKER,
        dark_bg = colors.dark.background,
        dark_bright = colors.dark.text_bright,
        dark_text = colors.dark.text,
        dark_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        light_bg = colors.light.background,
        light_bright = colors.light.text_bright,
        light_text = colors.light.text,
        light_muted = colors.light.text_muted,
        light_border = colors.light.border,
    )
}

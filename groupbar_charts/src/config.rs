// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! Hosts hand the widget a typed [`ChartConfig`]. Pages that carry their layout
//! hints as a JSON string inside a CSS `content` property can resolve it with
//! [`ChartConfig::from_css_content`] before constructing the chart.

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Resolved plot margins in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot (holds the value axis).
    pub bottom: f64,
    /// Space left of the plot (holds the category axis).
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Per-side margin overrides. Absent sides keep their default.
///
/// Unknown keys are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOverrides {
    /// Override for [`Margin::top`].
    pub top: Option<f64>,
    /// Override for [`Margin::right`].
    pub right: Option<f64>,
    /// Override for [`Margin::bottom`].
    pub bottom: Option<f64>,
    /// Override for [`Margin::left`].
    pub left: Option<f64>,
}

/// Construction-time configuration for a chart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Optional margin overrides.
    pub margin: Option<MarginOverrides>,
}

impl ChartConfig {
    /// Parses a JSON configuration object such as `{"margin": {"left": 80}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses the value of a CSS `content` property carrying a JSON configuration.
    ///
    /// `none` and the empty string mean "no configuration". Otherwise one layer of
    /// surrounding quotes is stripped, as are the backslashes some engines use to
    /// escape inner quotes, and the remainder is parsed with [`Self::from_json`].
    pub fn from_css_content(content: &str) -> Result<Self, ConfigError> {
        let content = content.trim();
        if content.is_empty() || content == "none" {
            tracing::debug!(content, "no chart configuration, using defaults");
            return Ok(Self::default());
        }
        let unquoted = strip_quotes(content);
        if unquoted.trim().is_empty() {
            tracing::debug!("empty chart configuration, using defaults");
            return Ok(Self::default());
        }
        let unescaped = unquoted.replace('\\', "");
        Self::from_json(&unescaped)
    }

    /// Returns the margins with overrides applied.
    ///
    /// An override of zero is treated as unset. Negative overrides are honoured;
    /// non-finite ones fall back to the default.
    pub fn resolved_margin(&self) -> Margin {
        let defaults = Margin::default();
        let Some(o) = self.margin else {
            return defaults;
        };
        let pick = |side: &str, v: Option<f64>, d: f64| match v {
            Some(v) if v.is_finite() && v != 0.0 => v,
            Some(v) if !v.is_finite() => {
                tracing::debug!(side, value = v, "ignoring non-finite margin override");
                d
            }
            _ => d,
        };
        Margin {
            top: pick("top", o.top, defaults.top),
            right: pick("right", o.right, defaults.right),
            bottom: pick("bottom", o.bottom, defaults.bottom),
            left: pick("left", o.left, defaults.left),
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

/// The host element a chart is attached to.
pub trait Container {
    /// Returns the size of the element's content box.
    fn content_size(&self) -> Size;
}

impl Container for Size {
    fn content_size(&self) -> Size {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let m = ChartConfig::default().resolved_margin();
        assert_eq!(m, Margin::default());
        assert_eq!((m.top, m.right, m.bottom, m.left), (10.0, 10.0, 30.0, 50.0));
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = ChartConfig::from_json(r#"{"margin": {"left": 80, "bottom": 40}}"#).unwrap();
        let m = config.resolved_margin();
        assert_eq!(m.left, 80.0);
        assert_eq!(m.bottom, 40.0);
        assert_eq!(m.top, 10.0);
        assert_eq!(m.right, 10.0);
    }

    #[test]
    fn zero_override_falls_back_to_default() {
        let config = ChartConfig::from_json(r#"{"margin": {"top": 0, "left": 0}}"#).unwrap();
        assert_eq!(config.resolved_margin(), Margin::default());
    }

    #[test]
    fn css_sentinels_mean_defaults() {
        for content in ["", "none", "  none ", "\"\"", "''"] {
            let config = ChartConfig::from_css_content(content).unwrap();
            assert_eq!(config, ChartConfig::default(), "content {content:?}");
        }
    }

    #[test]
    fn css_content_is_unquoted_and_unescaped() {
        let content = r#""{\"margin\":{\"right\":25}}""#;
        let config = ChartConfig::from_css_content(content).unwrap();
        assert_eq!(config.resolved_margin().right, 25.0);

        let single = r#"'{"margin":{"top":5}}'"#;
        let config = ChartConfig::from_css_content(single).unwrap();
        assert_eq!(config.resolved_margin().top, 5.0);
    }

    #[test]
    fn config_without_margin_is_default() {
        let config = ChartConfig::from_json(r#"{}"#).unwrap();
        assert_eq!(config.resolved_margin(), Margin::default());
    }

    #[test]
    fn unparseable_payloads_are_errors() {
        assert!(matches!(
            ChartConfig::from_css_content("\"{margin\""),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ChartConfig::from_json(r#"{"margin": {"left": "wide"}}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn negative_overrides_are_honoured() {
        let config = ChartConfig::from_json(r#"{"margin": {"left": -4}}"#).unwrap();
        assert_eq!(config.resolved_margin().left, -4.0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config =
            ChartConfig::from_json(r#"{"margin": {"middle": 4, "top": 12}, "theme": "dark"}"#)
                .unwrap();
        let m = config.resolved_margin();
        assert_eq!(m.top, 12.0);
        assert_eq!((m.right, m.bottom, m.left), (10.0, 30.0, 50.0));
    }

    #[test]
    fn non_finite_overrides_fall_back_to_defaults() {
        let config = ChartConfig {
            margin: Some(MarginOverrides {
                right: Some(f64::NAN),
                bottom: Some(f64::INFINITY),
                ..MarginOverrides::default()
            }),
        };
        assert_eq!(config.resolved_margin(), Margin::default());
    }

    #[test]
    fn size_is_a_container() {
        let size = Size::new(400.0, 300.0);
        assert_eq!(size.content_size(), size);
    }
}

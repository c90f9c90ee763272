// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke paint.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use peniko::Color;

/// Paint applied to a node's fill or stroke.
///
/// Host-supplied colors arrive as CSS color strings (`"red"`, `"#1f77b4"`) and are
/// passed through verbatim; colors chosen by chart code itself use [`Color`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Paint {
    /// No paint.
    #[default]
    None,
    /// A CSS color string, emitted as-is.
    Css(String),
    /// A solid color.
    Solid(Color),
}

impl Paint {
    /// Convenience for a CSS color string.
    pub fn css(color: impl Into<String>) -> Self {
        Self::Css(color.into())
    }

    /// Returns the CSS color string if this paint was given as one.
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Self::Css(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if this paint draws nothing.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the SVG attribute value and an optional opacity.
    pub(crate) fn svg_value(&self) -> (String, Option<f64>) {
        match self {
            Self::None => (String::from("none"), None),
            Self::Css(s) => (s.clone(), None),
            Self::Solid(color) => {
                let rgba = color.to_rgba8();
                let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
                let opacity = if rgba.a == 255 {
                    None
                } else {
                    Some(f64::from(rgba.a) / 255.0)
                };
                (value, opacity)
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Solid(value)
    }
}

impl From<&str> for Paint {
    fn from(value: &str) -> Self {
        Self::css(value)
    }
}

impl From<String> for Paint {
    fn from(value: String) -> Self {
        Self::Css(value)
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn solid_paint_emits_hex_without_opacity_when_opaque() {
        let (value, opacity) = Paint::Solid(css::BLACK).svg_value();
        assert_eq!(value, "#000000");
        assert_eq!(opacity, None);
    }

    #[test]
    fn css_paint_passes_through() {
        let (value, opacity) = Paint::css("gray").svg_value();
        assert_eq!(value, "gray");
        assert_eq!(opacity, None);
        assert_eq!(Paint::from("red").as_css(), Some("red"));
    }
}

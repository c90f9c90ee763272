// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis rendering.
//!
//! An [`AxisSpec`] renders into an existing scene group: it clears the group and
//! appends one `tick` group per tick (translated along the axis, holding a tick
//! line and a label) plus a `domain` path spanning the scale's range.
//!
//! Continuous scales tick at round values; band scales tick once per key, at the
//! centre of the band.

use std::sync::Arc;

use groupbar_core::{Node, NodeId, NodeKind, Paint, Scene, TextAnchor};
use kurbo::{Affine, BezPath, Line, Point, Vec2};
use peniko::color::palette::css;

use crate::format::format_plain;
use crate::scale::{ScaleBand, ScaleLinear};

/// Axis orientation relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis with ticks pointing up.
    Top,
    /// A horizontal axis with ticks pointing down.
    Bottom,
    /// A vertical axis with ticks pointing left.
    Left,
    /// A vertical axis with ticks pointing right.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `+1` when ticks point down/right, `-1` when they point up/left.
    fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Paint for the domain path and tick lines.
    pub rule: Paint,
    /// Stroke width for the domain path and tick lines.
    pub rule_width: f64,
    /// Paint for tick labels.
    pub label_fill: Paint,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: Paint::Solid(css::BLACK),
            rule_width: 1.0,
            label_fill: Paint::Solid(css::BLACK),
            label_font_size: 10.0,
        }
    }
}

/// The scale an axis is rendered against.
#[derive(Clone, Copy, Debug)]
pub enum AxisScale<'a> {
    /// A continuous scale; ticks at round values.
    Linear(&'a ScaleLinear),
    /// A band scale; one tick per key.
    Band(&'a ScaleBand),
}

impl AxisScale<'_> {
    fn range_extent(&self) -> (f64, f64) {
        let (r0, r1) = match self {
            Self::Linear(s) => s.range(),
            Self::Band(s) => s.range(),
        };
        (r0.min(r1), r0.max(r1))
    }
}

/// Formats a tick value into a label.
pub type TickFormatter = Arc<dyn Fn(f64) -> String>;

/// An axis renderer.
#[derive(Clone)]
pub struct AxisSpec {
    /// Axis placement.
    pub orient: AxisOrient,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Length of per-tick lines.
    pub inner_tick_size: f64,
    /// Length of the end caps of the domain path.
    pub outer_tick_size: f64,
    /// Gap between the tick line end and its label.
    pub tick_padding: f64,
    /// Optional label formatter for continuous ticks.
    pub tick_formatter: Option<TickFormatter>,
    /// Styling.
    pub style: AxisStyle,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("inner_tick_size", &self.inner_tick_size)
            .field("outer_tick_size", &self.outer_tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("style", &self.style)
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis with 10 ticks, 6px tick lines and 3px label padding.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_count: 10,
            inner_tick_size: 6.0,
            outer_tick_size: 6.0,
            tick_padding: 3.0,
            tick_formatter: None,
            style: AxisStyle::default(),
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom() -> Self {
        Self::new(AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left() -> Self {
        Self::new(AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set a custom label formatter for continuous ticks.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns `(position, label)` pairs along the axis.
    pub fn ticks(&self, scale: AxisScale<'_>) -> Vec<(f64, String)> {
        match scale {
            AxisScale::Linear(s) => s
                .ticks(self.tick_count)
                .into_iter()
                .map(|v| (s.map(v), self.format_tick(v)))
                .collect(),
            AxisScale::Band(s) => {
                let half = 0.5 * s.band_width();
                s.domain()
                    .into_iter()
                    .enumerate()
                    .map(|(i, key)| (s.start_at(i) + half, key.to_string()))
                    .collect()
            }
        }
    }

    fn format_tick(&self, v: f64) -> String {
        match &self.tick_formatter {
            Some(f) => f(v),
            None => format_plain(v),
        }
    }

    /// Replaces the contents of `group` with this axis drawn against `scale`.
    pub fn render(&self, scene: &mut Scene, group: NodeId, scale: AxisScale<'_>) {
        scene.clear_children(group);

        let sign = self.orient.sign();
        let inner = self.inner_tick_size;
        let label_offset = sign * (inner.max(0.0) + self.tick_padding);
        let horizontal = self.orient.is_horizontal();

        for (pos, label) in self.ticks(scale) {
            let (translate, tick_end, label_pos, anchor, dy) = if horizontal {
                let dy = if sign > 0.0 { 0.71 } else { 0.0 };
                (
                    Vec2::new(pos, 0.0),
                    Point::new(0.0, sign * inner),
                    Point::new(0.0, label_offset),
                    TextAnchor::Middle,
                    dy,
                )
            } else {
                let anchor = if sign < 0.0 {
                    TextAnchor::End
                } else {
                    TextAnchor::Start
                };
                (
                    Vec2::new(0.0, pos),
                    Point::new(sign * inner, 0.0),
                    Point::new(label_offset, 0.0),
                    anchor,
                    0.32,
                )
            };
            let Some(tick) = scene.append(
                group,
                Node::group()
                    .with_class("tick")
                    .with_transform(Affine::translate(translate)),
            ) else {
                return;
            };
            scene.append(
                tick,
                Node::line(
                    Line::new(Point::ZERO, tick_end),
                    self.style.rule.clone(),
                    self.style.rule_width,
                ),
            );
            let mut text = Node::text(label_pos, label, self.style.label_fill.clone())
                .with_text_layout(anchor, dy);
            if let NodeKind::Text { font_size, .. } = &mut text.kind {
                *font_size = self.style.label_font_size;
            }
            scene.append(tick, text);
        }

        let (r0, r1) = scale.range_extent();
        let outer = sign * self.outer_tick_size;
        let mut domain = BezPath::new();
        if horizontal {
            domain.move_to((r0, outer));
            domain.line_to((r0, 0.0));
            domain.line_to((r1, 0.0));
            domain.line_to((r1, outer));
        } else {
            domain.move_to((outer, r0));
            domain.line_to((0.0, r0));
            domain.line_to((0.0, r1));
            domain.line_to((outer, r1));
        }
        scene.append(
            group,
            Node::path(domain, self.style.rule.clone(), self.style.rule_width).with_class("domain"),
        );
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::format::format_si;

    fn labels(scene: &Scene, group: NodeId) -> Vec<(String, Affine)> {
        scene
            .select_all(group, "tick")
            .into_iter()
            .map(|tick| {
                let node = scene.get(tick).unwrap();
                let label = node
                    .children()
                    .iter()
                    .find_map(|c| match &scene.get(*c).unwrap().kind {
                        NodeKind::Text { text, .. } => Some(text.clone()),
                        _ => None,
                    })
                    .expect("tick without label");
                (label, node.transform)
            })
            .collect()
    }

    #[test]
    fn bottom_axis_ticks_linear_scale_with_si_labels() {
        let mut scene = Scene::new(Size::new(300.0, 100.0));
        let group = scene.append(scene.root(), Node::group()).unwrap();
        let scale = ScaleLinear::new((0.0, 2000.0), (0.0, 200.0));
        let axis = AxisSpec::bottom()
            .with_tick_count(4)
            .with_tick_formatter(|v| format_si(v, 2));

        axis.render(&mut scene, group, AxisScale::Linear(&scale));

        let got = labels(&scene, group);
        let names: Vec<&str> = got.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(names, ["0.0", "500", "1.0k", "1.5k", "2.0k"]);
        assert_eq!(got[2].1, Affine::translate((100.0, 0.0)));
    }

    #[test]
    fn left_axis_ticks_band_centres() {
        let mut scene = Scene::new(Size::new(300.0, 200.0));
        let group = scene.append(scene.root(), Node::group()).unwrap();
        let mut scale = ScaleBand::new((0.0, 100.0));
        scale.set_domain(["X", "Y"]);

        AxisSpec::left().render(&mut scene, group, AxisScale::Band(&scale));

        let got = labels(&scene, group);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].0, "X");
        assert_eq!(got[0].1, Affine::translate((0.0, 25.0)));
        assert_eq!(got[1].1, Affine::translate((0.0, 75.0)));
        assert_eq!(scene.select_all(group, "domain").len(), 1);
    }

    #[test]
    fn rerendering_replaces_previous_ticks() {
        let mut scene = Scene::new(Size::new(300.0, 100.0));
        let group = scene.append(scene.root(), Node::group()).unwrap();
        let axis = AxisSpec::bottom().with_tick_count(4);

        let wide = ScaleLinear::new((0.0, 20.0), (0.0, 200.0));
        axis.render(&mut scene, group, AxisScale::Linear(&wide));
        assert_eq!(scene.select_all(group, "tick").len(), 5);

        let empty = ScaleLinear::new((0.0, 0.0), (0.0, 200.0));
        axis.render(&mut scene, group, AxisScale::Linear(&empty));
        assert!(scene.select_all(group, "tick").is_empty());
        assert_eq!(scene.select_all(group, "domain").len(), 1);
    }
}

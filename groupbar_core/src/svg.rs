// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use kurbo::{Affine, BezPath, PathEl};

use crate::{NodeId, NodeKind, Paint, Scene, TextAnchor};

impl Scene {
    /// Serializes the scene to a standalone SVG document.
    ///
    /// Nodes are written in paint order; tooltips become `<title>` children.
    pub fn to_svg(&self) -> String {
        let size = self.size();
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            size.width, size.height
        ));
        out.push('\n');
        for child in self.get(self.root()).map(|n| n.children()).unwrap_or(&[]) {
            self.write_node(&mut out, *child, 1);
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(node) = self.get(id) else {
            return;
        };
        indent(out, depth);
        let tag = match &node.kind {
            NodeKind::Group => "g",
            NodeKind::Rect { .. } => "rect",
            NodeKind::Line { .. } => "line",
            NodeKind::Path { .. } => "path",
            NodeKind::Text { .. } => "text",
        };
        out.push('<');
        out.push_str(tag);
        if let Some(class) = &node.class {
            out.push_str(&format!(r#" class="{}""#, escape_xml(class)));
        }
        if node.transform != Affine::IDENTITY {
            out.push_str(&format!(r#" transform="{}""#, transform_attr(node.transform)));
        }

        match &node.kind {
            NodeKind::Group => {}
            NodeKind::Rect { rect, fill } => {
                out.push_str(&format!(
                    r#" x="{}" y="{}" width="{}" height="{}""#,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                ));
                write_paint_attr(out, "fill", fill);
            }
            NodeKind::Line {
                line,
                stroke,
                stroke_width,
            } => {
                out.push_str(&format!(
                    r#" x1="{}" y1="{}" x2="{}" y2="{}""#,
                    line.p0.x, line.p0.y, line.p1.x, line.p1.y
                ));
                write_paint_attr(out, "stroke", stroke);
                out.push_str(&format!(r#" stroke-width="{stroke_width}""#));
            }
            NodeKind::Path {
                path,
                fill,
                stroke,
                stroke_width,
            } => {
                out.push_str(&format!(r#" d="{}""#, path_data(path)));
                write_paint_attr(out, "fill", fill);
                if *stroke_width > 0.0 && !stroke.is_none() {
                    write_paint_attr(out, "stroke", stroke);
                    out.push_str(&format!(r#" stroke-width="{stroke_width}""#));
                }
            }
            NodeKind::Text {
                pos,
                anchor,
                dy,
                font_size,
                fill,
                ..
            } => {
                out.push_str(&format!(r#" x="{}" y="{}""#, pos.x, pos.y));
                if *dy != 0.0 {
                    out.push_str(&format!(r#" dy="{dy}em""#));
                }
                out.push_str(match anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                out.push_str(&format!(r#" font-size="{font_size}""#));
                write_paint_attr(out, "fill", fill);
            }
        }

        let text = match &node.kind {
            NodeKind::Text { text, .. } => Some(text.as_str()),
            _ => None,
        };
        if node.children().is_empty() && node.title.is_none() && text.is_none() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if let Some(text) = text {
            out.push_str(&escape_xml(text));
        }
        if let Some(title) = &node.title {
            out.push_str(&format!("<title>{}</title>", escape_xml(title)));
        }
        if !node.children().is_empty() {
            out.push('\n');
            for child in node.children() {
                self.write_node(out, *child, depth + 1);
            }
            indent(out, depth);
        }
        out.push_str(&format!("</{tag}>\n"));
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn transform_attr(t: Affine) -> String {
    let [a, b, c, d, e, f] = t.as_coeffs();
    if a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0 {
        format!("translate({e},{f})")
    } else {
        format!("matrix({a} {b} {c} {d} {e} {f})")
    }
}

fn path_data(path: &BezPath) -> String {
    let mut out = String::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.push_str(&format!("M{},{}", p.x, p.y)),
            PathEl::LineTo(p) => out.push_str(&format!("L{},{}", p.x, p.y)),
            PathEl::QuadTo(p1, p2) => {
                out.push_str(&format!("Q{},{} {},{}", p1.x, p1.y, p2.x, p2.y));
            }
            PathEl::CurveTo(p1, p2, p3) => out.push_str(&format!(
                "C{},{} {},{} {},{}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            )),
            PathEl::ClosePath => out.push('Z'),
        }
    }
    out
}

fn write_paint_attr(out: &mut String, name: &str, paint: &Paint) {
    let (value, opacity) = paint.svg_value();
    out.push_str(&format!(r#" {name}="{}""#, escape_xml(&value)));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

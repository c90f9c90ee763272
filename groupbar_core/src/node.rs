// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene nodes.

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, BezPath, Line, Point, Rect};
use smallvec::SmallVec;

use crate::Paint;

/// Stable identity for a node within a [`crate::Scene`].
///
/// Ids are allocated monotonically and never reused, so a removed node's id
/// stays dangling rather than aliasing a later node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    #[default]
    Start,
    /// Anchor at the middle of the text.
    Middle,
    /// Anchor at the end of the text.
    End,
}

/// What a node draws.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// A container for other nodes. Draws nothing itself.
    Group,
    /// An axis-aligned rectangle in local coordinates.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill paint.
        fill: Paint,
    },
    /// A straight stroked segment.
    Line {
        /// Geometry.
        line: Line,
        /// Stroke paint.
        stroke: Paint,
        /// Stroke width.
        stroke_width: f64,
    },
    /// An arbitrary path.
    Path {
        /// Geometry.
        path: BezPath,
        /// Fill paint.
        fill: Paint,
        /// Stroke paint.
        stroke: Paint,
        /// Stroke width.
        stroke_width: f64,
    },
    /// A single line of unshaped text.
    Text {
        /// Anchor position.
        pos: Point,
        /// Text content.
        text: String,
        /// Horizontal anchor.
        anchor: TextAnchor,
        /// Vertical shift in ems (SVG `dy`).
        dy: f64,
        /// Font size.
        font_size: f64,
        /// Fill paint.
        fill: Paint,
    },
}

/// A node in the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// What this node draws.
    pub kind: NodeKind,
    /// Optional class name (space separated, like SVG `class`).
    pub class: Option<String>,
    /// Transform applied to this node and its subtree.
    pub transform: Affine,
    /// Optional tooltip text (SVG `<title>` child).
    pub title: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl Node {
    /// Creates a detached node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            class: None,
            transform: Affine::IDENTITY,
            title: None,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Creates an empty group.
    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    /// Creates a filled rectangle.
    pub fn rect(rect: Rect, fill: impl Into<Paint>) -> Self {
        Self::new(NodeKind::Rect {
            rect,
            fill: fill.into(),
        })
    }

    /// Creates a stroked line.
    pub fn line(line: Line, stroke: impl Into<Paint>, stroke_width: f64) -> Self {
        Self::new(NodeKind::Line {
            line,
            stroke: stroke.into(),
            stroke_width,
        })
    }

    /// Creates an unfilled stroked path.
    pub fn path(path: BezPath, stroke: impl Into<Paint>, stroke_width: f64) -> Self {
        Self::new(NodeKind::Path {
            path,
            fill: Paint::None,
            stroke: stroke.into(),
            stroke_width,
        })
    }

    /// Creates a text node with start anchor, no shift and default font size.
    pub fn text(pos: Point, text: impl Into<String>, fill: impl Into<Paint>) -> Self {
        Self::new(NodeKind::Text {
            pos,
            text: text.into(),
            anchor: TextAnchor::Start,
            dy: 0.0,
            font_size: 10.0,
            fill: fill.into(),
        })
    }

    /// Sets the class name.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the tooltip text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets text anchor and `dy` shift. No effect on non-text nodes.
    pub fn with_text_layout(mut self, new_anchor: TextAnchor, new_dy: f64) -> Self {
        if let NodeKind::Text { anchor, dy, .. } = &mut self.kind {
            *anchor = new_anchor;
            *dy = new_dy;
        }
        self
    }

    /// Returns `true` if `class` is one of this node's space separated class names.
    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
    }

    /// Returns the parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in paint order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns local-space bounds for leaf nodes that have geometry.
    ///
    /// Text has no bounds (it is unshaped).
    pub fn local_bounds(&self) -> Option<Rect> {
        use kurbo::Shape;
        match &self.kind {
            NodeKind::Rect { rect, .. } => Some(*rect),
            NodeKind::Line { line, .. } => Some(line.bounding_box()),
            NodeKind::Path { path, .. } => Some(path.bounding_box()),
            NodeKind::Group | NodeKind::Text { .. } => None,
        }
    }
}

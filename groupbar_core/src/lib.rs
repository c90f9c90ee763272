// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal retained scene graph for chart widgets.
//!
//! The scene is a tree of [`Node`]s rooted at a single group:
//! - **Groups** carry an affine transform and a class name, and own children.
//! - **Leaves** (rects, lines, paths, text) carry geometry and paint.
//!
//! Chart code builds and rebuilds subtrees imperatively (append, remove, clear),
//! queries them by class, hit-tests them with pointer positions, and finally
//! serializes the whole tree to SVG.
//!
//! There is no layout and no text shaping here; text nodes store unshaped strings.

#![no_std]

extern crate alloc;

mod node;
mod paint;
mod scene;
mod svg;

pub use node::{Node, NodeId, NodeKind, TextAnchor};
pub use paint::Paint;
pub use scene::Scene;

// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grouped bar chart widget.

use std::cell::RefCell;
use std::rc::Rc;

use groupbar_core::{Node, NodeId, Paint, Scene};
use kurbo::{Affine, Point, Rect, Size};

use crate::axis::{AxisScale, AxisSpec};
use crate::config::{ChartConfig, Container, Margin};
use crate::data::{DataStore, FlatRow, SeriesEntry, SeriesItem, Selection, flatten_data};
use crate::format::{format_plain, format_si};
use crate::scale::{ScaleBand, ScaleLinear};

/// Context passed to the click callback alongside the clicked bar's row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickEvent {
    /// The clicked bar node.
    pub node: NodeId,
    /// Pointer position in scene space, when the click came from a pointer.
    pub position: Option<Point>,
}

/// Host callback invoked when a bar is clicked. Its return value is ignored.
///
/// Shared so that bars drawn by one redraw keep the callback that was registered
/// at that time.
pub type ClickCallback = Rc<RefCell<dyn FnMut(&FlatRow, &ClickEvent)>>;

/// A rendered bar and the row it was drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    /// The bar's rect node.
    pub node: NodeId,
    /// The data bound to the bar.
    pub row: FlatRow,
    /// Geometry in plot space.
    pub rect: Rect,
    /// Resolved fill.
    pub fill: Paint,
}

/// A horizontal grouped bar chart.
///
/// Categories run down the left axis; within a category, one bar per series
/// color sits in its own sub-band. Bar length encodes value along the bottom axis.
///
/// Mutators only touch the retained state. Nothing changes on screen until
/// [`redraw`](Self::redraw) rebuilds the axes and bars.
pub struct GroupedBarChart {
    margin: Margin,
    width: f64,
    height: f64,
    scene: Scene,
    plot: NodeId,
    x_axis_group: NodeId,
    y_axis_group: NodeId,
    x: ScaleLinear,
    y0: ScaleBand,
    y1: ScaleBand,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    data: DataStore,
    selection: Selection,
    click_callback: Option<ClickCallback>,
    bound_click: Option<ClickCallback>,
    bars: Vec<Bar>,
    unselected_fill: Paint,
}

impl core::fmt::Debug for GroupedBarChart {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupedBarChart")
            .field("margin", &self.margin)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scene", &self.scene)
            .field("plot", &self.plot)
            .field("x_axis_group", &self.x_axis_group)
            .field("y_axis_group", &self.y_axis_group)
            .field("x", &self.x)
            .field("y0", &self.y0)
            .field("y1", &self.y1)
            .field("x_axis", &self.x_axis)
            .field("y_axis", &self.y_axis)
            .field("data", &self.data)
            .field("selection", &self.selection)
            .field("click_callback", &self.click_callback.is_some())
            .field("bound_click", &self.bound_click.is_some())
            .field("bars", &self.bars)
            .field("unselected_fill", &self.unselected_fill)
            .finish()
    }
}

impl GroupedBarChart {
    /// Creates an empty chart filling `container`.
    ///
    /// The plot area is the container's content box minus the resolved margins,
    /// clamped at zero. Axis groups are created empty; call
    /// [`redraw`](Self::redraw) to populate them.
    pub fn new(container: &dyn Container, config: &ChartConfig) -> Self {
        let margin = config.resolved_margin();
        let content = container.content_size();
        let width = (content.width - margin.left - margin.right).max(0.0);
        let height = (content.height - margin.top - margin.bottom).max(0.0);

        let mut scene = Scene::new(Size::new(
            width + margin.left + margin.right,
            height + margin.top + margin.bottom,
        ));
        let root = scene.root();
        // The root of a fresh scene always accepts children.
        let plot = scene
            .append(
                root,
                Node::group().with_transform(Affine::translate((margin.left, margin.top))),
            )
            .unwrap_or(root);
        let x_axis_group = scene
            .append(
                plot,
                Node::group()
                    .with_class("x axis")
                    .with_transform(Affine::translate((0.0, height + 3.0))),
            )
            .unwrap_or(plot);
        let y_axis_group = scene
            .append(
                plot,
                Node::group()
                    .with_class("y axis")
                    .with_transform(Affine::translate((-3.0, 0.0))),
            )
            .unwrap_or(plot);

        tracing::debug!(
            width,
            height,
            top = margin.top,
            right = margin.right,
            bottom = margin.bottom,
            left = margin.left,
            "created grouped bar chart"
        );

        Self {
            margin,
            width,
            height,
            scene,
            plot,
            x_axis_group,
            y_axis_group,
            x: ScaleLinear::new((0.0, 0.0), (0.0, width)),
            y0: ScaleBand::new((0.0, height)).with_padding(0.05, 0.05),
            y1: ScaleBand::new((0.0, 0.0)),
            x_axis: AxisSpec::bottom()
                .with_tick_count(4)
                .with_tick_formatter(|v| format_si(v, 2)),
            y_axis: AxisSpec::left(),
            data: DataStore::new(),
            selection: Selection::default(),
            click_callback: None,
            bound_click: None,
            bars: Vec::new(),
            unselected_fill: Paint::css("gray"),
        }
    }

    /// Inserts or replaces the series `id`.
    ///
    /// Items are kept in iteration order under their keys. Does not redraw.
    pub fn set_data<I, K>(&mut self, id: impl Into<String>, items: I, color: impl Into<String>)
    where
        I: IntoIterator<Item = (K, SeriesItem)>,
        K: Into<String>,
    {
        let id = id.into();
        let entry = SeriesEntry {
            color: color.into(),
            data: items.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        };
        tracing::trace!(series = %id, items = entry.data.len(), color = %entry.color, "set series");
        self.data.insert(id, entry);
    }

    /// Removes the series `id`. Unknown ids are ignored. Does not redraw.
    pub fn remove_data(&mut self, id: &str) {
        let removed = self.data.remove(id).is_some();
        tracing::trace!(series = id, removed, "remove series");
    }

    /// Replaces the selection. An empty selection highlights every bar.
    pub fn set_selection(&mut self, selection: impl Into<Selection>) {
        self.selection = selection.into();
        tracing::trace!(selected = self.selection.0.len(), "set selection");
    }

    /// Registers the click callback, replacing any previous one.
    ///
    /// Bars pick up the callback when they are drawn: bars already on screen keep
    /// the one from their redraw until the next [`redraw`](Self::redraw).
    pub fn set_click_callback(&mut self, callback: impl FnMut(&FlatRow, &ClickEvent) + 'static) {
        let callback: ClickCallback = Rc::new(RefCell::new(callback));
        self.click_callback = Some(callback);
    }

    /// Flattens the current data into one row per item.
    pub fn flatten_data(&self) -> Vec<FlatRow> {
        flatten_data(&self.data)
    }

    /// Re-domains the scales from `rows` and re-renders both axes.
    ///
    /// The value domain is `[0, max value]`, or `[0, 0]` when there are no rows.
    pub fn update_axis(&mut self, rows: &[FlatRow]) {
        let max = rows.iter().map(|r| r.value).reduce(f64::max).unwrap_or(0.0);
        self.x.set_domain((0.0, max));
        self.y0.set_domain(rows.iter().map(|r| r.cat.as_str()));
        self.y1.set_domain(rows.iter().map(|r| r.color.as_str()));
        self.y1.set_range((0.0, self.y0.band_width()));

        self.x_axis
            .render(&mut self.scene, self.x_axis_group, AxisScale::Linear(&self.x));
        self.y_axis
            .render(&mut self.scene, self.y_axis_group, AxisScale::Band(&self.y0));
    }

    /// Rebuilds the axes and every bar from the current data and selection.
    pub fn redraw(&mut self) {
        let rows = self.flatten_data();
        self.update_axis(&rows);

        for id in self.scene.select_all(self.plot, "bar") {
            self.scene.remove(id);
        }
        self.bars.clear();
        self.bound_click = self.click_callback.clone();

        let bar_height = self.y1.band_width();
        for row in rows {
            let y = self.y0.start(&row.cat).unwrap_or(0.0) + self.y1.start(&row.color).unwrap_or(0.0);
            let rect = Rect::new(0.0, y, self.x.map(row.value), y + bar_height);
            let fill = if self.selection.highlights(&row.addr) {
                Paint::css(row.color.as_str())
            } else {
                self.unselected_fill.clone()
            };
            let node = Node::rect(rect, fill.clone())
                .with_class("bar")
                .with_title(format_plain(row.value));
            let Some(node) = self.scene.append(self.plot, node) else {
                continue;
            };
            self.bars.push(Bar {
                node,
                row,
                rect,
                fill,
            });
        }

        tracing::debug!(
            bars = self.bars.len(),
            categories = self.y0.count(),
            series = self.y1.count(),
            max_value = self.x.domain().1,
            "redrew grouped bar chart"
        );
    }

    /// Dispatches a click at `point` (scene space) to the bar under it.
    ///
    /// Returns `true` if a bar was hit, whether or not a callback is bound.
    pub fn click_at(&mut self, point: Point) -> bool {
        let Some(node) = self.scene.hit_test(point, Some("bar")) else {
            return false;
        };
        self.dispatch_click(ClickEvent {
            node,
            position: Some(point),
        })
    }

    /// Dispatches a click to the bar drawn by `node`.
    ///
    /// Returns `false` if `node` is not a current bar.
    pub fn click_bar(&mut self, node: NodeId) -> bool {
        self.dispatch_click(ClickEvent {
            node,
            position: None,
        })
    }

    fn dispatch_click(&mut self, event: ClickEvent) -> bool {
        let Some(bar) = self.bars.iter().find(|b| b.node == event.node) else {
            return false;
        };
        tracing::trace!(addr = %bar.row.addr, cat = %bar.row.cat, "bar clicked");
        if let Some(callback) = &self.bound_click
            && let Ok(mut callback) = callback.try_borrow_mut()
        {
            (&mut *callback)(&bar.row, &event);
        }
        true
    }

    /// Returns the tooltip of the bar under `point` (scene space).
    pub fn hover_at(&self, point: Point) -> Option<&str> {
        let node = self.scene.hit_test(point, Some("bar"))?;
        self.scene.get(node)?.title.as_deref()
    }

    /// Returns the bars drawn by the last redraw, in row order.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Returns the retained scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the plot group holding the axes and bars.
    pub fn plot(&self) -> NodeId {
        self.plot
    }

    /// Returns the group the value axis renders into.
    pub fn x_axis_group(&self) -> NodeId {
        self.x_axis_group
    }

    /// Returns the group the category axis renders into.
    pub fn y_axis_group(&self) -> NodeId {
        self.y_axis_group
    }

    /// Returns the series data.
    pub fn data(&self) -> &DataStore {
        &self.data
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the resolved margins.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Returns the plot area size (content box minus margins).
    pub fn plot_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the value scale domain.
    pub fn value_domain(&self) -> (f64, f64) {
        self.x.domain()
    }

    /// Returns the category keys, top to bottom.
    pub fn category_domain(&self) -> Vec<&str> {
        self.y0.domain()
    }

    /// Returns the series colors in sub-band order.
    pub fn series_domain(&self) -> Vec<&str> {
        self.y1.domain()
    }

    /// Serializes the scene to an SVG document.
    pub fn to_svg(&self) -> String {
        self.scene.to_svg()
    }
}

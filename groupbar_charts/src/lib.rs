// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A grouped bar chart widget on top of `groupbar_core`.
//!
//! [`GroupedBarChart`] keeps series data and a selection, and on
//! [`redraw`](GroupedBarChart::redraw) rebuilds into its retained scene:
//! - a bottom **value axis** (linear scale, SI-formatted ticks),
//! - a left **category axis** (rounded band scale),
//! - one **bar** per item, placed in its category band and its series' sub-band,
//!   grayed out when a non-empty selection does not contain it.
//!
//! Bars carry their value as a tooltip. Pointer input is forwarded by the host
//! through [`GroupedBarChart::click_at`] and [`GroupedBarChart::hover_at`].
//!
//! ```
//! use groupbar_charts::{ChartConfig, GroupedBarChart, SeriesItem};
//! use kurbo::Size;
//!
//! let mut chart = GroupedBarChart::new(&Size::new(400.0, 200.0), &ChartConfig::default());
//! chart.set_data("s1", [("k1", SeriesItem::new("a1", "X", 10.0))], "red");
//! chart.set_data("s2", [("k1", SeriesItem::new("a2", "X", 20.0))], "blue");
//! chart.redraw();
//! assert_eq!(chart.bars().len(), 2);
//! assert_eq!(chart.series_domain(), ["red", "blue"]);
//! ```

mod axis;
mod config;
mod data;
mod error;
mod format;
mod scale;
mod widget;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle, TickFormatter};
pub use config::{ChartConfig, Container, Margin, MarginOverrides};
pub use data::{DataStore, FlatRow, Selection, SeriesEntry, SeriesItem, flatten_data};
pub use error::ConfigError;
pub use format::{format_plain, format_si};
pub use scale::{ScaleBand, ScaleLinear};
pub use widget::{Bar, ClickCallback, ClickEvent, GroupedBarChart};

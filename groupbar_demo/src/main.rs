// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a grouped bar chart to SVG.
//!
//! Without `--data`, a small built-in dataset is used. The chart is drawn once,
//! a click and a hover are simulated on the first bar, and the SVG is written to
//! `--output`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use groupbar_charts::{
    ChartConfig, DataStore, GroupedBarChart, SeriesEntry, SeriesItem, Selection,
};
use kurbo::{Size, Vec2};
use tracing_subscriber::EnvFilter;

/// Grouped bar chart SVG renderer
#[derive(Parser, Debug)]
#[command(name = "groupbar-demo")]
#[command(version)]
struct Args {
    /// SVG file to write
    #[arg(short, long, default_value = "groupbar_demo.svg")]
    output: PathBuf,

    /// Container width in pixels
    #[arg(long, default_value_t = 480.0)]
    width: f64,

    /// Container height in pixels
    #[arg(long, default_value_t = 260.0)]
    height: f64,

    /// Chart configuration as a CSS `content` value, e.g. '"{\"margin\":{\"left\":80}}"'
    #[arg(long)]
    config: Option<String>,

    /// JSON file of series keyed by id: {"s1": {"color": "red", "data": {...}}}
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Comma separated item addrs to highlight
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(content) => ChartConfig::from_css_content(content).context("parsing --config")?,
        None => ChartConfig::default(),
    };
    let mut chart = GroupedBarChart::new(&Size::new(args.width, args.height), &config);

    let store = match &args.data {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<DataStore>(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => sample_data(),
    };
    for (id, entry) in store.iter() {
        chart.set_data(id, entry.data.clone(), entry.color.as_str());
    }

    chart.set_selection(Selection(args.select));
    chart.set_click_callback(|row, event| {
        tracing::info!(
            addr = %row.addr,
            cat = %row.cat,
            color = %row.color,
            value = row.value,
            node = event.node.0,
            "clicked bar"
        );
    });
    chart.redraw();

    if let Some(bar) = chart.bars().first() {
        let margin = chart.margin();
        let center = bar.rect.center() + Vec2::new(margin.left, margin.top);
        chart.click_at(center);
        if let Some(tooltip) = chart.hover_at(center) {
            tracing::info!(tooltip, "hovered bar");
        }
    }

    std::fs::write(&args.output, chart.to_svg())
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(
        bars = chart.bars().len(),
        path = %args.output.display(),
        "wrote chart"
    );
    Ok(())
}

fn sample_data() -> DataStore {
    let mut store = DataStore::new();
    let quarters = [
        ("north", "#4c78a8", [120.0, 340.0, 910.0]),
        ("south", "#f58518", [480.0, 150.0, 1320.0]),
        ("west", "#54a24b", [260.0, 720.0, 640.0]),
    ];
    for (region, color, values) in quarters {
        let mut entry = SeriesEntry {
            color: color.to_string(),
            ..SeriesEntry::default()
        };
        for (cat, value) in ["Q1", "Q2", "Q3"].into_iter().zip(values) {
            entry.data.insert(
                cat.to_string(),
                SeriesItem::new(format!("{region}-{cat}"), cat, value),
            );
        }
        store.insert(region, entry);
    }
    store
}

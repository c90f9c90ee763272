// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! Both scales are mutable in place: the chart owns one instance of each and
//! re-domains them on every redraw.

use indexmap::IndexSet;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Replaces the domain.
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns round tick values inside the domain, aiming for about `count` ticks.
    ///
    /// The step is a power of ten times 1, 2 or 5. An empty or degenerate domain has no ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        let span = max - min;
        if count == 0 || !span.is_finite() || span <= 0.0 {
            return Vec::new();
        }
        let step = tick_step(span, count);
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }
        let first = (min / step).ceil();
        let last = (max / step).floor();
        if last < first {
            return Vec::new();
        }
        // Steps below one are applied as divisions by an integer to keep
        // decimal ticks like 0.3 exact.
        let inv = (1.0 / step).round();
        let exact_inverse = step < 1.0 && ((1.0 / step) - inv).abs() < 1e-9;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "non-negative integral value capped at 10k"
        )]
        let n = (last - first).min(10_000.0) as u32;
        (0..=n)
            .map(|i| {
                let k = first + f64::from(i);
                if exact_inverse { k / inv } else { k * step }
            })
            .collect()
    }
}

fn tick_step(span: f64, count: usize) -> f64 {
    let target = span / count as f64;
    let mut step = 10_f64.powf(target.log10().floor());
    let err = count as f64 / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

/// A discrete band scale over string keys, with bands snapped to whole pixels.
///
/// The domain keeps first-encounter order and ignores repeated keys. Layout follows
/// the usual rounded-band rule: the step is floored to an integer, the leftover
/// span is split evenly on both sides, and the band width is the rounded
/// `step * (1 - padding)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    domain: IndexSet<String>,
    range: (f64, f64),
    padding: f64,
    outer_padding: f64,
    first: f64,
    step: f64,
    band_width: f64,
}

impl ScaleBand {
    /// Creates an empty band scale over `range` with no padding.
    pub fn new(range: (f64, f64)) -> Self {
        let mut out = Self {
            domain: IndexSet::new(),
            range,
            padding: 0.0,
            outer_padding: 0.0,
            first: 0.0,
            step: 0.0,
            band_width: 0.0,
        };
        out.rescale();
        out
    }

    /// Sets inner and outer padding as fractions of a step.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding = inner.clamp(0.0, 1.0);
        self.outer_padding = outer.max(0.0);
        self.rescale();
        self
    }

    /// Replaces the domain. Repeated keys keep their first position.
    pub fn set_domain<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain.clear();
        for k in keys {
            self.domain.insert(k.into());
        }
        self.rescale();
    }

    /// Replaces the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
        self.rescale();
    }

    /// Returns the domain keys in band order.
    pub fn domain(&self) -> Vec<&str> {
        self.domain.iter().map(String::as_str).collect()
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.domain.len()
    }

    /// Returns the band width.
    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    /// Returns the start of the band for `key`, or `None` if `key` is not in the domain.
    pub fn start(&self, key: &str) -> Option<f64> {
        let index = self.domain.get_index_of(key)?;
        Some(self.start_at(index))
    }

    /// Returns the start of the band at `index`.
    pub fn start_at(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let slot = if r1 < r0 {
            self.count().saturating_sub(index + 1)
        } else {
            index
        };
        self.first + self.step * slot as f64
    }

    fn rescale(&mut self) {
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let n = self.count() as f64;
        let denom = n - self.padding + 2.0 * self.outer_padding;
        if n == 0.0 || denom <= 0.0 {
            self.first = start;
            self.step = 0.0;
            self.band_width = 0.0;
            return;
        }
        let step = ((stop - start) / denom).floor().max(0.0);
        let error = stop - start - (n - self.padding) * step;
        self.first = start + round_half_up(error / 2.0);
        self.step = step;
        self.band_width = round_half_up(step * (1.0 - self.padding));
    }
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints_and_degenerate_domain() {
        let s = ScaleLinear::new((0.0, 20.0), (0.0, 200.0));
        assert!((s.map(10.0) - 100.0).abs() < 1e-9);
        assert!((s.map(20.0) - 200.0).abs() < 1e-9);

        let flat = ScaleLinear::new((0.0, 0.0), (0.0, 200.0));
        assert_eq!(flat.map(0.0), 0.0);
        assert_eq!(flat.map(5.0), 0.0);
    }

    #[test]
    fn linear_ticks_stay_inside_the_domain() {
        let s = ScaleLinear::new((0.0, 20.0), (0.0, 1.0));
        assert_eq!(s.ticks(4), vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let s = ScaleLinear::new((0.0, 37.0), (0.0, 1.0));
        assert_eq!(s.ticks(4), vec![0.0, 10.0, 20.0, 30.0]);

        let s = ScaleLinear::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(s.ticks(4), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn linear_ticks_for_empty_domain_are_empty() {
        let s = ScaleLinear::new((0.0, 0.0), (0.0, 1.0));
        assert!(s.ticks(4).is_empty());
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 1.0));
        assert!(s.ticks(0).is_empty());
    }

    #[test]
    fn band_domain_dedups_in_encounter_order() {
        let mut s = ScaleBand::new((0.0, 100.0));
        s.set_domain(["b", "a", "b", "c", "a"]);
        assert_eq!(s.domain(), vec!["b", "a", "c"]);
        assert_eq!(s.start("z"), None);
    }

    #[test]
    fn rounded_bands_with_padding() {
        let mut s = ScaleBand::new((0.0, 160.0)).with_padding(0.05, 0.05);
        s.set_domain(["X", "Y"]);
        // step = floor(160 / (2 - 0.05 + 0.1)) = 78; error = 160 - 1.95 * 78 = 7.9
        assert_eq!(s.start("X"), Some(4.0));
        assert_eq!(s.start("Y"), Some(82.0));
        assert_eq!(s.band_width(), 74.0);
    }

    #[test]
    fn rounded_bands_without_padding_split_leftover() {
        let mut s = ScaleBand::new((0.0, 155.0));
        s.set_domain(["red", "blue"]);
        // step = 77, leftover = 1 => offset round(0.5) = 1
        assert_eq!(s.start("red"), Some(1.0));
        assert_eq!(s.start("blue"), Some(78.0));
        assert_eq!(s.band_width(), 77.0);
    }

    #[test]
    fn bands_do_not_overlap() {
        let mut s = ScaleBand::new((0.0, 333.0)).with_padding(0.05, 0.05);
        s.set_domain(["a", "b", "c", "d", "e"]);
        for i in 1..s.count() {
            assert!(
                s.start_at(i - 1) + s.band_width() <= s.start_at(i),
                "band {i} overlaps its predecessor"
            );
        }
        assert!(s.start_at(s.count() - 1) + s.band_width() <= 333.0);
    }

    #[test]
    fn empty_band_scale_is_degenerate() {
        let s = ScaleBand::new((0.0, 100.0)).with_padding(0.05, 0.05);
        assert_eq!(s.count(), 0);
        assert_eq!(s.band_width(), 0.0);
    }

    #[test]
    fn reversed_range_flips_band_order() {
        let mut s = ScaleBand::new((100.0, 0.0));
        s.set_domain(["a", "b"]);
        assert_eq!(s.start("a"), Some(50.0));
        assert_eq!(s.start("b"), Some(0.0));
    }
}

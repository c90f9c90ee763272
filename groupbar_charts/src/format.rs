// Copyright 2025 the Groupbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Formats `value` with `digits` significant digits and an SI prefix (`1500 -> "1.5k"`).
///
/// The prefix is picked after rounding, so values that round up across a power of
/// a thousand move to the next prefix (`999.7 -> "1.0k"`). Trailing zeros are kept
/// up to the requested precision (`5 -> "5.0"`), and large integral parts are
/// never truncated (`500 -> "500"`).
pub fn format_si(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let p = i32::try_from(digits.max(1)).unwrap_or(i32::MAX);
    let sign = if value < 0.0 { "-" } else { "" };
    let v = value.abs();

    let exponent = if v == 0.0 {
        0
    } else {
        let rounded = round_to(v, precision(v, p));
        let e = 1 + to_i32((rounded.log10() + 1e-12).floor());
        ((e - 1).div_euclid(3) * 3).clamp(-24, 24)
    };
    let scaled = if exponent >= 0 {
        v / 10_f64.powi(exponent)
    } else {
        v * 10_f64.powi(-exponent)
    };
    let prefix_index = usize::try_from(8 + exponent / 3).unwrap_or(8);
    let prefix = SI_PREFIXES.get(prefix_index).copied().unwrap_or("");

    let rounded = round_to(scaled, precision(scaled, p));
    let decimals = precision(rounded * (1.0 + 1e-15), p).clamp(0, 20);
    let decimals = usize::try_from(decimals).unwrap_or(0);
    format!("{sign}{rounded:.decimals$}{prefix}")
}

/// Number of decimal places that keeps `p` significant digits of `x` (may be negative).
fn precision(x: f64, p: i32) -> i32 {
    if x == 0.0 {
        p - 1
    } else {
        p - to_i32(x.log10().ceil())
    }
}

fn round_to(x: f64, decimals: i32) -> f64 {
    if decimals == 0 {
        return x.round();
    }
    let k = 10_f64.powi(decimals);
    (x * k).round() / k
}

fn to_i32(x: f64) -> i32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite logarithms of f64 values fit comfortably in i32"
    )]
    {
        x.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

/// Formats a number the way a plain text tooltip shows it: shortest round-trip form.
///
/// Magnitudes below `1e-6` or from `1e21` up switch to exponent notation with an
/// explicit exponent sign (`1e+21`, `1.5e-7`). Zero is always `"0"` and infinities
/// are spelled out (`"Infinity"`).
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-Infinity" } else { "Infinity" });
    }
    let magnitude = value.abs();
    if value.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => format!("{mantissa}e+{e}"),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn si_two_digits_matches_short_form() {
        assert_eq!(format_si(0.0, 2), "0.0");
        assert_eq!(format_si(5.0, 2), "5.0");
        assert_eq!(format_si(10.0, 2), "10");
        assert_eq!(format_si(20.0, 2), "20");
        assert_eq!(format_si(500.0, 2), "500");
        assert_eq!(format_si(1500.0, 2), "1.5k");
        assert_eq!(format_si(2_000_000.0, 2), "2.0M");
    }

    #[test]
    fn si_rounding_can_carry_into_the_next_prefix() {
        assert_eq!(format_si(999.7, 2), "1.0k");
    }

    #[test]
    fn si_small_and_negative_values() {
        assert_eq!(format_si(0.5, 2), "500m");
        assert_eq!(format_si(-1500.0, 2), "-1.5k");
        assert_eq!(format_si(0.0025, 2), "2.5m");
    }

    #[test]
    fn si_values_below_one_use_milli() {
        assert_eq!(format_si(0.1, 2), "100m");
        assert_eq!(format_si(0.25, 2), "250m");
        assert_eq!(format_si(0.01, 2), "10m");
        assert_eq!(format_si(1.0, 2), "1.0");
        assert_eq!(format_si(0.999_7, 2), "1.0");
    }

    #[test]
    fn plain_format_drops_integral_fraction() {
        assert_eq!(format_plain(10.0), "10");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(0.000_001), "0.000001");
    }

    #[test]
    fn plain_format_uses_exponents_at_extremes() {
        assert_eq!(format_plain(1e21), "1e+21");
        assert_eq!(format_plain(1.5e21), "1.5e+21");
        assert_eq!(format_plain(-2e22), "-2e+22");
        assert_eq!(format_plain(1e-7), "1e-7");
        assert_eq!(format_plain(1.5e-7), "1.5e-7");
        assert_eq!(format_plain(f64::INFINITY), "Infinity");
        assert_eq!(format_plain(f64::NEG_INFINITY), "-Infinity");
    }
}

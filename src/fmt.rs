//! Display formatting and sample validation.
//!
//! Rust's core float-to-decimal formatting has had wasm-facing panics in
//! some toolchain/browser combinations, so the fixed-point helpers here do
//! **not** use `format!` on floats: finite values are scaled + rounded into
//! an `i64`, then formatted as integers. `NaN`/`±Inf` are handled
//! explicitly, never silently coerced to zero.

use crate::wire::LiveData;

/// Upper bound accepted for a power reading, in watts. Readings outside
/// `[0, MAX_PLAUSIBLE_POWER_W]` are displayed raw but never recorded.
pub const MAX_PLAUSIBLE_POWER_W: f64 = 2000.0;

/// `HH:MM:SS`, floored to whole seconds. Hours are unbounded (a 25-hour
/// session reads `25:00:00`, not wrapped at 24).
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// `"<int> W"`. A missing reading collapses to `"0 W"`.
pub fn format_power(power: Option<f64>) -> String {
    format!("{} W", fmt_f64_fixed(power.unwrap_or(0.0), 0))
}

/// `"<int> RPM"`. A missing reading collapses to `"0 RPM"`.
pub fn format_cadence(cadence: Option<f64>) -> String {
    format!("{} RPM", fmt_f64_fixed(cadence.unwrap_or(0.0), 0))
}

/// `"<float, 1 decimal> km/h"`. A missing reading collapses to `"0.0 km/h"`.
pub fn format_speed(speed: Option<f64>) -> String {
    format!("{} km/h", fmt_f64_fixed(speed.unwrap_or(0.0), 1))
}

/// True iff the payload carries a power reading inside the plausible range.
/// `NaN` fails the range check. Cadence and speed are display-only and are
/// deliberately not range-checked here.
pub fn validate_sample(data: Option<&LiveData>) -> bool {
    match data.and_then(|d| d.power) {
        Some(p) => (0.0..=MAX_PLAUSIBLE_POWER_W).contains(&p),
        None => false,
    }
}

/// Mean of the slice; `0.0` for empty input so display code never
/// special-cases emptiness.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Maximum of the slice; `0.0` for empty input.
pub fn max_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Minimum of the slice; `0.0` for empty input.
pub fn min_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn fmt_f64_fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "NaN".to_string()
        } else if v.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }

    // Clamp decimals to something reasonable to avoid huge powers.
    let decimals = decimals.min(9);

    let scale_i64 = 10_i64.checked_pow(decimals as u32).unwrap_or(1_i64);
    let scale_f = scale_i64 as f64;

    // Scale + round into an integer.
    let scaled = (v * scale_f).round();
    if !scaled.is_finite() || scaled.abs() > (i64::MAX as f64) {
        return if v.is_sign_negative() {
            "-Inf".to_string()
        } else {
            "Inf".to_string()
        };
    }

    let scaled_i = scaled as i64;
    let negative = scaled_i < 0;
    let abs_i = scaled_i.abs();
    let int_part = abs_i / scale_i64;
    let frac_part = abs_i % scale_i64;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if decimals > 0 {
        out.push('.');
        let frac_str = frac_part.to_string();
        for _ in 0..decimals.saturating_sub(frac_str.len()) {
            out.push('0');
        }
        out.push_str(&frac_str);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(power: Option<f64>) -> LiveData {
        LiveData {
            power,
            ..LiveData::default()
        }
    }

    #[test]
    fn duration_is_zero_padded_and_unbounded() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(3661.9), "01:01:01");
        assert_eq!(format_duration(90_000.0), "25:00:00");
        assert_eq!(format_duration(f64::NAN), "00:00:00");
    }

    #[test]
    fn power_formatting_defaults_missing_readings() {
        assert_eq!(format_power(None), "0 W");
        assert_eq!(format_power(Some(0.0)), "0 W");
        assert_eq!(format_power(Some(250.0)), "250 W");
        assert_eq!(format_power(Some(f64::NAN)), "NaN W");
    }

    #[test]
    fn cadence_and_speed_formatting() {
        assert_eq!(format_cadence(None), "0 RPM");
        assert_eq!(format_cadence(Some(92.0)), "92 RPM");
        assert_eq!(format_speed(Some(32.0)), "32.0 km/h");
        assert_eq!(format_speed(Some(32.25)), "32.3 km/h");
        assert_eq!(format_speed(None), "0.0 km/h");
    }

    #[test]
    fn sample_validation_checks_power_range_only() {
        assert!(validate_sample(Some(&live(Some(0.0)))));
        assert!(validate_sample(Some(&live(Some(2000.0)))));
        assert!(!validate_sample(Some(&live(Some(2001.0)))));
        assert!(!validate_sample(Some(&live(Some(-1.0)))));
        assert!(!validate_sample(Some(&live(Some(f64::NAN)))));
        assert!(!validate_sample(Some(&live(None))));
        assert!(!validate_sample(None));
    }

    #[test]
    fn empty_statistics_are_zero_not_errors() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(max_of(&[]), 0.0);
        assert_eq!(min_of(&[]), 0.0);
        assert_eq!(average(&[10.0, 20.0, 30.0]), 20.0);
        assert_eq!(max_of(&[10.0, 20.0, 30.0]), 30.0);
        assert_eq!(min_of(&[10.0, 20.0, 30.0]), 10.0);
    }

    #[test]
    fn fixed_point_formatting_handles_non_finite() {
        assert_eq!(fmt_f64_fixed(1.05, 1), "1.1");
        assert_eq!(fmt_f64_fixed(-0.25, 1), "-0.3");
        assert_eq!(fmt_f64_fixed(f64::INFINITY, 2), "Inf");
        assert_eq!(fmt_f64_fixed(f64::NEG_INFINITY, 0), "-Inf");
    }
}

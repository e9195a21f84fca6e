//! # Shared Utility Functions
//!
//! Display helpers used by the client screens.
//!
//! ## Number Formatting
//!
//! - [`format_fixed`] - Fixed precision with `"N/A"` for missing values
//! - [`format_function_string`] - Generator-style `f(x) = ...` string for a set of sinusoids
//!
//! ## Input Parsing
//!
//! - [`parse_x_values`] - Parse a comma-separated list of x values
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_fixed, parse_x_values};
//!
//! assert_eq!(format_fixed(Some(0.000412), 6), "0.000412");
//! assert_eq!(format_fixed(None, 6), "N/A");
//! assert_eq!(parse_x_values("1, 2.5,abc, 4"), vec![1.0, 2.5, 4.0]);
//! ```

use crate::dto::generator::Sinusoid;

/// Stored analyses allowed per account.
pub const MAX_ANALYSES_PER_USER: u32 = 50;

/// File name used when an analysis has no uploaded file.
pub const DEFAULT_DOWNLOAD_NAME: &str = "analysis_data.csv";

/// Format `value` with `digits` decimals, or `"N/A"` when absent.
///
/// Non-finite values are also shown as `"N/A"`.
pub fn format_fixed(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.digits$}"),
        _ => "N/A".to_string(),
    }
}

/// Parse a comma-separated list of numbers, skipping entries that don't parse.
///
/// # Examples
///
/// ```rust
/// use shared::utils::parse_x_values;
///
/// assert_eq!(parse_x_values("3"), vec![3.0]);
/// assert!(parse_x_values(" , x").is_empty());
/// ```
pub fn parse_x_values(input: &str) -> Vec<f64> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Build the generator's readable function string.
///
/// # Examples
///
/// ```rust
/// use shared::dto::generator::Sinusoid;
/// use shared::utils::format_function_string;
///
/// let s = format_function_string(&[Sinusoid(1.0, 0.1, 0.0), Sinusoid(0.5, 0.2, 1.0)], 2.0);
/// assert_eq!(
///     s,
///     "f(x) = 1.000 * sin(2π * 0.100 * x + 0.000) + 0.500 * sin(2π * 0.200 * x + 1.000) + 2.000"
/// );
/// ```
pub fn format_function_string(sinusoids: &[Sinusoid], offset: f64) -> String {
    let terms: Vec<String> = sinusoids
        .iter()
        .map(|s| format!("{:.3} * sin(2π * {:.3} * x + {:.3})", s.0, s.1, s.2))
        .collect();

    let mut out = format!("f(x) = {}", terms.join(" + "));
    if offset != 0.0 {
        out.push_str(&format!(" + {offset:.3}"));
    }
    out
}

/// Download name for an analysis' uploaded file: the last URL path segment.
///
/// # Examples
///
/// ```rust
/// use shared::utils::download_file_name;
///
/// assert_eq!(download_file_name(Some("http://host/media/uploads/run.csv?sig=1")), "run.csv");
/// assert_eq!(download_file_name(None), "analysis_data.csv");
/// ```
pub fn download_file_name(uploaded_file: Option<&str>) -> String {
    uploaded_file
        .map(|url| url.split(['?', '#']).next().unwrap_or(url))
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

/// Share of the analysis quota used, rounded down.
pub fn quota_percent(total: u32, quota: u32) -> u32 {
    if quota == 0 {
        return 0;
    }
    ((u64::from(total) * 100) / u64::from(quota)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(Some(1.23456), 3), "1.235");
        assert_eq!(format_fixed(Some(2.0), 0), "2");
        assert_eq!(format_fixed(Some(f64::NAN), 3), "N/A");
        assert_eq!(format_fixed(None, 3), "N/A");
    }

    #[test]
    fn test_parse_x_values_skips_invalid() {
        assert_eq!(parse_x_values("1,2,3"), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_x_values("-1.5, nan, 1e2"), vec![-1.5, 100.0]);
        assert!(parse_x_values("").is_empty());
    }

    #[test]
    fn test_function_string_without_offset() {
        let s = format_function_string(&[Sinusoid(0.3, 0.05, 0.0)], 0.0);
        assert_eq!(s, "f(x) = 0.300 * sin(2π * 0.050 * x + 0.000)");
    }

    #[test]
    fn test_download_file_name_edge_cases() {
        assert_eq!(download_file_name(Some("")), DEFAULT_DOWNLOAD_NAME);
        assert_eq!(download_file_name(Some("http://host/media/")), DEFAULT_DOWNLOAD_NAME);
        assert_eq!(download_file_name(Some("data.csv")), "data.csv");
    }

    #[test]
    fn test_quota_percent() {
        assert_eq!(quota_percent(5, MAX_ANALYSES_PER_USER), 10);
        assert_eq!(quota_percent(49, MAX_ANALYSES_PER_USER), 98);
        assert_eq!(quota_percent(3, 0), 0);
    }
}

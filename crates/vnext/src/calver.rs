//! CalVer Calculator (spec component I).
//!
//! Produces calendar-shaped versions from a date and a configured format.

use chrono::{Datelike, IsoWeek, NaiveDate};

use crate::Version;

/// Recognized CalVer format heads (spec §4.I).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalVerFormat {
    #[default]
    YyyyMm,
    YyyyZeroMm,
    YyZeroMm,
    YyyyWw,
}

#[derive(Debug, Clone)]
pub struct CalVerConfig {
    pub format: CalVerFormat,
    pub separator: String,
    pub reset_patch_periodically: bool,
}

impl Default for CalVerConfig {
    fn default() -> CalVerConfig {
        CalVerConfig {
            format: CalVerFormat::default(),
            separator: ".".to_string(),
            reset_patch_periodically: true,
        }
    }
}

/// The (major, minor) pair a date maps to under a given format.
fn date_series(date: NaiveDate, format: CalVerFormat) -> (u32, u32) {
    match format {
        CalVerFormat::YyyyMm | CalVerFormat::YyyyZeroMm => (date.year() as u32, date.month()),
        CalVerFormat::YyZeroMm => ((date.year() as u32) % 100, date.month()),
        CalVerFormat::YyyyWw => {
            let week: IsoWeek = date.iso_week();
            (week.year() as u32, week.week())
        }
    }
}

/// Compute the next CalVer version from `date`, the prior version (if
/// any), and the configured format (spec §4.I).
pub(crate) fn calculate(date: NaiveDate, previous: Option<&Version>, cfg: &CalVerConfig) -> Version {
    let (major, minor) = date_series(date, cfg.format);

    let patch = match previous {
        None => 0,
        Some(prev) => {
            let same_series = prev.major == major && prev.minor == minor;
            if !same_series && cfg.reset_patch_periodically {
                0
            } else if same_series {
                prev.patch
            } else {
                prev.patch + 1
            }
        }
    };

    Version::new(major, minor, patch)
}

/// Format a CalVer version with the configured separator. `YyyyMm` leaves
/// the month unpadded; every other format zero-pads it to two digits.
pub(crate) fn format(version: &Version, cfg: &CalVerConfig) -> String {
    match cfg.format {
        CalVerFormat::YyyyMm => format!(
            "{}{}{}{}{}",
            version.major, cfg.separator, version.minor, cfg.separator, version.patch
        ),
        CalVerFormat::YyyyZeroMm | CalVerFormat::YyZeroMm | CalVerFormat::YyyyWw => format!(
            "{}{}{:02}{}{}",
            version.major, cfg.separator, version.minor, cfg.separator, version.patch
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_series_resets_patch_when_configured() {
        let cfg = CalVerConfig::default();
        let prev = Version::new(2026, 6, 3);
        let next = calculate(date(2026, 7, 1), Some(&prev), &cfg);
        assert_eq!((next.major, next.minor, next.patch), (2026, 7, 0));
    }

    #[test]
    fn same_series_keeps_prior_patch() {
        let cfg = CalVerConfig::default();
        let prev = Version::new(2026, 7, 3);
        let next = calculate(date(2026, 7, 15), Some(&prev), &cfg);
        assert_eq!(next.patch, 3);
    }

    #[test]
    fn new_series_without_reset_increments_patch() {
        let cfg = CalVerConfig {
            reset_patch_periodically: false,
            ..CalVerConfig::default()
        };
        let prev = Version::new(2026, 6, 3);
        let next = calculate(date(2026, 7, 1), Some(&prev), &cfg);
        assert_eq!((next.major, next.minor, next.patch), (2026, 7, 4));
    }

    #[rstest]
    #[case::yyyy_mm(CalVerFormat::YyyyMm, "2026.7.0")]
    #[case::yyyy_zero_mm(CalVerFormat::YyyyZeroMm, "2026.07.0")]
    #[case::yy_zero_mm(CalVerFormat::YyZeroMm, "26.07.0")]
    fn formats(#[case] format_kind: CalVerFormat, #[case] expected: &str) {
        let cfg = CalVerConfig {
            format: format_kind,
            ..CalVerConfig::default()
        };
        let version = calculate(date(2026, 7, 1), None, &cfg);
        assert_eq!(format(&version, &cfg), expected);
    }

    #[test]
    fn week_format_uses_iso_week_number() {
        let cfg = CalVerConfig {
            format: CalVerFormat::YyyyWw,
            ..CalVerConfig::default()
        };
        let version = calculate(date(2026, 1, 1), None, &cfg);
        assert_eq!(version.major, 2026);
        assert!(version.minor >= 1);
    }
}

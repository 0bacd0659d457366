//! Decoded weather elements
//!
//! Each element is built from the named captures of one
//! pattern match. Wind, visibility, pressure, and temperature
//! are merged: a later match overwrites only the fields it
//! actually captured. Sky and weather conditions are
//! accumulated into lists instead.

mod pressure;
mod sky;
mod temperature;
mod visibility;
mod weather;
mod wind;

pub use pressure::Pressure;
pub use sky::{CloudType, SkyCondition, SkyCover};
pub use temperature::Temperature;
pub use visibility::{Visibility, VisibilityQualifier};
pub use weather::{Descriptor, Intensity, WeatherCondition};
pub use wind::{compass_point, Wind, WindDirection};

pub(crate) use wind::knots_to_mph;

use regex::Captures;

// Text of a named capture, if it participated in the match
pub(crate) fn captured<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

/// Format a measurement with at most two decimal places
///
/// Trailing zeros are dropped, so `6.0` formats as `6`
/// and `0.50` as `0.5`.
pub(crate) fn format_measure(value: f64) -> String {
    let out = format!("{:.2}", value);
    if out.contains('.') {
        out.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_measure() {
        assert_eq!("6", format_measure(6.0));
        assert_eq!("0.5", format_measure(0.5));
        assert_eq!("0.25", format_measure(0.25));
        assert_eq!("9.66", format_measure(9.656064));
        assert_eq!("10", format_measure(10.0));
        assert_eq!("0", format_measure(0.0));
    }
}

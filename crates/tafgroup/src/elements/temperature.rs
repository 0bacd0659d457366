//! Temperature and dew point

use regex::Captures;

use super::captured;

/// Temperature and dew point, in whole degrees Celsius
///
/// Negative values are written with a leading `M`, as in
/// `M05/M10`. Temperatures are kept on the group but are
/// not part of the narrative.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Temperature {
    celsius: Option<i16>,
    dew_point: Option<i16>,
}

impl Temperature {
    /// Merge the captures of one temperature match
    ///
    /// Recognized capture names are `temp` and `dewpt`.
    pub fn merge(&mut self, caps: &Captures<'_>) {
        if let Some(temp) = captured(caps, "temp").and_then(parse_celsius) {
            self.celsius = Some(temp);
        }
        if let Some(dewpt) = captured(caps, "dewpt").and_then(parse_celsius) {
            self.dew_point = Some(dewpt);
        }
    }

    /// Air temperature, in degrees Celsius
    pub fn celsius(&self) -> Option<i16> {
        self.celsius
    }

    /// Dew point, in degrees Celsius
    pub fn dew_point_celsius(&self) -> Option<i16> {
        self.dew_point
    }

    /// Air temperature, in degrees Fahrenheit
    pub fn fahrenheit(&self) -> Option<f64> {
        self.celsius.map(|c| f64::from(c) * 9.0 / 5.0 + 32.0)
    }
}

fn parse_celsius(text: &str) -> Option<i16> {
    match text.strip_prefix('M') {
        Some(neg) => neg.parse::<i16>().ok().map(|v| -v),
        None => text.parse().ok(),
    }
}

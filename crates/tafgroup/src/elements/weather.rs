//! Present and forecast weather

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use regex::Captures;
use strum::EnumMessage;

use super::captured;

/// Phenomenon code which means "no significant weather"
const NO_SIGNIFICANT_WEATHER: &str = "NSW";

/// Weather intensity or proximity
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
pub enum Intensity {
    /// Light
    #[strum(serialize = "-", detailed_message = "Light")]
    Light,

    /// Heavy
    #[strum(serialize = "+", detailed_message = "Heavy")]
    Heavy,

    /// Between 5 and 10 statute miles from the station
    #[strum(serialize = "VC", detailed_message = "In the vicinity")]
    Vicinity,
}

impl Intensity {
    /// Human-readable string
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().unwrap_or_default()
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Weather descriptor
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
pub enum Descriptor {
    #[strum(serialize = "MI", detailed_message = "Shallow")]
    Shallow,

    #[strum(serialize = "PR", detailed_message = "Partial")]
    Partial,

    #[strum(serialize = "BC", detailed_message = "Patches")]
    Patches,

    #[strum(serialize = "DR", detailed_message = "Low drifting")]
    LowDrifting,

    #[strum(serialize = "BL", detailed_message = "Blowing")]
    Blowing,

    #[strum(serialize = "SH", detailed_message = "Showers")]
    Showers,

    #[strum(serialize = "TS", detailed_message = "Thunderstorm")]
    Thunderstorm,

    #[strum(serialize = "FZ", detailed_message = "Freezing")]
    Freezing,
}

impl Descriptor {
    /// Human-readable string
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().unwrap_or_default()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Human-readable text for a two-letter phenomenon code
pub(crate) fn phenomenon_label(code: &str) -> Option<&'static str> {
    PHENOMENA.get(code).copied()
}

/// One reported weather condition, like `-SHRA` or `VCTS`
///
/// Phenomena are two-letter codes which may be stacked, as
/// in `RASN`. The special code `NSW` reports the end of
/// significant weather.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WeatherCondition {
    intensity: Option<Intensity>,
    descriptor: Option<Descriptor>,
    phenomena: Vec<&'static str>,
    no_significant_weather: bool,
    text: String,
}

impl WeatherCondition {
    /// Build from the captures of one present weather match
    ///
    /// Recognized capture names are `intensity`, `descriptor`,
    /// and `phenomena`.
    pub fn from_captures(caps: &Captures<'_>) -> Self {
        let text = caps
            .get(0)
            .map(|m| m.as_str().trim())
            .unwrap_or_default()
            .to_owned();

        let phen = captured(caps, "phenomena").unwrap_or_default();
        let no_significant_weather = phen == NO_SIGNIFICANT_WEATHER;
        let phenomena = if no_significant_weather {
            vec![]
        } else {
            phen.as_bytes()
                .chunks(2)
                .filter_map(|code| std::str::from_utf8(code).ok())
                .filter_map(phenomenon_label)
                .collect()
        };

        Self {
            intensity: captured(caps, "intensity").and_then(|i| Intensity::from_str(i).ok()),
            descriptor: captured(caps, "descriptor").and_then(|d| Descriptor::from_str(d).ok()),
            phenomena,
            no_significant_weather,
            text,
        }
    }

    /// Intensity or proximity
    pub fn intensity(&self) -> Option<Intensity> {
        self.intensity
    }

    /// Descriptor
    pub fn descriptor(&self) -> Option<Descriptor> {
        self.descriptor
    }

    /// Human-readable phenomena, in report order
    pub fn phenomena(&self) -> &[&'static str] {
        &self.phenomena
    }

    /// True for `NSW`
    pub fn is_no_significant_weather(&self) -> bool {
        self.no_significant_weather
    }

    /// Human-readable description of this condition
    ///
    /// Words are joined in report order: intensity, then
    /// descriptor, then phenomena. The first word keeps its
    /// capital letter and the remaining words are lowercase.
    /// A condition with no recognized codes is labeled with
    /// its report text.
    pub fn label(&self) -> String {
        if self.no_significant_weather {
            return "No significant weather".to_owned();
        }

        let words: Vec<&str> = self
            .intensity
            .map(|i| i.as_display_str())
            .into_iter()
            .chain(self.descriptor.map(|d| d.as_display_str()))
            .chain(self.phenomena.iter().copied())
            .collect();

        if words.is_empty() {
            return self.text.clone();
        }

        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i == 0 {
                    (*word).to_owned()
                } else {
                    word.to_lowercase()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// Two-letter weather phenomena
static PHENOMENA: phf::Map<&'static str, &'static str> = phf_map! {
    // precipitation
    "DZ" => "Drizzle",
    "RA" => "Rain",
    "SN" => "Snow",
    "SG" => "Snow grains",
    "IC" => "Ice crystals",
    "PL" => "Ice pellets",
    "GR" => "Hail",
    "GS" => "Small hail",
    "UP" => "Unknown precipitation",

    // obscuration
    "BR" => "Mist",
    "FG" => "Fog",
    "FU" => "Smoke",
    "VA" => "Volcanic ash",
    "DU" => "Widespread dust",
    "SA" => "Sand",
    "HZ" => "Haze",
    "PY" => "Spray",

    // other
    "PO" => "Dust whirls",
    "SQ" => "Squalls",
    "FC" => "Funnel cloud",
    "SS" => "Sandstorm",
    "DS" => "Duststorm",
};

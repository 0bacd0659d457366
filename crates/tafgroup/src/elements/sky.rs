//! Cloud layers and sky cover

use std::fmt;
use std::str::FromStr;

use regex::Captures;
use strum::EnumMessage;

use super::captured;

/// Amount of sky covered by a cloud layer
///
/// Converting to string via `.as_ref()` yields the report
/// code. The human-readable text is available via
/// [`as_display_str()`](SkyCover::as_display_str).
///
/// ```
/// use tafgroup::SkyCover;
///
/// assert_eq!("BKN", SkyCover::Broken.as_ref());
/// assert_eq!("Broken clouds", SkyCover::Broken.as_display_str());
/// ```
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
pub enum SkyCover {
    /// Sky obscured; height is vertical visibility
    #[strum(serialize = "VV", detailed_message = "Vertical visibility")]
    VerticalVisibility,

    /// Sky clear (manual observation)
    #[strum(serialize = "SKC", detailed_message = "Sky clear")]
    SkyClear,

    /// No clouds below 12000 feet (automated observation)
    #[strum(serialize = "CLR", detailed_message = "Clear")]
    Clear,

    /// 1/8 to 2/8 coverage
    #[strum(serialize = "FEW", detailed_message = "Few clouds")]
    Few,

    /// 3/8 to 4/8 coverage
    #[strum(serialize = "SCT", detailed_message = "Scattered clouds")]
    Scattered,

    /// 5/8 to 7/8 coverage
    #[strum(serialize = "BKN", detailed_message = "Broken clouds")]
    Broken,

    /// Full coverage
    #[strum(serialize = "OVC", detailed_message = "Overcast")]
    Overcast,

    /// No significant clouds
    #[strum(serialize = "NSC", detailed_message = "No significant clouds")]
    NoSignificantClouds,

    /// No clouds detected (automated observation)
    #[strum(serialize = "NCD", detailed_message = "No clouds detected")]
    NoCloudsDetected,
}

impl SkyCover {
    /// Human-readable string
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().unwrap_or_default()
    }
}

impl AsRef<str> for SkyCover {
    fn as_ref(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for SkyCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Significant convective cloud type
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
pub enum CloudType {
    /// Cumulonimbus
    #[strum(serialize = "CB", detailed_message = "Cumulonimbus")]
    Cumulonimbus,

    /// Towering cumulus
    #[strum(serialize = "TCU", detailed_message = "Towering cumulus")]
    ToweringCumulus,
}

impl CloudType {
    /// Human-readable string
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().unwrap_or_default()
    }
}

impl AsRef<str> for CloudType {
    fn as_ref(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// One reported cloud layer
///
/// Layer heights are reported in hundreds of feet above
/// ground level. A layer which could not be understood keeps
/// its report text, which is used as its label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SkyCondition {
    cover: Option<SkyCover>,
    height_feet: Option<u32>,
    cloud: Option<CloudType>,
    text: String,
}

impl SkyCondition {
    /// Build from the captures of one sky condition match
    ///
    /// Recognized capture names are `cover`, `height`, and
    /// `cloud`.
    pub fn from_captures(caps: &Captures<'_>) -> Self {
        let text = caps
            .get(0)
            .map(|m| m.as_str().trim())
            .unwrap_or_default()
            .to_owned();

        Self {
            cover: captured(caps, "cover").and_then(|c| SkyCover::from_str(c).ok()),
            height_feet: captured(caps, "height")
                .and_then(|h| h.parse::<u32>().ok())
                .map(|h| h * 100),
            cloud: captured(caps, "cloud").and_then(|c| CloudType::from_str(c).ok()),
            text,
        }
    }

    /// Sky cover
    pub fn cover(&self) -> Option<SkyCover> {
        self.cover
    }

    /// Layer height, in feet
    pub fn height_feet(&self) -> Option<u32> {
        self.height_feet
    }

    /// Convective cloud type
    pub fn cloud(&self) -> Option<CloudType> {
        self.cloud
    }

    /// Human-readable description of this layer
    ///
    /// ```
    /// # use regex::Regex;
    /// use tafgroup::SkyCondition;
    ///
    /// # let re = Regex::new(r"^(?P<cover>SCT)(?P<height>\d{3})(?P<cloud>CB)").unwrap();
    /// let layer = SkyCondition::from_captures(&re.captures("SCT030CB").unwrap());
    /// assert_eq!("Scattered clouds at 3000 feet (Cumulonimbus)", layer.label());
    /// ```
    pub fn label(&self) -> String {
        let Some(cover) = self.cover else {
            return self.text.clone();
        };

        let mut out = match (cover, self.height_feet) {
            (SkyCover::VerticalVisibility, Some(height)) => format!("{} {} feet", cover, height),
            (_, Some(height)) => format!("{} at {} feet", cover, height),
            (_, None) => cover.to_string(),
        };

        if let Some(cloud) = self.cloud {
            out.push_str(&format!(" ({})", cloud));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use regex::Regex;
    use strum::IntoEnumIterator;

    fn sky_re() -> Regex {
        Regex::new(r"^(?P<cover>VV|SKC|CLR|FEW|SCT|BKN|OVC|NSC|NCD)(?P<height>\d{3}|///)?(?P<cloud>CB|TCU|///)?")
            .unwrap()
    }

    #[test]
    fn test_codes() {
        for cover in SkyCover::iter() {
            assert!(!cover.as_display_str().is_empty());
            assert_eq!(Ok(cover), SkyCover::from_str(cover.as_ref()));
        }
        for cloud in CloudType::iter() {
            assert!(!cloud.as_display_str().is_empty());
            assert_eq!(Ok(cloud), CloudType::from_str(cloud.as_ref()));
        }
    }

    #[test]
    fn test_label() {
        let re = sky_re();

        let layer = SkyCondition::from_captures(&re.captures("BKN015").unwrap());
        assert_eq!(Some(SkyCover::Broken), layer.cover());
        assert_eq!(Some(1500), layer.height_feet());
        assert_eq!(None, layer.cloud());
        assert_eq!("Broken clouds at 1500 feet", layer.label());

        let layer = SkyCondition::from_captures(&re.captures("OVC008TCU").unwrap());
        assert_eq!("Overcast at 800 feet (Towering cumulus)", layer.label());

        let layer = SkyCondition::from_captures(&re.captures("VV002").unwrap());
        assert_eq!("Vertical visibility 200 feet", layer.label());

        let layer = SkyCondition::from_captures(&re.captures("SKC").unwrap());
        assert_eq!("Sky clear", layer.label());

        // missing height
        let layer = SkyCondition::from_captures(&re.captures("BKN///").unwrap());
        assert_eq!("Broken clouds", layer.label());
    }

    #[test]
    fn test_label_fallback() {
        let re = Regex::new(r"^\S+").unwrap();
        let layer = SkyCondition::from_captures(&re.captures("XYZ123").unwrap());
        assert_eq!(None, layer.cover());
        assert_eq!("XYZ123", layer.label());
    }
}

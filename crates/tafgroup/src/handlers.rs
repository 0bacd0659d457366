//! Pattern tables
//!
//! A [`PatternTable`] is an ordered list of [`Handler`]s. Each
//! handler pairs a regular expression with a [`HandlerTag`],
//! which selects what a match does to the group being decoded.
//! Order is priority: the decoder always applies the first
//! handler, from the top, which matches.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use strum::EnumMessage;
use thiserror::Error;

/// Invalid pattern table entry
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PatternErr {
    /// Regular expression did not compile
    #[error("invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Handler tag is not one of the known tags
    #[error("unknown handler tag \"{0}\"")]
    UnknownTag(String),

    /// Regular expression lacks a capture group the tag needs
    #[error("pattern for \"{tag}\" must have a capture group named \"{group}\"")]
    MissingCapture {
        /// Handler tag
        tag: &'static str,

        /// Name of the missing capture group
        group: &'static str,
    },
}

/// What a match does to the group being decoded
///
/// Converting to string via `.as_ref()` yields the tag's
/// name, which is also accepted by `from_str()`.
///
/// ```
/// use std::str::FromStr;
/// use tafgroup::HandlerTag;
///
/// assert_eq!(HandlerTag::ValidPeriod, HandlerTag::from_str("valtmper").unwrap());
/// assert_eq!("nosigchng", HandlerTag::NoSignificantChange.as_ref());
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
pub enum HandlerTag {
    /// Validity period `DDHH/DDHH`
    ///
    /// Requires captures `bvaltime` and `evaltime`.
    #[strum(serialize = "valtmper", detailed_message = "Validity period")]
    ValidPeriod,

    /// Surface wind
    #[strum(serialize = "wind", detailed_message = "Wind")]
    Wind,

    /// Prevailing visibility
    #[strum(serialize = "visibility", detailed_message = "Visibility")]
    Visibility,

    /// Runway visual range (consumed, not recorded)
    #[strum(serialize = "runway", detailed_message = "Runway visual range")]
    Runway,

    /// Present or forecast weather
    #[strum(serialize = "presentweather", detailed_message = "Weather")]
    PresentWeather,

    /// Cloud layer
    #[strum(serialize = "skycondition", detailed_message = "Sky condition")]
    SkyCondition,

    /// Temperature and dew point
    #[strum(serialize = "tempdewpoint", detailed_message = "Temperature")]
    TempDewPoint,

    /// Altimeter setting
    #[strum(serialize = "altimeter", detailed_message = "Pressure")]
    Altimeter,

    /// No significant change (consumed, not recorded)
    #[strum(serialize = "nosigchng", detailed_message = "No significant change")]
    NoSignificantChange,

    /// Anything else
    #[strum(serialize = "unparsed", detailed_message = "Unparsed")]
    Unparsed,
}

impl HandlerTag {
    /// Human-readable string
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().unwrap_or_default()
    }

    // Capture groups which a pattern for this tag must define
    fn required_captures(&self) -> &'static [&'static str] {
        match self {
            HandlerTag::ValidPeriod => &["bvaltime", "evaltime"],
            _ => &[],
        }
    }
}

impl AsRef<str> for HandlerTag {
    fn as_ref(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for HandlerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

/// One pattern table entry
///
/// When `continuation` is set, the decoder keeps applying this
/// handler to the remaining text for as long as it matches
/// before returning to the top of the table. This lets one
/// table entry consume repeated elements like multiple cloud
/// layers.
#[derive(Clone, Debug)]
pub struct Handler {
    pattern: Regex,
    tag: HandlerTag,
    continuation: bool,
}

impl Handler {
    /// Compile a new handler
    ///
    /// Fails if `pattern` is not a valid regular expression or
    /// if it lacks a capture group which the `tag` requires.
    pub fn new(pattern: &str, tag: HandlerTag, continuation: bool) -> Result<Self, PatternErr> {
        Self::from_regex(Regex::new(pattern)?, tag, continuation)
    }

    /// Wrap an existing regular expression
    pub fn from_regex(
        pattern: Regex,
        tag: HandlerTag,
        continuation: bool,
    ) -> Result<Self, PatternErr> {
        for &group in tag.required_captures() {
            if !pattern.capture_names().any(|name| name == Some(group)) {
                return Err(PatternErr::MissingCapture {
                    tag: tag.into(),
                    group,
                });
            }
        }

        Ok(Self {
            pattern,
            tag,
            continuation,
        })
    }

    /// Regular expression
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Handler tag
    pub fn tag(&self) -> HandlerTag {
        self.tag
    }

    /// True if the handler repeats while it matches
    pub fn continuation(&self) -> bool {
        self.continuation
    }
}

/// Ordered table of handlers
///
/// Insertion order is priority order. The table used for
/// forecast change groups is available via
/// [`PatternTable::change_group()`]. Custom tables are built
/// up with [`with_handler()`](PatternTable::with_handler):
///
/// ```
/// use tafgroup::{HandlerTag, PatternTable};
///
/// let mut table = PatternTable::new();
/// table
///     .with_handler(r"^(?P<bvaltime>\d{4})/(?P<evaltime>\d{4})\s*", "valtmper", true)
///     .unwrap()
///     .with_handler(r"^\S+\s*", "unparsed", false)
///     .unwrap();
///
/// assert_eq!(2, table.len());
/// assert_eq!(HandlerTag::ValidPeriod, table.iter().next().unwrap().tag());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PatternTable {
    handlers: Vec<Handler>,
}

impl PatternTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard table for TAF change groups and METAR bodies
    ///
    /// In priority order:
    ///
    /// | Tag              | Repeats | Example          |
    /// |------------------|---------|------------------|
    /// | `valtmper`       | no      | `1918/2018`      |
    /// | `wind`           | no      | `21010G20KT`     |
    /// | `visibility`     | no      | `P6SM`, `9999`   |
    /// | `runway`         | yes     | `R24/P6000FT`    |
    /// | `presentweather` | yes     | `-SHRA`          |
    /// | `skycondition`   | yes     | `BKN030CB`       |
    /// | `tempdewpoint`   | no      | `M05/M10`        |
    /// | `altimeter`      | no      | `A2992`, `Q1013` |
    /// | `nosigchng`      | no      | `NOSIG`          |
    /// | `unparsed`       | no      | anything else    |
    ///
    /// Every pattern is anchored at the start of the text and
    /// consumes the whitespace which follows it.
    pub fn change_group() -> Self {
        CHANGE_GROUP.clone()
    }

    /// Append a handler by tag name
    ///
    /// The `tag` must be one of the names accepted by
    /// [`HandlerTag::from_str()`].
    pub fn with_handler(
        &mut self,
        pattern: &str,
        tag: &str,
        continuation: bool,
    ) -> Result<&mut Self, PatternErr> {
        let tag = HandlerTag::from_str(tag).map_err(|_| PatternErr::UnknownTag(tag.to_owned()))?;
        self.push(Handler::new(pattern, tag, continuation)?);
        Ok(self)
    }

    /// Append a compiled handler
    pub fn push(&mut self, handler: Handler) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Iterate handlers in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, Handler> {
        self.handlers.iter()
    }

    /// Number of handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if there are no handlers
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternTable {
    type Item = &'a Handler;
    type IntoIter = std::slice::Iter<'a, Handler>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// (pattern, tag, continuation) for the standard table
const CHANGE_GROUP_ENTRIES: &[(&str, HandlerTag, bool)] = &[
    (
        r"^(?P<bvaltime>\d{4})/(?P<evaltime>\d{4})(?:\s+|$)",
        HandlerTag::ValidPeriod,
        false,
    ),
    (
        r"^(?P<dir>\d{3}|VRB|///)(?P<speed>\d{2,3}|//)(?:G(?P<gust>\d{2,3}))?(?P<units>KT|MPS|KMH)(?:\s+(?P<varfrom>\d{3})V(?P<varto>\d{3}))?(?:\s+|$)",
        HandlerTag::Wind,
        false,
    ),
    (
        r"^(?:(?P<cavok>CAVOK)|(?P<modifier>[PM])?(?P<miles>\d{1,2} \d/\d{1,2}|\d/\d{1,2}|\d{1,2})SM|(?P<meters>\d{4})(?:NDV)?)(?:\s+|$)",
        HandlerTag::Visibility,
        false,
    ),
    (
        r"^R(?P<runway>\d{2}[LRC]?)/(?P<range>[MP]?\d{4}(?:V[MP]?\d{4})?)(?P<unit>FT)?(?:/?(?P<trend>[UDN]))?(?:\s+|$)",
        HandlerTag::Runway,
        true,
    ),
    (
        r"^(?P<intensity>[-+]|VC)?(?P<descriptor>MI|PR|BC|DR|BL|SH|TS|FZ)?(?P<phenomena>NSW|(?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|BR|FG|FU|VA|DU|SA|HZ|PY|PO|SQ|FC|SS|DS)+)?(?:\s+|$)",
        HandlerTag::PresentWeather,
        true,
    ),
    (
        r"^(?P<cover>VV|SKC|CLR|FEW|SCT|BKN|OVC|NSC|NCD)(?P<height>\d{3}|///)?(?P<cloud>CB|TCU|///)?(?:\s+|$)",
        HandlerTag::SkyCondition,
        true,
    ),
    (
        r"^(?P<temp>M?\d{2})/(?P<dewpt>M?\d{2})?(?:\s+|$)",
        HandlerTag::TempDewPoint,
        false,
    ),
    (
        r"^(?P<unit>[AQ])(?P<pressure>\d{4}|////)(?:\s+|$)",
        HandlerTag::Altimeter,
        false,
    ),
    (
        r"^(?P<nosig>NOSIG)(?:\s+|$)",
        HandlerTag::NoSignificantChange,
        false,
    ),
    (
        r"^(?P<unparsed>\S+)(?:\s+|$)",
        HandlerTag::Unparsed,
        false,
    ),
];

lazy_static! {
    static ref CHANGE_GROUP: PatternTable = {
        let mut table = PatternTable::new();
        for (pattern, tag, continuation) in CHANGE_GROUP_ENTRIES {
            table.push(Handler::new(pattern, *tag, *continuation).expect("bad change group regexp"));
        }
        table
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    // First handler in the standard table which matches
    fn first_match(text: &str) -> Option<HandlerTag> {
        PatternTable::change_group()
            .iter()
            .find(|hdl| hdl.pattern().is_match(text))
            .map(|hdl| hdl.tag())
    }

    #[test]
    fn test_tag_names() {
        for tag in HandlerTag::iter() {
            assert_eq!(Ok(tag), HandlerTag::from_str(tag.as_ref()));
            assert!(!tag.as_display_str().is_empty());
        }
        assert!(HandlerTag::from_str("bogus").is_err());
    }

    #[test]
    fn test_change_group_order() {
        let table = PatternTable::change_group();
        let tags: Vec<&'static str> = table.iter().map(|hdl| hdl.tag().into()).collect();
        assert_eq!(
            vec![
                "valtmper",
                "wind",
                "visibility",
                "runway",
                "presentweather",
                "skycondition",
                "tempdewpoint",
                "altimeter",
                "nosigchng",
                "unparsed"
            ],
            tags
        );

        let repeats: Vec<bool> = table.iter().map(|hdl| hdl.continuation()).collect();
        assert_eq!(
            vec![false, false, false, true, true, true, false, false, false, false],
            repeats
        );
    }

    #[test]
    fn test_change_group_classify() {
        assert_eq!(Some(HandlerTag::ValidPeriod), first_match("1918/2018 "));
        assert_eq!(Some(HandlerTag::Wind), first_match("21010G20KT "));
        assert_eq!(Some(HandlerTag::Wind), first_match("VRB03KT"));
        assert_eq!(Some(HandlerTag::Wind), first_match("/////KT"));
        assert_eq!(Some(HandlerTag::Wind), first_match("24005MPS 210V270"));
        assert_eq!(Some(HandlerTag::Visibility), first_match("P6SM "));
        assert_eq!(Some(HandlerTag::Visibility), first_match("1 1/2SM"));
        assert_eq!(Some(HandlerTag::Visibility), first_match("9999 "));
        assert_eq!(Some(HandlerTag::Visibility), first_match("CAVOK"));
        assert_eq!(Some(HandlerTag::Runway), first_match("R24/P6000FT "));
        assert_eq!(Some(HandlerTag::Runway), first_match("R09L/1200V2000FT/U"));
        assert_eq!(Some(HandlerTag::PresentWeather), first_match("-SHRA "));
        assert_eq!(Some(HandlerTag::PresentWeather), first_match("VCTS"));
        assert_eq!(Some(HandlerTag::PresentWeather), first_match("NSW"));
        assert_eq!(Some(HandlerTag::SkyCondition), first_match("BKN030CB "));
        assert_eq!(Some(HandlerTag::SkyCondition), first_match("SKC"));
        assert_eq!(Some(HandlerTag::TempDewPoint), first_match("M05/M10 "));
        assert_eq!(Some(HandlerTag::Altimeter), first_match("A2992"));
        assert_eq!(Some(HandlerTag::Altimeter), first_match("Q1013 "));
        assert_eq!(Some(HandlerTag::NoSignificantChange), first_match("NOSIG"));
        assert_eq!(Some(HandlerTag::Unparsed), first_match("WS020/18040KT "));
        assert_eq!(Some(HandlerTag::Unparsed), first_match("XYZ"));
    }

    #[test]
    fn test_with_handler() {
        let mut table = PatternTable::new();
        assert!(table.is_empty());

        table
            .with_handler(r"^\S+", "unparsed", false)
            .expect("valid handler");
        assert_eq!(1, table.len());

        assert!(matches!(
            table.with_handler(r"^(", "unparsed", false),
            Err(PatternErr::InvalidRegex(_))
        ));
        assert!(matches!(
            table.with_handler(r"^\S+", "nope", false),
            Err(PatternErr::UnknownTag(_))
        ));
        assert_eq!(
            Err(PatternErr::MissingCapture {
                tag: "valtmper",
                group: "evaltime"
            }),
            table
                .with_handler(r"^(?P<bvaltime>\d{4})", "valtmper", false)
                .map(|_| ())
        );
        assert_eq!(1, table.len());
    }
}

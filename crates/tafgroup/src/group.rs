//! Decoded change group

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use regex::Captures;

use crate::calendar::DateContext;
use crate::elements::{
    captured, Pressure, SkyCondition, Temperature, Visibility, WeatherCondition, Wind,
};
use crate::handlers::HandlerTag;

/// Everything decoded from one change group
///
/// A `GroupState` starts out empty and is filled in, one
/// pattern match at a time, by the decoder. The scalar
/// elements are created on first use and merged afterwards.
/// Sky and weather conditions accumulate in report order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupState {
    wind: Option<Wind>,
    visibility: Option<Visibility>,
    temperature: Option<Temperature>,
    pressure: Option<Pressure>,
    sky_conditions: Vec<(usize, String)>,
    weather: Vec<String>,
    valid_from: Option<DateTime<Utc>>,
    valid_to: Option<DateTime<Utc>>,
    unparsed: Vec<String>,
}

impl GroupState {
    /// Empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface wind
    pub fn wind(&self) -> Option<&Wind> {
        self.wind.as_ref()
    }

    /// Prevailing visibility
    pub fn visibility(&self) -> Option<&Visibility> {
        self.visibility.as_ref()
    }

    /// Temperature and dew point
    pub fn temperature(&self) -> Option<&Temperature> {
        self.temperature.as_ref()
    }

    /// Altimeter setting
    pub fn pressure(&self) -> Option<&Pressure> {
        self.pressure.as_ref()
    }

    /// Cloud layers as `(sequence, label)` pairs
    ///
    /// Sequence numbers start at one and follow report order.
    pub fn sky_conditions(&self) -> &[(usize, String)] {
        &self.sky_conditions
    }

    /// Weather condition labels, in report order
    pub fn weather_phenomena(&self) -> &[String] {
        &self.weather
    }

    /// Start of the validity window
    pub fn valid_from(&self) -> Option<DateTime<Utc>> {
        self.valid_from
    }

    /// End of the validity window
    pub fn valid_to(&self) -> Option<DateTime<Utc>> {
        self.valid_to
    }

    /// Report text which no pattern understood
    pub fn unparsed_fragments(&self) -> &[String] {
        &self.unparsed
    }

    /// Set the start of validity from a `DDHHMM` code
    ///
    /// Used by `FMddhhmm` groups, where the start time is part
    /// of the keyword. Errors are logged and leave the start
    /// time as it was.
    pub fn set_valid_from_daytime(&mut self, daytime: &str, ctx: &DateContext<'_>) {
        match ctx.resolve_daytime(daytime) {
            Ok(when) => self.valid_from = Some(when),
            Err(err) => error!("group: FM time \"{}\": {}", daytime, err),
        }
    }

    /// Apply one match
    ///
    /// `caps` are the captures of a non-empty match of a
    /// pattern with the given `tag`.
    pub(crate) fn apply(&mut self, tag: HandlerTag, caps: &Captures<'_>, ctx: &DateContext<'_>) {
        match tag {
            HandlerTag::ValidPeriod => self.apply_valid_period(caps, ctx),
            HandlerTag::Wind => self.wind.get_or_insert_with(Wind::default).merge(caps),
            HandlerTag::Visibility => self
                .visibility
                .get_or_insert_with(Visibility::default)
                .merge(caps),
            HandlerTag::TempDewPoint => self
                .temperature
                .get_or_insert_with(Temperature::default)
                .merge(caps),
            HandlerTag::Altimeter => self
                .pressure
                .get_or_insert_with(Pressure::default)
                .merge(caps),
            HandlerTag::SkyCondition => {
                let seq = self.sky_conditions.len() + 1;
                let label = SkyCondition::from_captures(caps).label();
                debug!("group: sky condition {}: {}", seq, label);
                self.sky_conditions.push((seq, label));
            }
            HandlerTag::PresentWeather => {
                let label = WeatherCondition::from_captures(caps).label();
                debug!("group: weather: {}", label);
                self.weather.push(label);
            }
            HandlerTag::Unparsed => {
                // the named capture is kept verbatim; a bare match
                // loses its separators
                let text = match captured(caps, "unparsed") {
                    Some(raw) => raw,
                    None => caps.get(0).map_or("", |m| m.as_str().trim()),
                };
                self.unparsed.push(text.to_owned());
            }
            HandlerTag::Runway | HandlerTag::NoSignificantChange => {
                debug!("group: ignoring {}", tag.as_display_str());
            }
        }
    }

    // Both ends must be present. Each end is resolved on its own,
    // and one that fails keeps its previous value.
    fn apply_valid_period(&mut self, caps: &Captures<'_>, ctx: &DateContext<'_>) {
        let (Some(begin), Some(end)) = (captured(caps, "bvaltime"), captured(caps, "evaltime"))
        else {
            warn!(
                "group: incomplete validity period \"{}\"; ignoring",
                caps.get(0).map_or("", |m| m.as_str().trim())
            );
            return;
        };

        match ctx.resolve_dayhour(begin) {
            Ok(when) => self.valid_from = Some(when),
            Err(err) => error!("group: validity begins \"{}\": {}", begin, err),
        }

        match ctx.resolve_dayhour(end) {
            Ok(when) => self.valid_to = Some(when),
            Err(err) => error!("group: validity ends \"{}\": {}", end, err),
        }
    }
}

//! # tafgroup: Forecast Change Group Decoding
//!
//! This crate decodes the *change groups* of aviation weather
//! forecasts (TAF) into plain-language narratives. The same
//! machinery also decodes the body of routine observations
//! (METAR).
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate has not been certified for flight planning or for any
//! other purpose. Always consult an official weather briefing before
//! flight.
//!
//! ## Example
//!
//! A TAF is divided into groups by keywords like `TEMPO`. The text
//! which follows the keyword is passed to the decoder method for that
//! keyword, together with the month and year in which the forecast
//! was issued:
//!
//! ```
//! use tafgroup::ChangeGroupDecoderBuilder;
//!
//! let decoder = ChangeGroupDecoderBuilder::new().build();
//!
//! let narrative = decoder
//!     .prob("PROB30", "1918/2018 21015G25KT 3SM -SHRA BKN030CB", "06", "2025")
//!     .expect("bad probability");
//!
//! assert!(narrative.starts_with(
//!     "30% PROBABILITY from 2025-06-19 18:00:00 UTC to 2025-06-20 18:00:00 UTC"
//! ));
//! assert!(narrative.contains("Wind speed : 17 mph, 15 knots"));
//! assert!(narrative.contains("Value: Broken clouds at 3000 feet (Cumulonimbus)"));
//! ```
//!
//! If you already have the keyword as a string, identify it with
//! [`Variant::parse()`] and decode with
//! [`ChangeGroupDecoder::decode_variant()`].
//!
//! ## Decoding
//!
//! Decoding is driven by a [`PatternTable`]: an ordered list of
//! regular expressions, each tagged with what a match means. The
//! decoder repeatedly finds the first pattern, from the top of the
//! table, which matches the remaining text. The match is applied to
//! a [`GroupState`] and then cut out of the text. Decoding ends when
//! the text is used up or when nothing matches. See [`decode()`].
//!
//! The standard table ends with a catch-all, so any text which is
//! not understood is kept and reported as "unparsed." Decoding a
//! change group never fails.
//!
//! ## Dates
//!
//! Reports only give the day of the month and the time of day. The
//! month and year are supplied by the caller and combined by a
//! [`DateResolver`]. A day/time which cannot be resolved is logged
//! and left unset.
//!
//! ## Crate features
//!
//! This crate logs through the [`log`](https://docs.rs/log) facade.
//! Enable a logger to see what each pattern matched.

mod builder;
mod calendar;
mod decoder;
mod elements;
mod group;
mod handlers;
mod lexicon;
mod render;
mod variant;

pub use builder::ChangeGroupDecoderBuilder;
pub use calendar::{valid_to_from_fields, DateContext, DateResolver, InvalidDateErr, UtcCalendar};
pub use decoder::{decode, ChangeGroupDecoder};
pub use elements::{
    compass_point, CloudType, Descriptor, Intensity, Pressure, SkyCondition, SkyCover,
    Temperature, Visibility, VisibilityQualifier, WeatherCondition, Wind, WindDirection,
};
pub use group::GroupState;
pub use handlers::{Handler, HandlerTag, PatternErr, PatternTable};
pub use lexicon::Lexicon;
pub use render::render;
pub use variant::{ChangeGroupErr, Header, HeaderKind, Variant};

//! Narrative rendering
//!
//! A narrative is a header line followed by one indented
//! section per decoded element. Sections for elements which
//! were never decoded are left out. The weather and sky
//! lists are sorted by label.
//!
//! ```txt
//! TEMPORARY from 2025-06-19 18:00:00 UTC to 2025-06-20 18:00:00 UTC
//!      Wind dir : SSW (210 degrees)
//!      Wind speed : 12 mph, 10 knots
//!      Wind gusts : 23 mph, 20 knots
//!      Visibility : Greater than 6 miles, 9.66 kilometers
//!
//!      Total sky conditions: 1
//!      Value: Broken clouds at 3000 feet
//!
//!      There is no unparsed data for this
//! ```

use chrono::{DateTime, Utc};

use crate::elements::{
    compass_point, format_measure, knots_to_mph, Pressure, Visibility, VisibilityQualifier, Wind,
    WindDirection,
};
use crate::group::GroupState;
use crate::lexicon::Lexicon;
use crate::variant::{Header, HeaderKind};

const INDENT: &str = "\n     ";

/// Render a decoded group as a narrative
pub fn render(header: &Header, state: &GroupState, lexicon: &Lexicon) -> String {
    let mut out = String::from(header.title());

    let from = format_instant(state.valid_from(), lexicon);
    match header.kind() {
        HeaderKind::Instant => {
            out.push(' ');
            out.push_str(&from);
        }
        HeaderKind::Window => {
            let to = format_instant(state.valid_to(), lexicon);
            out.push_str(&format!(" from {} to {}", from, to));
        }
    }

    if let Some(wind) = state.wind() {
        render_wind(&mut out, wind);
    }

    if let Some(visibility) = state.visibility() {
        render_visibility(&mut out, visibility, lexicon);
    }

    if let Some(pressure) = state.pressure() {
        render_pressure(&mut out, pressure);
    }

    if !state.sky_conditions().is_empty() {
        let mut labels: Vec<&str> = state
            .sky_conditions()
            .iter()
            .map(|(_, label)| label.as_str())
            .collect();
        render_list(&mut out, "Total sky conditions", &mut labels);
    }

    if !state.weather_phenomena().is_empty() {
        let mut labels: Vec<&str> = state
            .weather_phenomena()
            .iter()
            .map(String::as_str)
            .collect();
        render_list(&mut out, "Total weather conditions", &mut labels);
    }

    if state.unparsed_fragments().is_empty() {
        out.push_str("\n\n     There is no unparsed data for this");
    } else {
        out.push_str("\n\n     Unparsed Data is as follows");
        for fragment in state.unparsed_fragments() {
            out.push_str(INDENT);
            out.push_str(fragment);
        }
    }

    out.push('\n');
    out
}

fn format_instant(when: Option<DateTime<Utc>>, lexicon: &Lexicon) -> String {
    match when {
        Some(when) => when.to_string(),
        None => lexicon.unset_instant.clone(),
    }
}

fn render_wind(out: &mut String, wind: &Wind) {
    if wind.is_not_determined() {
        out.push_str(INDENT);
        out.push_str("Wind : The wind direction and speed cannot be determined");
        return;
    }

    out.push_str(INDENT);
    match (wind.variable_sector(), wind.direction()) {
        (Some((from, to)), _) => out.push_str(&format!(
            "Wind Direction is variable (greater than 6 knots)  Variable between {} and {} ({} degrees and {} degrees)",
            compass_point(from),
            compass_point(to),
            from,
            to
        )),
        (None, Some(WindDirection::Degrees(deg))) => out.push_str(&format!(
            "Wind dir : {} ({} degrees)",
            compass_point(deg),
            deg
        )),
        (None, _) => out.push_str("Wind Direction is variable"),
    }

    let speed = wind.speed_knots().unwrap_or(0);
    out.push_str(INDENT);
    out.push_str(&format!(
        "Wind speed : {} mph, {} knots",
        knots_to_mph(speed),
        speed
    ));

    let gust = wind.gust_knots().unwrap_or(0);
    out.push_str(INDENT);
    out.push_str(&format!(
        "Wind gusts : {} mph, {} knots",
        knots_to_mph(gust),
        gust
    ));
}

fn render_visibility(out: &mut String, visibility: &Visibility, lexicon: &Lexicon) {
    out.push_str(INDENT);
    out.push_str("Visibility : ");

    if visibility.is_cavok() {
        out.push_str(&lexicon.cavok);
        return;
    }

    match visibility.qualifier() {
        VisibilityQualifier::GreaterThan => out.push_str("Greater than "),
        VisibilityQualifier::LessThan => out.push_str("Less than "),
        VisibilityQualifier::Exact => {}
    }

    out.push_str(&format!(
        "{} {}, {} {}",
        format_measure(visibility.miles().unwrap_or_default()),
        lexicon.miles,
        format_measure(visibility.kilometers().unwrap_or_default()),
        lexicon.kilometers
    ));
}

fn render_pressure(out: &mut String, pressure: &Pressure) {
    out.push_str(INDENT);
    match (pressure.inches_hg(), pressure.hectopascals()) {
        (Some(inhg), Some(hpa)) => out.push_str(&format!(
            "Pressure   : {:.2} in Hg, {:.0} in hPa",
            inhg, hpa
        )),
        _ => out.push_str("Pressure   : The pressure cannot be determined"),
    }
}

fn render_list(out: &mut String, title: &str, labels: &mut [&str]) {
    labels.sort_unstable();

    out.push_str(&format!("\n\n     {}: {}", title, labels.len()));
    for label in labels.iter() {
        out.push_str(INDENT);
        out.push_str("Value: ");
        out.push_str(label);
    }
}

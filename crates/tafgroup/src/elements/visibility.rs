//! Prevailing visibility

use regex::Captures;

use super::captured;

/// Kilometers per statute mile
pub(crate) const KM_PER_MILE: f64 = 1.609344;

/// Meter reports at or above this value mean "10 km or more"
const METERS_UNLIMITED: u32 = 9999;

/// Qualifies a visibility distance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum VisibilityQualifier {
    /// Exactly the distance given
    #[default]
    Exact,

    /// More than the distance given (`P6SM`, `9999`)
    GreaterThan,

    /// Less than the distance given (`M1/4SM`)
    LessThan,
}

/// Prevailing visibility
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visibility {
    cavok: bool,
    miles: Option<f64>,
    kilometers: Option<f64>,
    qualifier: VisibilityQualifier,
}

impl Visibility {
    /// Merge the captures of one visibility match
    ///
    /// Recognized capture names are `cavok`, `modifier`, `miles`,
    /// and `meters`. A distance clears any earlier `CAVOK`.
    pub fn merge(&mut self, caps: &Captures<'_>) {
        if captured(caps, "cavok").is_some() {
            self.cavok = true;
        }

        if let Some(miles) = captured(caps, "miles").and_then(parse_miles) {
            self.cavok = false;
            self.miles = Some(miles);
            self.kilometers = Some(miles * KM_PER_MILE);
            self.qualifier = match captured(caps, "modifier") {
                Some("P") => VisibilityQualifier::GreaterThan,
                Some("M") => VisibilityQualifier::LessThan,
                _ => VisibilityQualifier::Exact,
            };
        } else if let Some(meters) = captured(caps, "meters").and_then(|m| m.parse::<u32>().ok())
        {
            self.cavok = false;
            let km = f64::from(meters) / 1000.0;
            if meters >= METERS_UNLIMITED {
                self.kilometers = Some(10.0);
                self.qualifier = VisibilityQualifier::GreaterThan;
            } else {
                self.kilometers = Some(km);
                self.qualifier = VisibilityQualifier::Exact;
            }
            self.miles = self.kilometers.map(|km| km / KM_PER_MILE);
        }
    }

    /// Ceiling and visibility OK
    pub fn is_cavok(&self) -> bool {
        self.cavok
    }

    /// Distance in statute miles
    pub fn miles(&self) -> Option<f64> {
        self.miles
    }

    /// Distance in kilometers
    pub fn kilometers(&self) -> Option<f64> {
        self.kilometers
    }

    /// How the distance is qualified
    pub fn qualifier(&self) -> VisibilityQualifier {
        self.qualifier
    }
}

// Parse "6", "1/2", or "1 1/2"
fn parse_miles(text: &str) -> Option<f64> {
    let mut total = 0.0f64;
    for part in text.split_whitespace() {
        total += match part.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.parse::<u32>().ok()?.into();
                let den: f64 = den.parse::<u32>().ok()?.into();
                if den == 0.0 {
                    return None;
                }
                num / den
            }
            None => part.parse::<u32>().ok()?.into(),
        };
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;
    use regex::Regex;

    fn vis_re() -> Regex {
        Regex::new(r"^(?:(?P<cavok>CAVOK)|(?P<modifier>[PM])?(?P<miles>\d{1,2} \d/\d{1,2}|\d/\d{1,2}|\d{1,2})SM|(?P<meters>\d{4}))")
            .unwrap()
    }

    #[test]
    fn test_parse_miles() {
        assert_eq!(Some(6.0), parse_miles("6"));
        assert_eq!(Some(0.5), parse_miles("1/2"));
        assert_eq!(Some(1.5), parse_miles("1 1/2"));
        assert_eq!(None, parse_miles("1/0"));
        assert_eq!(None, parse_miles("X"));
    }

    #[test]
    fn test_merge() {
        let re = vis_re();
        let mut vis = Visibility::default();

        vis.merge(&re.captures("P6SM").unwrap());
        assert_eq!(VisibilityQualifier::GreaterThan, vis.qualifier());
        assert_approx_eq!(6.0, vis.miles().unwrap());
        assert_approx_eq!(9.656064, vis.kilometers().unwrap());

        vis.merge(&re.captures("M1/4SM").unwrap());
        assert_eq!(VisibilityQualifier::LessThan, vis.qualifier());
        assert_approx_eq!(0.25, vis.miles().unwrap());

        vis.merge(&re.captures("CAVOK").unwrap());
        assert!(vis.is_cavok());

        vis.merge(&re.captures("0800").unwrap());
        assert!(!vis.is_cavok());
        assert_eq!(VisibilityQualifier::Exact, vis.qualifier());
        assert_approx_eq!(0.8, vis.kilometers().unwrap());
        assert_approx_eq!(0.497097, vis.miles().unwrap(), 1.0e-5);

        vis.merge(&re.captures("9999").unwrap());
        assert_eq!(VisibilityQualifier::GreaterThan, vis.qualifier());
        assert_approx_eq!(10.0, vis.kilometers().unwrap());
    }
}

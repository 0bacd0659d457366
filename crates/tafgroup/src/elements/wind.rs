//! Surface wind

use regex::Captures;

use super::captured;

/// Knots to statute miles per hour
const MPH_PER_KNOT: f64 = 1.15078;

/// Meters per second to knots
const KNOTS_PER_MPS: f64 = 1.943844;

/// Kilometers per hour to knots
const KMH_PER_KNOT: f64 = 1.852;

/// Sixteen-point compass rose, clockwise from north
const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Nearest point of the sixteen-point compass
///
/// ```
/// use tafgroup::compass_point;
///
/// assert_eq!("N", compass_point(0));
/// assert_eq!("SSW", compass_point(200));
/// assert_eq!("N", compass_point(355));
/// ```
pub fn compass_point(degrees: u16) -> &'static str {
    let idx = (f64::from(degrees) / 22.5).round() as usize % COMPASS.len();
    COMPASS[idx]
}

/// Where the wind is coming from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindDirection {
    /// True bearing, in degrees
    Degrees(u16),

    /// Variable (`VRB`)
    Variable,

    /// Reported as missing (`///`)
    Unknown,
}

/// Surface wind
///
/// All speeds are stored in knots. Reports in meters per second
/// or kilometers per hour are converted on input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Wind {
    direction: Option<WindDirection>,
    speed: Option<u16>,
    speed_missing: bool,
    gust: Option<u16>,
    sector: Option<(u16, u16)>,
}

impl Wind {
    /// Merge the captures of one wind match
    ///
    /// Recognized capture names are `dir`, `speed`, `gust`,
    /// `units`, `varfrom`, and `varto`. Fields whose captures
    /// did not participate are left as they were.
    pub fn merge(&mut self, caps: &Captures<'_>) {
        let units = captured(caps, "units").unwrap_or("KT");

        if let Some(dir) = captured(caps, "dir") {
            self.direction = Some(match dir {
                "VRB" => WindDirection::Variable,
                _ => dir
                    .parse()
                    .map(WindDirection::Degrees)
                    .unwrap_or(WindDirection::Unknown),
            });
        }

        if let Some(speed) = captured(caps, "speed") {
            self.speed = to_knots(speed, units);
            self.speed_missing = self.speed.is_none();
        }

        if let Some(gust) = captured(caps, "gust") {
            self.gust = to_knots(gust, units);
        }

        if let (Some(from), Some(to)) = (captured(caps, "varfrom"), captured(caps, "varto")) {
            if let (Ok(from), Ok(to)) = (from.parse(), to.parse()) {
                self.sector = Some((from, to));
            }
        }
    }

    /// Reported direction
    pub fn direction(&self) -> Option<WindDirection> {
        self.direction
    }

    /// Sustained speed, in knots
    pub fn speed_knots(&self) -> Option<u16> {
        self.speed
    }

    /// Gust speed, in knots
    pub fn gust_knots(&self) -> Option<u16> {
        self.gust
    }

    /// Bounds of a variable direction sector, in degrees
    ///
    /// Present when the wind is variable at more than six
    /// knots, as in `21010KT 180V240`.
    pub fn variable_sector(&self) -> Option<(u16, u16)> {
        self.sector
    }

    /// True if the direction is `VRB` with no sector
    pub fn is_variable(&self) -> bool {
        self.direction == Some(WindDirection::Variable)
    }

    /// True if either the direction or the speed is missing
    pub fn is_not_determined(&self) -> bool {
        self.direction == Some(WindDirection::Unknown) || self.speed_missing
    }
}

/// Knots to miles per hour, rounded
pub(crate) fn knots_to_mph(knots: u16) -> u32 {
    (f64::from(knots) * MPH_PER_KNOT).round() as u32
}

fn to_knots(value: &str, units: &str) -> Option<u16> {
    let value: f64 = value.parse::<u16>().ok()?.into();
    let knots = match units {
        "MPS" => value * KNOTS_PER_MPS,
        "KMH" => value / KMH_PER_KNOT,
        _ => value,
    };
    Some(knots.round() as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    use regex::Regex;

    fn wind_re() -> Regex {
        Regex::new(r"^(?P<dir>\d{3}|VRB|///)(?P<speed>\d{2,3}|//)(?:G(?P<gust>\d{2,3}))?(?P<units>KT|MPS|KMH)(?:\s+(?P<varfrom>\d{3})V(?P<varto>\d{3}))?")
            .unwrap()
    }

    #[test]
    fn test_compass() {
        assert_eq!("N", compass_point(0));
        assert_eq!("N", compass_point(11));
        assert_eq!("NNE", compass_point(12));
        assert_eq!("E", compass_point(90));
        assert_eq!("S", compass_point(180));
        assert_eq!("SW", compass_point(225));
        assert_eq!("W", compass_point(270));
        assert_eq!("NNW", compass_point(340));
        assert_eq!("N", compass_point(360));
    }

    #[test]
    fn test_merge() {
        let re = wind_re();
        let mut wind = Wind::default();

        wind.merge(&re.captures("18010G20KT").unwrap());
        assert_eq!(Some(WindDirection::Degrees(180)), wind.direction());
        assert_eq!(Some(10), wind.speed_knots());
        assert_eq!(Some(20), wind.gust_knots());
        assert!(!wind.is_variable());
        assert!(!wind.is_not_determined());

        // gust not captured: retains prior gust
        wind.merge(&re.captures("VRB03KT").unwrap());
        assert!(wind.is_variable());
        assert_eq!(Some(3), wind.speed_knots());
        assert_eq!(Some(20), wind.gust_knots());

        wind.merge(&re.captures("21010KT 180V240").unwrap());
        assert_eq!(Some(WindDirection::Degrees(210)), wind.direction());
        assert_eq!(Some((180, 240)), wind.variable_sector());
    }

    #[test]
    fn test_not_determined() {
        let re = wind_re();

        let mut wind = Wind::default();
        wind.merge(&re.captures("/////KT").unwrap());
        assert!(wind.is_not_determined());

        // a later complete report clears it
        wind.merge(&re.captures("27005KT").unwrap());
        assert!(!wind.is_not_determined());
    }

    #[test]
    fn test_units() {
        let re = wind_re();

        let mut wind = Wind::default();
        wind.merge(&re.captures("24005MPS").unwrap());
        assert_eq!(Some(10), wind.speed_knots());

        wind.merge(&re.captures("24037KMH").unwrap());
        assert_eq!(Some(20), wind.speed_knots());

        assert_eq!(12, knots_to_mph(10));
        assert_eq!(29, knots_to_mph(25));
        assert_eq!(0, knots_to_mph(0));
    }
}

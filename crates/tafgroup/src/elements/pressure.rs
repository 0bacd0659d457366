//! Altimeter setting

use regex::Captures;

use super::captured;

/// Hectopascals per inch of mercury
const HPA_PER_INHG: f64 = 33.8639;

/// Altimeter setting
///
/// Reported either in hundredths of an inch of mercury
/// (`A2992`) or in whole hectopascals (`Q1013`). Both units
/// are kept. A missing value (`A////`) leaves the pressure
/// undetermined.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pressure {
    inches_hg: Option<f64>,
    hectopascals: Option<f64>,
}

impl Pressure {
    /// Merge the captures of one altimeter match
    ///
    /// Recognized capture names are `unit` (`A` or `Q`) and
    /// `pressure`. Without a `unit`, the value is taken as
    /// inches of mercury.
    pub fn merge(&mut self, caps: &Captures<'_>) {
        let Some(value) = captured(caps, "pressure") else {
            return;
        };

        match value.parse::<u32>() {
            Ok(raw) => match captured(caps, "unit") {
                Some("Q") => {
                    let hpa = f64::from(raw);
                    self.hectopascals = Some(hpa);
                    self.inches_hg = Some(hpa / HPA_PER_INHG);
                }
                _ => {
                    let inhg = f64::from(raw) / 100.0;
                    self.inches_hg = Some(inhg);
                    self.hectopascals = Some(inhg * HPA_PER_INHG);
                }
            },
            Err(_) => {
                self.inches_hg = None;
                self.hectopascals = None;
            }
        }
    }

    /// Inches of mercury
    pub fn inches_hg(&self) -> Option<f64> {
        self.inches_hg
    }

    /// Hectopascals
    pub fn hectopascals(&self) -> Option<f64> {
        self.hectopascals
    }

    /// True if the reported value was missing
    pub fn is_not_determined(&self) -> bool {
        self.inches_hg.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;
    use regex::Regex;

    #[test]
    fn test_merge() {
        let re = Regex::new(r"^(?P<unit>[AQ])(?P<pressure>\d{4}|////)").unwrap();
        let mut press = Pressure::default();
        assert!(press.is_not_determined());

        press.merge(&re.captures("A2992").unwrap());
        assert_approx_eq!(29.92, press.inches_hg().unwrap());
        assert_approx_eq!(1013.2079, press.hectopascals().unwrap(), 1.0e-3);
        assert!(!press.is_not_determined());

        press.merge(&re.captures("Q1013").unwrap());
        assert_approx_eq!(1013.0, press.hectopascals().unwrap());
        assert_approx_eq!(29.9139, press.inches_hg().unwrap(), 1.0e-3);

        press.merge(&re.captures("A////").unwrap());
        assert!(press.is_not_determined());
    }
}

//! Band radius specification: an absolute count or a percentage of the sequence length.

use std::fmt;
use std::str::FromStr;

use cdtw_engine::SakoeChibaBand;

use crate::IoError;

/// A band radius as given on the command line.
///
/// `"3"` is an absolute radius; `"10%"` is a fraction of the sequence length,
/// resolved with [`RadiusSpec::resolve`] before the engine is called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusSpec {
    /// A fixed radius.
    Absolute(usize),
    /// A percentage of the sequence length, `>= 0`.
    Percent(f64),
}

impl RadiusSpec {
    /// Resolve to a concrete band for sequences of length `len`.
    ///
    /// Percentages are truncated towards zero: `10%` of 45 is 4.
    #[must_use]
    pub fn resolve(&self, len: usize) -> SakoeChibaBand {
        match *self {
            Self::Absolute(r) => SakoeChibaBand::new(r),
            Self::Percent(p) => SakoeChibaBand::new((p / 100.0 * len as f64) as usize),
        }
    }
}

impl Default for RadiusSpec {
    fn default() -> Self {
        Self::Percent(10.0)
    }
}

impl FromStr for RadiusSpec {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = |reason| IoError::InvalidRadius {
            raw: s.to_string(),
            reason,
        };

        if let Some(pct) = raw.strip_suffix('%') {
            let p: f64 = pct.trim().parse().map_err(|_| invalid("not a number"))?;
            if !p.is_finite() {
                return Err(invalid("percentage must be finite"));
            }
            if p < 0.0 {
                return Err(invalid("percentage must be non-negative"));
            }
            return Ok(Self::Percent(p));
        }

        let r: i64 = raw.parse().map_err(|_| invalid("not an integer"))?;
        let band = SakoeChibaBand::try_from(r)?;
        Ok(Self::Absolute(band.radius()))
    }
}

impl fmt::Display for RadiusSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(r) => write!(f, "{r}"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use cdtw_engine::DtwError;

    use super::*;

    #[test]
    fn percent_of_length() {
        let spec: RadiusSpec = "10%".parse().unwrap();
        assert_eq!(spec, RadiusSpec::Percent(10.0));
        assert_eq!(spec.resolve(40).radius(), 4);
        assert_eq!(spec.resolve(45).radius(), 4);
        assert_eq!(spec.resolve(5).radius(), 0);
    }

    #[test]
    fn fractional_percent() {
        let spec: RadiusSpec = "12.5%".parse().unwrap();
        assert_eq!(spec.resolve(80).radius(), 10);
    }

    #[test]
    fn absolute_ignores_length() {
        let spec: RadiusSpec = " 3 ".parse().unwrap();
        assert_eq!(spec, RadiusSpec::Absolute(3));
        assert_eq!(spec.resolve(1000).radius(), 3);
    }

    #[test]
    fn negative_absolute_rejected() {
        let err = "-1".parse::<RadiusSpec>().unwrap_err();
        assert!(matches!(err, IoError::Dtw(DtwError::NegativeRadius { radius: -1 })));
    }

    #[test]
    fn negative_percent_rejected() {
        assert!(matches!(
            "-5%".parse::<RadiusSpec>(),
            Err(IoError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn garbage_rejected() {
        for raw in ["abc%", "abc", "", "1.5", "inf%", "NaN%"] {
            assert!(
                matches!(raw.parse::<RadiusSpec>(), Err(IoError::InvalidRadius { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_the_notation() {
        assert_eq!(RadiusSpec::Absolute(7).to_string(), "7");
        assert_eq!(RadiusSpec::default().to_string(), "10%");
    }
}

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Tentative distance shown as a node label.
///
/// Infinities get their own variants so they survive JSON, which has no representation for them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distance {
    Finite(f64),
    Infinite,
    NegativeInfinite,
}

impl Distance {
    pub fn value(self) -> f64 {
        match self {
            Distance::Finite(v) => v,
            Distance::Infinite => f64::INFINITY,
            Distance::NegativeInfinite => f64::NEG_INFINITY,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl From<f64> for Distance {
    fn from(v: f64) -> Self {
        if v == f64::INFINITY {
            Distance::Infinite
        } else if v == f64::NEG_INFINITY {
            Distance::NegativeInfinite
        } else {
            Distance::Finite(v)
        }
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(v) => write!(f, "{v}"),
            Distance::Infinite => write!(f, "∞"),
            Distance::NegativeInfinite => write!(f, "-∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Distance::from(3.).to_string(), "3");
        assert_eq!(Distance::from(-1.5).to_string(), "-1.5");
        assert_eq!(Distance::from(f64::INFINITY).to_string(), "∞");
        assert_eq!(Distance::from(f64::NEG_INFINITY).to_string(), "-∞");
    }

    #[test]
    fn value_round_trips_infinities() {
        assert_eq!(Distance::from(f64::INFINITY).value(), f64::INFINITY);
        assert_eq!(Distance::NegativeInfinite.value(), f64::NEG_INFINITY);
        assert!(Distance::Finite(0.).is_finite());
        assert!(!Distance::Infinite.is_finite());
    }
}

//! Fetch window (`Period`) and sampling interval (`Interval`).
//!
//! String forms match the Yahoo chart API `range` / `interval` parameters
//! (e.g. `"1y"`, `"1d"`), which are also what the config file and CLI accept.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far back to fetch history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    Day1,
    Day5,
    Month1,
    Month3,
    Month6,
    Year1,
    Year2,
    Year5,
    Year10,
    YearToDate,
    Max,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day1 => "1d",
            Self::Day5 => "5d",
            Self::Month1 => "1mo",
            Self::Month3 => "3mo",
            Self::Month6 => "6mo",
            Self::Year1 => "1y",
            Self::Year2 => "2y",
            Self::Year5 => "5y",
            Self::Year10 => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::Year1
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Self::Day1),
            "5d" => Ok(Self::Day5),
            "1mo" => Ok(Self::Month1),
            "3mo" => Ok(Self::Month3),
            "6mo" => Ok(Self::Month6),
            "1y" => Ok(Self::Year1),
            "2y" => Ok(Self::Year2),
            "5y" => Ok(Self::Year5),
            "10y" => Ok(Self::Year10),
            "ytd" => Ok(Self::YearToDate),
            "max" => Ok(Self::Max),
            other => Err(format!(
                "unknown period '{other}'. Valid: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max"
            )),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling interval between records.
///
/// Only daily-or-coarser intervals: a `PriceRecord` is keyed by calendar date,
/// so intraday bars would collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    Day1,
    Day5,
    Week1,
    Month1,
    Month3,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day1 => "1d",
            Self::Day5 => "5d",
            Self::Week1 => "1wk",
            Self::Month1 => "1mo",
            Self::Month3 => "3mo",
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::Day1
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Self::Day1),
            "5d" => Ok(Self::Day5),
            "1wk" => Ok(Self::Week1),
            "1mo" => Ok(Self::Month1),
            "3mo" => Ok(Self::Month3),
            "1m" | "2m" | "5m" | "15m" | "30m" | "60m" | "90m" | "1h" => Err(format!(
                "intraday interval '{s}' is not supported; use 1d, 5d, 1wk, 1mo or 3mo"
            )),
            other => Err(format!(
                "unknown interval '{other}'. Valid: 1d, 5d, 1wk, 1mo, 3mo"
            )),
        }
    }
}

impl TryFrom<String> for Interval {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_every_variant() {
        for s in ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"] {
            let p: Period = s.parse().unwrap();
            assert_eq!(p.as_str(), s);
        }
    }

    #[test]
    fn period_rejects_unknown() {
        assert!("7y".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn interval_rejects_intraday() {
        let err = "1h".parse::<Interval>().unwrap_err();
        assert!(err.contains("intraday"));
        assert!("1m".parse::<Interval>().is_err());
    }

    #[test]
    fn defaults_are_one_year_daily() {
        assert_eq!(Period::default(), Period::Year1);
        assert_eq!(Interval::default(), Interval::Day1);
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Interval::Week1).unwrap();
        assert_eq!(json, "\"1wk\"");
        let parsed: Period = serde_json::from_str("\"ytd\"").unwrap();
        assert_eq!(parsed, Period::YearToDate);
        assert!(serde_json::from_str::<Period>("\"3y\"").is_err());
    }
}

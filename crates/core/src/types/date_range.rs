use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Preset publication windows offered by the search form. Unknown keys fall
/// back to the default window rather than failing, matching the lenient
/// handling of form input everywhere else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRange {
    Day,
    #[default]
    Week,
    TwoWeeks,
    Month,
}

impl DateRange {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "1d" => Self::Day,
            "7d" => Self::Week,
            "14d" => Self::TwoWeeks,
            "30d" => Self::Month,
            _ => Self::default(),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Day => "1d",
            Self::Week => "7d",
            Self::TwoWeeks => "14d",
            Self::Month => "30d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Past day",
            Self::Week => "Past 7 days",
            Self::TwoWeeks => "Past 14 days",
            Self::Month => "Past 30 days",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::TwoWeeks => 14,
            Self::Month => 30,
        }
    }

    /// Lower bound on publication time for a search issued at `now`.
    pub fn published_after(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}

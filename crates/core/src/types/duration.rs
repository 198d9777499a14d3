use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Video length filter, mapped straight onto the provider's
/// `videoDuration` parameter. `Any` means the parameter is omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationFilter {
    #[default]
    Any,
    Short,
    Medium,
    Long,
}

impl DurationFilter {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "short" => Self::Short,
            "medium" => Self::Medium,
            "long" => Self::Long,
            _ => Self::Any,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Any => "Any length",
            Self::Short => "Under 4 minutes",
            Self::Medium => "4-20 minutes",
            Self::Long => "Over 20 minutes",
        }
    }

    pub fn as_query_param(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            other => Some(other.key()),
        }
    }
}

impl Serialize for DurationFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for DurationFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}

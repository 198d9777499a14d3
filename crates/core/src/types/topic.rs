use serde::{Deserialize, Deserializer, Serialize, Serializer};

const GAMING_TOPIC_ID: &str = "/m/0bzvm2";

/// Optional topic restriction. A topic with its own id can stand in for a
/// query, which is why `allows_empty_query` lives here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Topic {
    #[default]
    None,
    Gaming,
}

impl Topic {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "gaming" => Self::Gaming,
            _ => Self::None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gaming => "gaming",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "All topics",
            Self::Gaming => "Gaming (global)",
        }
    }

    pub fn topic_id(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gaming => Some(GAMING_TOPIC_ID),
        }
    }

    pub fn allows_empty_query(self) -> bool {
        self.topic_id().is_some()
    }
}

impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}

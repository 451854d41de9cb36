//! Shared wire types used across multiple resources.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// International and japanese names for a game, series or user. The
/// japanese name is relatively rare; the international one is always
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Names {
    #[serde(default)]
    pub international: String,
    #[serde(default)]
    pub japanese: Option<String>,
}

/// The timing method used to measure a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingMethod {
    /// Realtime including loading times.
    #[serde(rename = "realtime")]
    Realtime,
    /// Realtime without loading times.
    #[serde(rename = "realtime_noloads")]
    RealtimeWithoutLoads,
    /// The in-game timer.
    #[serde(rename = "ingame")]
    IngameTime,
}

impl TimingMethod {
    /// The identifier used on the wire and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingMethod::Realtime => "realtime",
            TimingMethod::RealtimeWithoutLoads => "realtime_noloads",
            TimingMethod::IngameTime => "ingame",
        }
    }
}

/// The power level of a game or series moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModLevel {
    /// Can do game-related things.
    #[serde(rename = "moderator")]
    Moderator,
    /// Can appoint other moderators.
    #[serde(rename = "super-moderator")]
    SuperModerator,
    /// Used when moderators have been embedded and the API carries no
    /// information about their actual level.
    #[serde(rename = "unknown")]
    Unknown,
}

impl<'de> Deserialize<'de> for ModLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // unrecognized levels map to Unknown rather than failing the
        // whole resource decode
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "moderator" => ModLevel::Moderator,
            "super-moderator" => ModLevel::SuperModerator,
            _ => ModLevel::Unknown,
        })
    }
}

/// A run duration.
///
/// The API encodes durations as a numeric count of seconds with fractional
/// milliseconds (e.g. `36.543` meaning 36.543s), not as ISO 8601 duration
/// text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(std::time::Duration);

impl Duration {
    /// Build a duration from whole seconds and milliseconds.
    pub fn new(seconds: u64, millis: u32) -> Self {
        Self(std::time::Duration::new(seconds, millis * 1_000_000))
    }

    /// The duration in (fractional) seconds, as sent on the wire.
    pub fn seconds(&self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Access the underlying [`std::time::Duration`].
    pub fn as_std(&self) -> std::time::Duration {
        self.0
    }

    /// Render a human readable time in the form `[[HH:]MM:]SS[.mmm]`.
    pub fn format(&self) -> String {
        let total = self.0.as_secs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        let millis = self.0.subsec_millis();

        let mut formatted = if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else if minutes > 0 {
            format!("{minutes}:{seconds:02}")
        } else {
            format!("{seconds}")
        };

        if millis > 0 {
            formatted.push_str(&format!(".{millis:03}"));
        }

        formatted
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // round to milliseconds, matching the wire precision
        let seconds = (self.seconds() * 1000.0).round() / 1000.0;
        serializer.serialize_f64(seconds)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(D::Error::custom("duration must be a non-negative number"));
        }
        std::time::Duration::try_from_secs_f64(seconds)
            .map(Self)
            .map_err(D::Error::custom)
    }
}

/// Deserialize an optional RFC 3339 timestamp, treating `null` and the
/// empty string the same way. Old records on the site carry `""` where a
/// timestamp would be.
pub(crate) fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(D::Error::custom),
    }
}

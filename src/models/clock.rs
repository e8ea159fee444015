use std::fmt;

/// A wall-clock time of day, stored as minutes since midnight.
///
/// The board only ever deals in hour:minute granularity, so this is the
/// whole time model: task windows, completion stamps and "now" are all
/// `Clock` values, and window/earliness math is plain minute arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clock {
    minutes: u32,
}

impl Clock {
    pub fn from_minutes(minutes: u32) -> Clock {
        Clock { minutes }
    }

    /// Parse an `"HH:MM"` string. Exactly two numeric components split
    /// on `:`; anything else (empty string, missing separator,
    /// non-numeric parts) is `None`.
    pub fn parse(s: &str) -> Option<Clock> {
        let mut parts = s.split(':');
        let hours: u32 = parts.next()?.parse().ok()?;
        let minutes: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Clock {
            minutes: hours.checked_mul(60)?.checked_add(minutes)?,
        })
    }

    /// The current local time, truncated to the minute.
    pub fn now() -> Clock {
        let time = jiff::Zoned::now().time();
        Clock {
            minutes: time.hour() as u32 * 60 + time.minute() as u32,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Serde adapter for `Option<Clock>` fields.
///
/// Stored and exported documents keep clocks human-readable: `"HH:MM"`
/// when present, `""` when absent. Unparseable strings deserialize to
/// `None` rather than failing the whole document — a task with a broken
/// window still loads, it just never earns a bonus.
pub mod option {
    use super::Clock;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(clock: &Option<Clock>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match clock {
            Some(c) => serializer.serialize_str(&c.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Clock>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().and_then(Clock::parse))
    }
}

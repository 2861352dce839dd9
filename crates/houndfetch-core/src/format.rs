//! Value formatting for field lines.
//!
//! Functions for formatting uptime and memory usage.

use std::fmt;

use crate::facts::MemoryUsage;

/// Displayed in place of any value a collaborator could not supply.
pub const NOT_AVAILABLE: &str = "n/a";

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Largest unit an uptime is displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UptimeTier {
    /// `0 < u <= 60`
    Seconds,
    /// `60 < u <= 3600`
    Minutes,
    /// `3600 < u <= 86400`
    Hours,
    /// `u > 86400`
    Days,
}

impl UptimeTier {
    /// Tier for `secs`, or `None` when there is nothing to show.
    #[must_use]
    pub fn for_secs(secs: i64) -> Option<Self> {
        match secs {
            i64::MIN..=0 => None,
            1..=MINUTE => Some(Self::Seconds),
            // 60 < u <= 3600
            61..=HOUR => Some(Self::Minutes),
            // 3600 < u <= 86400
            3601..=DAY => Some(Self::Hours),
            _ => Some(Self::Days),
        }
    }
}

/// Uptime split into units, cascaded from the tier's largest unit down.
///
/// Units above the tier stay zero, so the top unit of a lower tier may
/// exceed its usual range (`3600` is `60 m, 0 s`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UptimeParts {
    pub tier: UptimeTier,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl UptimeParts {
    /// Split `secs`; `None` for non-positive input.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        let tier = UptimeTier::for_secs(secs)?;
        let mut rest = secs;
        let mut take = |unit: i64, applies: bool| {
            if applies {
                let n = rest / unit;
                rest %= unit;
                n
            } else {
                0
            }
        };
        let days = take(DAY, tier >= UptimeTier::Days);
        let hours = take(HOUR, tier >= UptimeTier::Hours);
        let minutes = take(MINUTE, tier >= UptimeTier::Minutes);
        Some(Self {
            tier,
            days,
            hours,
            minutes,
            seconds: rest,
        })
    }

    /// Seconds represented by these parts.
    #[must_use]
    pub fn total_secs(&self) -> i64 {
        self.days * DAY + self.hours * HOUR + self.minutes * MINUTE + self.seconds
    }
}

impl fmt::Display for UptimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            UptimeTier::Seconds => write!(f, "{} s", self.seconds),
            UptimeTier::Minutes => write!(f, "{} m, {} s", self.minutes, self.seconds),
            UptimeTier::Hours => write!(
                f,
                "{} h, {} m, {} s",
                self.hours, self.minutes, self.seconds
            ),
            UptimeTier::Days => write!(
                f,
                "{} d, {} h, {} m, {} s",
                self.days, self.hours, self.minutes, self.seconds
            ),
        }
    }
}

/// Format uptime seconds, `n/a` when not positive.
///
/// # Examples
///
/// ```
/// use houndfetch_core::format::format_uptime;
///
/// assert_eq!(format_uptime(90), "1 m, 30 s");
/// assert_eq!(format_uptime(3661), "1 h, 1 m, 1 s");
/// assert_eq!(format_uptime(0), "n/a");
/// ```
#[must_use]
pub fn format_uptime(secs: i64) -> String {
    UptimeParts::from_secs(secs).map_or_else(|| NOT_AVAILABLE.to_string(), |p| p.to_string())
}

/// Format memory as `used / total Mb (pct%)`, `n/a` unless both are positive.
#[must_use]
pub fn format_memory(usage: MemoryUsage) -> String {
    let MemoryUsage { used_mb, total_mb } = usage;
    if used_mb <= 0 || total_mb <= 0 {
        return NOT_AVAILABLE.to_string();
    }
    let percent = used_mb.saturating_mul(100) / total_mb;
    format!("{used_mb} / {total_mb} Mb ({percent}%)")
}

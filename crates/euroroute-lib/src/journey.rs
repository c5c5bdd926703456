//! Travel time estimates and `"2h 30m"` style durations.

use serde::Serialize;

use crate::error::{Error, Result};

/// Average coach speed used for journey estimates.
pub const AVERAGE_SPEED_KMH: f64 = 60.0;

/// Distance and estimated driving time for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JourneyEstimate {
    pub distance_km: f64,
    pub travel_minutes: u32,
}

impl JourneyEstimate {
    pub fn for_distance(distance_km: f64) -> Self {
        let travel_minutes = (distance_km.max(0.0) * 60.0 / AVERAGE_SPEED_KMH).round() as u32;
        Self {
            distance_km,
            travel_minutes,
        }
    }

    pub fn formatted(&self) -> String {
        format_duration(self.travel_minutes)
    }
}

/// Render minutes as `"{hours}h {minutes}m"`.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Parse `"2h 30m"`, `"3h"`, or `"45m"` into minutes.
pub fn parse_duration(value: &str) -> Result<u32> {
    let invalid = || Error::InvalidDuration {
        value: value.to_string(),
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (hours, rest) = match trimmed.split_once('h') {
        Some((hours, rest)) => (hours.trim().parse::<u32>().map_err(|_| invalid())?, rest),
        None => (0, trimmed),
    };

    let rest = rest.trim();
    let minutes = if rest.is_empty() {
        0
    } else {
        rest.strip_suffix('m')
            .ok_or_else(invalid)?
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid())?
    };

    hours
        .checked_mul(60)
        .and_then(|total| total.checked_add(minutes))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_uses_average_speed() {
        let estimate = JourneyEstimate::for_distance(391.5);
        assert_eq!(estimate.travel_minutes, 392);
        assert_eq!(estimate.formatted(), "6h 32m");
    }

    #[test]
    fn short_distances_format_zero_hours() {
        assert_eq!(JourneyEstimate::for_distance(45.0).formatted(), "0h 45m");
    }

    #[test]
    fn parses_duration_variants() {
        assert_eq!(parse_duration("2h 30m").expect("valid"), 150);
        assert_eq!(parse_duration("3h").expect("valid"), 180);
        assert_eq!(parse_duration("45m").expect("valid"), 45);
        assert_eq!(parse_duration(" 1h5m ").expect("valid"), 65);
    }

    #[test]
    fn rejects_malformed_durations() {
        for value in ["", "h", "2x", "2h 30", "abc m"] {
            assert!(
                matches!(parse_duration(value), Err(Error::InvalidDuration { .. })),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn format_and_parse_agree() {
        assert_eq!(parse_duration(&format_duration(197)).expect("valid"), 197);
    }
}

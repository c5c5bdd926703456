//! Daily service timetables derived from a route's journey estimate.

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::journey::{format_duration, parse_duration};
use crate::routes::Route;

/// A named daily departure pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceTemplate {
    pub name: &'static str,
    pub departure_hour: u32,
    pub departure_minute: u32,
    /// Multiplier applied to the estimated travel time.
    pub speed_factor: f64,
    pub capacity: u32,
}

impl ServiceTemplate {
    fn departure(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.departure_hour, self.departure_minute, 0)
            .unwrap_or_default()
    }
}

/// Services operated on every route.
pub const DEFAULT_SERVICES: [ServiceTemplate; 3] = [
    ServiceTemplate {
        name: "Morning Express",
        departure_hour: 7,
        departure_minute: 0,
        speed_factor: 0.9,
        capacity: 55,
    },
    ServiceTemplate {
        name: "Standard Service",
        departure_hour: 12,
        departure_minute: 0,
        speed_factor: 1.0,
        capacity: 48,
    },
    ServiceTemplate {
        name: "Evening Express",
        departure_hour: 18,
        departure_minute: 30,
        speed_factor: 0.9,
        capacity: 55,
    },
];

/// A clock time at a stop, with the number of midnights crossed since the
/// service departed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
    pub day_offset: u32,
}

impl ClockTime {
    pub fn same_day(time: NaiveTime) -> Self {
        Self {
            time,
            day_offset: 0,
        }
    }

    /// This time shifted forward by `minutes`.
    pub fn plus_minutes(&self, minutes: u32) -> Self {
        let (time, wrapped_secs) = self
            .time
            .overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));
        let days = u32::try_from(wrapped_secs / 86_400).unwrap_or(u32::MAX);
        Self {
            time,
            day_offset: self.day_offset.saturating_add(days),
        }
    }

    /// `HH:MM`, suffixed with `+N` when the time falls on a later day.
    pub fn display(&self) -> String {
        let base = format!("{:02}:{:02}", self.time.hour(), self.time.minute());
        if self.day_offset == 0 {
            base
        } else {
            format!("{base}+{}", self.day_offset)
        }
    }
}

fn serialize_hhmm<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// Scheduled passage of a service at one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopTime {
    pub city: String,
    pub time: ClockTime,
}

/// One service run over a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableEntry {
    pub service: String,
    pub stops: Vec<StopTime>,
    pub duration_minutes: u32,
    pub capacity: u32,
}

impl TimetableEntry {
    pub fn departure(&self) -> Option<&StopTime> {
        self.stops.first()
    }

    pub fn arrival(&self) -> Option<&StopTime> {
        self.stops.last()
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

/// All services scheduled on a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timetable {
    pub route_id: String,
    pub entries: Vec<TimetableEntry>,
}

impl Timetable {
    pub fn for_route(route: &Route) -> Self {
        Self::with_services(route, &DEFAULT_SERVICES)
    }

    pub fn with_services(route: &Route, services: &[ServiceTemplate]) -> Self {
        let base_minutes = route.journey().travel_minutes;
        let entries = services
            .iter()
            .map(|service| {
                let duration_minutes =
                    (f64::from(base_minutes) * service.speed_factor).round() as u32;
                let departure = ClockTime::same_day(service.departure());
                let arrival = departure.plus_minutes(duration_minutes);
                TimetableEntry {
                    service: service.name.to_string(),
                    stops: vec![
                        StopTime {
                            city: route.origin.name.clone(),
                            time: departure,
                        },
                        StopTime {
                            city: route.destination.name.clone(),
                            time: arrival,
                        },
                    ],
                    duration_minutes,
                    capacity: service.capacity,
                }
            })
            .collect();

        Self {
            route_id: route.id.clone(),
            entries,
        }
    }
}

/// Arrival time for a `"HH:MM"` departure and a `"2h 30m"` style duration.
pub fn arrival_time(departure: &str, duration: &str) -> Result<String> {
    let time = NaiveTime::parse_from_str(departure.trim(), "%H:%M").map_err(|_| {
        Error::InvalidTime {
            value: departure.to_string(),
        }
    })?;
    let minutes = parse_duration(duration)?;
    Ok(ClockTime::same_day(time).plus_minutes(minutes).display())
}

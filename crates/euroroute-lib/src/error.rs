use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the euroroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither the primary source nor the fallback produced any city.
    #[error("no cities discovered for {country}")]
    NoCitiesDiscovered { country: String },

    /// No city pair fell inside the configured distance window.
    #[error("no routes generated from the discovered cities")]
    NoRoutesGenerated,

    /// Raised when route builder parameters are inconsistent.
    #[error("invalid route configuration: {message}")]
    InvalidRouteConfig { message: String },

    /// Raised when an automation configuration fails validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a city name could not be found among discovered cities.
    #[error("unknown city name: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a route is requested between a city and itself.
    #[error("route endpoints must be distinct cities, got {name} twice")]
    SameEndpoints { name: String },

    /// Raised when a local city fixture cannot be read or decoded.
    #[error("failed to load city source from {path}: {message}")]
    CitySourceLoad { path: PathBuf, message: String },

    /// No suitable cache directory could be resolved for discovery results.
    #[error("failed to resolve cache directories for discovery results")]
    CacheDirsUnavailable,

    /// Raised when a `"2h 30m"` style duration cannot be parsed.
    #[error("invalid duration: {value}")]
    InvalidDuration { value: String },

    /// Raised when an `HH:MM` clock time cannot be parsed.
    #[error("invalid clock time: {value}")]
    InvalidTime { value: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON encoding and decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for spreadsheet writer errors.
    #[error(transparent)]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_city_lists_single_suggestion() {
        let err = Error::UnknownCity {
            name: "Pari".to_string(),
            suggestions: vec!["Paris".to_string()],
        };
        assert_eq!(err.to_string(), "unknown city name: Pari. Did you mean 'Paris'?");
    }

    #[test]
    fn unknown_city_lists_multiple_suggestions() {
        let err = Error::UnknownCity {
            name: "Lyo".to_string(),
            suggestions: vec!["Lyon".to_string(), "Lugo".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown city name: Lyo. Did you mean one of: 'Lyon', 'Lugo'?"
        );
    }

    #[test]
    fn unknown_city_without_suggestions() {
        let err = Error::UnknownCity {
            name: "Atlantis".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown city name: Atlantis");
    }
}

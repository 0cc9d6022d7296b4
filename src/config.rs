use std::path::PathBuf;

use crate::limits::MAX_BOOKING_MINUTES;
use crate::map::SearchStrategy;
use crate::model::Minutes;

pub const LAYOUT_VAR: &str = "KIOSK_LAYOUT";
pub const SEARCH_VAR: &str = "KIOSK_SEARCH";
pub const MAX_BOOKING_VAR: &str = "KIOSK_MAX_BOOKING_MINUTES";
pub const METRICS_PORT_VAR: &str = "KIOSK_METRICS_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue {
                var,
                value,
                expected,
            } => write!(f, "{var}={value:?} is invalid, expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    /// Layout file; `None` uses the built-in library.
    pub layout: Option<PathBuf>,
    pub search: SearchStrategy,
    /// Can only tighten the 120-minute booking limit.
    pub max_booking_minutes: Minutes,
    pub metrics_port: Option<u16>,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            layout: None,
            search: SearchStrategy::DepthFirst,
            max_booking_minutes: MAX_BOOKING_MINUTES,
            metrics_port: None,
        }
    }
}

impl KioskConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup. Unset and empty values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(LAYOUT_VAR) {
            config.layout = Some(PathBuf::from(path));
        }
        if let Some(value) = get(SEARCH_VAR) {
            config.search = match value.trim().to_ascii_lowercase().as_str() {
                "dfs" | "depth-first" => SearchStrategy::DepthFirst,
                "bfs" | "breadth-first" => SearchStrategy::BreadthFirst,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: SEARCH_VAR,
                        value,
                        expected: "dfs or bfs",
                    });
                }
            };
        }
        if let Some(value) = get(MAX_BOOKING_VAR) {
            config.max_booking_minutes = match value.trim().parse::<Minutes>() {
                Ok(m) if m > 0 && m <= MAX_BOOKING_MINUTES => m,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: MAX_BOOKING_VAR,
                        value,
                        expected: "minutes between 1 and 120",
                    });
                }
            };
        }
        if let Some(value) = get(METRICS_PORT_VAR) {
            config.metrics_port = match value.trim().parse::<u16>() {
                Ok(port) if port > 0 => Some(port),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: METRICS_PORT_VAR,
                        value,
                        expected: "a TCP port",
                    });
                }
            };
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = KioskConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, KioskConfig::default());
        assert_eq!(config.max_booking_minutes, 120);
        assert_eq!(config.search, SearchStrategy::DepthFirst);
    }

    #[test]
    fn reads_every_variable() {
        let config = KioskConfig::from_lookup(lookup(&[
            (LAYOUT_VAR, "/srv/kiosk/layout.json"),
            (SEARCH_VAR, "BFS"),
            (MAX_BOOKING_VAR, "90"),
            (METRICS_PORT_VAR, "9100"),
        ]))
        .unwrap();
        assert_eq!(config.layout, Some(PathBuf::from("/srv/kiosk/layout.json")));
        assert_eq!(config.search, SearchStrategy::BreadthFirst);
        assert_eq!(config.max_booking_minutes, 90);
        assert_eq!(config.metrics_port, Some(9100));
    }

    #[test]
    fn booking_limit_can_only_tighten() {
        let at_limit = KioskConfig::from_lookup(lookup(&[(MAX_BOOKING_VAR, "120")])).unwrap();
        assert_eq!(at_limit.max_booking_minutes, MAX_BOOKING_MINUTES);
        let err = KioskConfig::from_lookup(lookup(&[(MAX_BOOKING_VAR, "180")])).unwrap_err();
        assert!(err.to_string().contains("between 1 and 120"));
    }

    #[test]
    fn empty_values_are_unset() {
        let config = KioskConfig::from_lookup(lookup(&[(LAYOUT_VAR, ""), (SEARCH_VAR, "  ")])).unwrap();
        assert_eq!(config, KioskConfig::default());
    }

    #[test]
    fn invalid_values_rejected() {
        for (var, value) in [
            (SEARCH_VAR, "astar"),
            (MAX_BOOKING_VAR, "0"),
            (MAX_BOOKING_VAR, "121"),
            (MAX_BOOKING_VAR, "1440"),
            (MAX_BOOKING_VAR, "two hours"),
            (METRICS_PORT_VAR, "0"),
            (METRICS_PORT_VAR, "70000"),
        ] {
            let err = KioskConfig::from_lookup(lookup(&[(var, value)])).unwrap_err();
            let ConfigError::InvalidValue { var: got, .. } = &err;
            assert_eq!(*got, var, "{value}");
            assert!(err.to_string().contains(var));
        }
    }
}

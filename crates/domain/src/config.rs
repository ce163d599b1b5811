//! Event defaults loaded from environment variables.

/// Default capacity of the location hosting an event.
pub const DEFAULT_LOCATION_MAX_CAPACITY: u32 = 500;

/// Settings used when creating new events.
///
/// Reads from environment variables:
/// - `VEA_LOCATION_MAX_CAPACITY` — capacity of the event location (default: `500`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    pub location_max_capacity: u32,
}

impl EventConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let location_max_capacity = lookup("VEA_LOCATION_MAX_CAPACITY")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_LOCATION_MAX_CAPACITY);

        Self {
            location_max_capacity,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            location_max_capacity: DEFAULT_LOCATION_MAX_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EventConfig::default();
        assert_eq!(config.location_max_capacity, 500);
    }

    #[test]
    fn test_reads_capacity() {
        let config = EventConfig::from_lookup(|key| {
            (key == "VEA_LOCATION_MAX_CAPACITY").then(|| "120".to_string())
        });
        assert_eq!(config.location_max_capacity, 120);
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let expected = std::env::var("VEA_LOCATION_MAX_CAPACITY")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_LOCATION_MAX_CAPACITY);

        let config = EventConfig::from_env();
        assert_eq!(config.location_max_capacity, expected);

        let event = crate::VeaEvent::create_with(&config);
        assert_eq!(event.location_max_capacity(), expected);
    }

    #[test]
    fn test_invalid_capacity_falls_back() {
        let config = EventConfig::from_lookup(|_| Some("lots".to_string()));
        assert_eq!(config, EventConfig::default());

        let config = EventConfig::from_lookup(|_| None);
        assert_eq!(config, EventConfig::default());
    }
}

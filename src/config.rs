use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_HOSPITAL_NAME: &str = "General Hospital";
pub const DEFAULT_APPOINTMENT_LOG: &str = "appointments.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub hospital_name: String,
    pub appointment_log_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            hospital_name: DEFAULT_HOSPITAL_NAME.to_string(),
            appointment_log_path: PathBuf::from(DEFAULT_APPOINTMENT_LOG),
        }
    }
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset or blank keys fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            hospital_name: value("HOSPITAL_NAME").unwrap_or_else(|| {
                warn!("HOSPITAL_NAME not set, using default");
                DEFAULT_HOSPITAL_NAME.to_string()
            }),
            appointment_log_path: value("APPOINTMENT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    warn!("APPOINTMENT_LOG_PATH not set, using {}", DEFAULT_APPOINTMENT_LOG);
                    PathBuf::from(DEFAULT_APPOINTMENT_LOG)
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reads_values_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("HOSPITAL_NAME", "AGU Hospital"),
            ("APPOINTMENT_LOG_PATH", "/var/log/bookings.txt"),
        ]
        .into_iter()
        .collect();

        let config = RegistryConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.hospital_name, "AGU Hospital");
        assert_eq!(config.appointment_log_path, PathBuf::from("/var/log/bookings.txt"));
    }

    #[test]
    fn blank_or_missing_values_use_defaults() {
        let config = RegistryConfig::from_lookup(|key| match key {
            "HOSPITAL_NAME" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config, RegistryConfig::default());
    }
}

//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VitalstreamConfig;
use super::secret::secret_string;
use crate::domain::errors::VitalstreamError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into VitalstreamConfig
/// 4. Applies environment variable overrides (VITALSTREAM_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<VitalstreamConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VitalstreamError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VitalstreamError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VitalstreamConfig = toml::from_str(&contents)
        .map_err(|e| VitalstreamError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VitalstreamError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Referencing an unset variable is
/// an error so a missing credential fails at startup rather than at
/// first publish.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VitalstreamError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the VITALSTREAM_* prefix
///
/// Variables follow the pattern VITALSTREAM_<SECTION>_<KEY>, for
/// example VITALSTREAM_STREAM_EVENT_HUB or VITALSTREAM_PUBLISHER_MAX_EVENTS.
fn apply_env_overrides(config: &mut VitalstreamConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("VITALSTREAM_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("VITALSTREAM_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Data overrides
    if let Ok(val) = std::env::var("VITALSTREAM_DATA_PATIENTS_FILE") {
        config.data.patients_file = val;
    }
    if let Ok(val) = std::env::var("VITALSTREAM_DATA_ENCOUNTERS_FILE") {
        config.data.encounters_file = val;
    }
    if let Ok(val) = std::env::var("VITALSTREAM_DATA_DELIMITER") {
        config.data.delimiter = val;
    }

    // Stream overrides
    if let Ok(val) = std::env::var("VITALSTREAM_STREAM_NAMESPACE") {
        config.stream.namespace = val;
    }
    if let Ok(val) = std::env::var("VITALSTREAM_STREAM_EVENT_HUB") {
        config.stream.event_hub = val;
    }
    if let Ok(val) = std::env::var("VITALSTREAM_STREAM_CONNECTION_STRING") {
        config.stream.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("VITALSTREAM_STREAM_PORT") {
        if let Ok(port) = val.parse() {
            config.stream.port = port;
        }
    }

    // Publisher overrides
    if let Ok(val) = std::env::var("VITALSTREAM_PUBLISHER_MAX_EVENTS") {
        if let Ok(max_events) = val.parse() {
            config.publisher.max_events = max_events;
        }
    }
    if let Ok(val) = std::env::var("VITALSTREAM_PUBLISHER_DELAY_MS") {
        if let Ok(delay_ms) = val.parse() {
            config.publisher.delay_ms = delay_ms;
        }
    }

    // Fault injection overrides
    if let Ok(val) = std::env::var("VITALSTREAM_FAULTS_ENABLED") {
        config.faults.enabled = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VITALSTREAM_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VITALSTREAM_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VITALSTREAM_TEST_VAR", "test_value");
        let input = "connection_string = \"${VITALSTREAM_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "connection_string = \"test_value\"\n");
        std::env::remove_var("VITALSTREAM_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VITALSTREAM_MISSING_VAR");
        let input = "connection_string = \"${VITALSTREAM_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("VITALSTREAM_COMMENTED_VAR");
        let input = "# connection_string = \"${VITALSTREAM_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[data]
patients_file = "./data/patients.csv"
encounters_file = "./data/encounters.csv"

[stream]
namespace = "ns.servicebus.windows.net"
event_hub = "encounters"
connection_string = "Endpoint=sb://ns.servicebus.windows.net/;SharedAccessKeyName=send;SharedAccessKey=abc"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.stream.event_hub, "encounters");
        assert_eq!(config.publisher.max_events, 1000);
        assert_eq!(config.publisher.delay_ms, 1000);
        assert_eq!(config.data.delimiter, ",");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let toml_content = r#"
[application]
log_level = "noisy"

[data]
patients_file = "./data/patients.csv"
encounters_file = "./data/encounters.csv"

[stream]
namespace = "ns.servicebus.windows.net"
event_hub = "encounters"
connection_string = "Endpoint=sb://ns"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}

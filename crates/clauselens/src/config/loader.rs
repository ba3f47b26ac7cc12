use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation {
            message: format!("api.base_url must be an http(s) URL, got '{}'", base_url),
        });
    }

    if config.api.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "api.connect_timeout_secs must be greater than zero".to_string(),
        });
    }
    if config.api.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "api.request_timeout_secs must be greater than zero".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn minimal_config_gets_defaults() {
        let config =
            load_config_from_str(r#"{"api": {"base_url": "https://api.example.com"}}"#).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.api.request_timeout_secs, 300);
        assert!(config.storage.data_directory.is_none());
    }

    #[test]
    fn full_config_round_trips() {
        let config = load_config_from_str(
            r#"{
                "api": {
                    "base_url": "http://localhost:8080",
                    "connect_timeout_secs": 5,
                    "request_timeout_secs": 60
                },
                "storage": {"data_directory": "/tmp/clauselens"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.api.connect_timeout_secs, 5);
        assert_eq!(
            config.storage.data_directory.as_deref(),
            Some(std::path::Path::new("/tmp/clauselens"))
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = load_config_from_str(r#"{"api": {"base_url": "  "}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = load_config_from_str(r#"{"api": {"base_url": "ftp://example.com"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load_config_from_str(
            r#"{"api": {"base_url": "https://api.example.com", "request_timeout_secs": 0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = load_config_from_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseJson(_)));
    }

    #[test]
    fn load_config_reads_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(br#"{"api": {"base_url": "https://api.example.com"}}"#)
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");

        let err = load_config(tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}

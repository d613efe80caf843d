//! Upload configuration.
//!
//! Field names mirror the host build tool's plugin option surface
//! (camelCase on the wire), with defaults matching it: path template
//! `[hash]`, batch width 20, retry multiplier 3.

use cdnlift_backend::Credentials;
use serde::Deserialize;

use crate::error::DeployError;
use crate::select::SelectionFilter;

fn default_path() -> String {
    "[hash]".to_string()
}

fn default_batch() -> usize {
    20
}

fn default_max_retry_times() -> u32 {
    3
}

/// Configuration for one deploy run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    /// Target storage bucket.
    pub bucket: String,
    /// Destination path template; supports `[hash]` and `[hash:N]`.
    #[serde(default = "default_path")]
    pub path: String,
    /// Regex over file names; when set, only matches are uploaded.
    #[serde(default)]
    pub include: Option<String>,
    /// Regex over file names; matches are never uploaded.
    #[serde(default)]
    pub exclude: Option<String>,
    /// Concurrency width of one upload pass. Must be greater than zero.
    #[serde(default = "default_batch")]
    pub batch: usize,
    /// Retry budget multiplier: the pooled budget is
    /// `failures × maxRetryTimes` attempts.
    #[serde(default = "default_max_retry_times")]
    pub max_retry_times: u32,
    /// Backend credentials, passed through to the backend untouched.
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl UploadConfig {
    /// Validates the parts of the configuration that can fail, before any
    /// I/O: batch width and filter patterns.
    pub fn validate(&self) -> Result<SelectionFilter, DeployError> {
        if self.batch == 0 {
            return Err(DeployError::InvalidConfig(
                "batch must be greater than zero".into(),
            ));
        }
        SelectionFilter::new(self.exclude.as_deref(), self.include.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(extra: &str) -> UploadConfig {
        let json = format!(
            r#"{{"bucket": "assets", "accessKey": "ak", "secretKey": "sk"{extra}}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn defaults_match_plugin_surface() {
        let config = base_config("");
        assert_eq!(config.bucket, "assets");
        assert_eq!(config.path, "[hash]");
        assert!(config.include.is_none());
        assert!(config.exclude.is_none());
        assert_eq!(config.batch, 20);
        assert_eq!(config.max_retry_times, 3);
        assert_eq!(config.credentials.access_key, "ak");
    }

    #[test]
    fn camel_case_fields_parse() {
        let config = base_config(
            r#", "path": "cdn/[hash:8]", "maxRetryTimes": 5, "batch": 2, "exclude": "\\.map$""#,
        );
        assert_eq!(config.path, "cdn/[hash:8]");
        assert_eq!(config.max_retry_times, 5);
        assert_eq!(config.batch, 2);
        assert_eq!(config.exclude.as_deref(), Some(r"\.map$"));
    }

    #[test]
    fn zero_batch_is_rejected() {
        let config = base_config(r#", "batch": 0"#);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DeployError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        let config = base_config(r#", "include": "[""#);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DeployError::InvalidPattern(_)));
    }

    #[test]
    fn valid_config_compiles_filter() {
        let config = base_config(r#", "include": "\\.js$", "exclude": "^vendor""#);
        let filter = config.validate().unwrap();
        assert!(filter.keeps("app.js"));
        assert!(!filter.keeps("vendor.js"));
        assert!(!filter.keeps("app.css"));
    }
}

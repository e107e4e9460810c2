//! Configuration loading from the host.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::Configuration;
use crate::host::{HostError, PluginApi};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("host could not provide plugin settings: {0}")]
    Host(#[from] HostError),

    #[error("malformed plugin settings: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load a fresh configuration through the host.
///
/// The returned value is newly allocated and not yet validated.
pub fn load_configuration(api: &dyn PluginApi) -> Result<Configuration, ConfigError> {
    let payload = api.load_plugin_configuration()?;
    decode_configuration(payload)
}

/// Decode the host's generic settings payload.
///
/// A null payload (no settings saved yet) decodes to the zero value.
pub fn decode_configuration(payload: serde_json::Value) -> Result<Configuration, ConfigError> {
    if payload.is_null() {
        return Ok(Configuration::default());
    }
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_null_payload() {
        let config = decode_configuration(serde_json::Value::Null).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_decode_partial_payload() {
        let config = decode_configuration(json!({
            "jitsisettings": { "jitsiembedded": true }
        }))
        .unwrap();
        assert!(config.jitsi_settings.jitsi_embedded);
        assert!(config.jitsi_settings.jitsi_url.is_empty());
    }

    #[test]
    fn test_decode_wrong_type_fails() {
        let err = decode_configuration(json!({
            "jitsisettings": { "jitsilinkvalidtime": "thirty" }
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)));
    }
}

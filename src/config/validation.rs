//! Configuration validation.
//!
//! # Responsibilities
//! - Check the server URL is well formed
//! - Require signing credentials when signed links are enabled
//! - Default the link validity for signed links
//! - Report missing JaaS credentials
//!
//! # Design Decisions
//! - Returns the first violation only, in a fixed order
//! - JaaS credentials are checked leniently: each missing one is logged as a
//!   warning and validation still succeeds
//! - The only mutation is the link validity default

use thiserror::Error;
use url::Url;

use crate::config::schema::{JitsiSettings, DEFAULT_LINK_VALID_TIME};

/// A violated settings invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid server URL '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("missing app ID for JWT mode")]
    MissingJwtAppId,

    #[error("missing app secret for JWT mode")]
    MissingJwtAppSecret,
}

/// A JaaS credential that is expected but absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingJaasCredential {
    ApiKey,
    AppId,
    PrivateKey,
}

impl MissingJaasCredential {
    pub fn description(&self) -> &'static str {
        match self {
            MissingJaasCredential::ApiKey => "no JaaS API key was provided for JaaS",
            MissingJaasCredential::AppId => "no JaaS app ID was provided for JaaS",
            MissingJaasCredential::PrivateKey => "no JaaS private key was provided for JaaS",
        }
    }
}

impl JitsiSettings {
    /// Check all invariants, applying the link validity default in place.
    pub fn is_valid(&mut self) -> Result<(), ValidationError> {
        if !self.jitsi_url.is_empty() {
            Url::parse(&self.jitsi_url).map_err(|source| ValidationError::InvalidServerUrl {
                url: self.jitsi_url.clone(),
                source,
            })?;
        }

        if self.jitsi_jwt {
            if self.jitsi_app_id.is_empty() {
                return Err(ValidationError::MissingJwtAppId);
            }
            if self.jitsi_app_secret.is_empty() {
                return Err(ValidationError::MissingJwtAppSecret);
            }
            if self.jitsi_link_valid_time < 1 {
                self.jitsi_link_valid_time = DEFAULT_LINK_VALID_TIME;
            }
        }

        for missing in self.missing_jaas_credentials() {
            tracing::warn!(credential = ?missing, "{}", missing.description());
        }

        Ok(())
    }

    /// JaaS credentials that are empty while JaaS mode is enabled.
    pub fn missing_jaas_credentials(&self) -> Vec<MissingJaasCredential> {
        if !self.use_jaas {
            return Vec::new();
        }

        let mut missing = Vec::new();
        if self.jaas_api_key.is_empty() {
            missing.push(MissingJaasCredential::ApiKey);
        }
        if self.jaas_app_id.is_empty() {
            missing.push(MissingJaasCredential::AppId);
        }
        if self.jaas_private_key.is_empty() {
            missing.push(MissingJaasCredential::PrivateKey);
        }
        missing
    }
}

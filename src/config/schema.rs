//! Configuration schema definitions.
//!
//! The plugin's settings as the host stores them. Keys follow the lowercase
//! names the admin console writes (`jitsiurl`, `usejaas`, ...). Every field
//! defaults to its zero value so partial payloads deserialize cleanly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Public Jitsi Meet server used when no server URL is configured.
pub const PUBLIC_JITSI_SERVER_URL: &str = "https://meet.jit.si";

/// Public endpoint of the managed Jitsi-as-a-Service offering.
pub const PUBLIC_8X8VC_URL: &str = "https://8x8.vc";

/// Link validity applied to signed links when none (or a non-positive value) is set.
pub const DEFAULT_LINK_VALID_TIME: i64 = 30;

/// Unit of atomic replacement for the plugin settings.
///
/// A published `Configuration` is never mutated. Writers build a new one
/// (or clone the current one) and hand it to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "jitsisettings")]
    pub jitsi_settings: JitsiSettings,
}

impl Configuration {
    pub fn new(jitsi_settings: JitsiSettings) -> Self {
        Self { jitsi_settings }
    }

    /// True for a wrapper that still holds nothing but zero values.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Externally tunable Jitsi settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JitsiSettings {
    /// Self-hosted Jitsi server. Empty means the public server.
    #[serde(rename = "jitsiurl")]
    pub jitsi_url: String,

    /// App ID for signed (JWT) meeting links.
    #[serde(rename = "jitsiappid")]
    pub jitsi_app_id: String,

    /// App secret for signed (JWT) meeting links.
    #[serde(rename = "jitsiappsecret")]
    pub jitsi_app_secret: String,

    /// Room naming scheme, see [`NamingScheme`].
    #[serde(rename = "jitsinamingscheme")]
    pub jitsi_naming_scheme: String,

    #[serde(rename = "jaasappid")]
    pub jaas_app_id: String,

    #[serde(rename = "jaasapikey")]
    pub jaas_api_key: String,

    #[serde(rename = "jaasprivatekey")]
    pub jaas_private_key: String,

    /// Validity of signed links, in minutes.
    #[serde(rename = "jitsilinkvalidtime")]
    pub jitsi_link_valid_time: i64,

    #[serde(rename = "jitsijwt")]
    pub jitsi_jwt: bool,

    #[serde(rename = "jitsiembedded")]
    pub jitsi_embedded: bool,

    #[serde(rename = "jitsicompatibilitymode")]
    pub jitsi_compatibility_mode: bool,

    #[serde(rename = "usejaas")]
    pub use_jaas: bool,
}

impl JitsiSettings {
    /// Configured server URL, or the public Jitsi server when unset.
    pub fn jitsi_url(&self) -> &str {
        if self.jitsi_url.is_empty() {
            PUBLIC_JITSI_SERVER_URL
        } else {
            &self.jitsi_url
        }
    }

    pub fn default_jitsi_url(&self) -> &'static str {
        PUBLIC_JITSI_SERVER_URL
    }

    pub fn jaas_url(&self) -> &'static str {
        PUBLIC_8X8VC_URL
    }

    /// Parsed naming scheme. Empty or unknown values fall back to `words`.
    pub fn naming_scheme(&self) -> NamingScheme {
        self.jitsi_naming_scheme.parse().unwrap_or_default()
    }
}

/// How meeting rooms get their names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingScheme {
    /// Prompt the user for a topic.
    Ask,
    /// Random English words.
    #[default]
    Words,
    /// Team, channel and a random suffix.
    Mattermost,
    Uuid,
}

impl NamingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingScheme::Ask => "ask",
            NamingScheme::Words => "words",
            NamingScheme::Mattermost => "mattermost",
            NamingScheme::Uuid => "uuid",
        }
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a naming scheme string that matches no known scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown naming scheme '{0}'")]
pub struct UnknownNamingScheme(pub String);

impl FromStr for NamingScheme {
    type Err = UnknownNamingScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ask" => Ok(NamingScheme::Ask),
            "words" => Ok(NamingScheme::Words),
            "mattermost" => Ok(NamingScheme::Mattermost),
            "uuid" => Ok(NamingScheme::Uuid),
            _ => Err(UnknownNamingScheme(s.to_string())),
        }
    }
}

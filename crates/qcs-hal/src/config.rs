//! QCS client configuration.
//!
//! Settings and secrets live in two TOML files, by default
//! `~/.qcs/settings.toml` and `~/.qcs/secrets.toml`:
//!
//! ```toml
//! # settings.toml
//! default_profile_name = "default"
//!
//! [profiles.default]
//! api_url = "https://api.qcs.rigetti.com"
//! credentials_name = "default"
//!
//! [profiles.default.applications.pyquil]
//! qvm_url = "http://127.0.0.1:5000"
//! quilc_url = "tcp://127.0.0.1:5555"
//! ```
//!
//! ```toml
//! # secrets.toml
//! [credentials.default.token_payload]
//! access_token = "..."
//! refresh_token = "..."
//! ```
//!
//! Missing files fall back to defaults. `QCS_SETTINGS_FILE_PATH`,
//! `QCS_SECRETS_FILE_PATH` and `QCS_PROFILE_NAME` override the locations
//! and the profile; `QCS_SETTINGS_APPLICATIONS_QVM_URL` and
//! `QCS_SETTINGS_APPLICATIONS_QUILC_URL` override the service URLs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{HalError, HalResult};

/// Default QCS REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.qcs.rigetti.com";
/// Default QVM endpoint.
pub const DEFAULT_QVM_URL: &str = "http://127.0.0.1:5000";
/// Default quilc endpoint.
pub const DEFAULT_QUILC_URL: &str = "tcp://127.0.0.1:5555";
const DEFAULT_PROFILE: &str = "default";

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QcsSettings {
    /// Profile used when none is requested.
    #[serde(default)]
    pub default_profile_name: Option<String>,
    /// Named profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// One settings profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    /// QCS REST API endpoint.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Entry in `secrets.toml` holding this profile's tokens.
    #[serde(default)]
    pub credentials_name: Option<String>,
    /// Per-application service endpoints.
    #[serde(default)]
    pub applications: Applications,
}

/// Application endpoints of a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Applications {
    /// Endpoints used by Quil tooling.
    #[serde(default)]
    pub pyquil: ServiceUrls,
}

/// QVM and quilc endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUrls {
    /// QVM endpoint.
    #[serde(default)]
    pub qvm_url: Option<String>,
    /// quilc endpoint.
    #[serde(default)]
    pub quilc_url: Option<String>,
}

/// Contents of `secrets.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QcsSecrets {
    /// Named credentials.
    #[serde(default)]
    pub credentials: BTreeMap<String, Credential>,
}

/// One stored credential.
#[derive(Clone, Default, Deserialize)]
pub struct Credential {
    /// OAuth token payload.
    #[serde(default)]
    pub token_payload: Option<TokenPayload>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token_payload", &self.token_payload.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// OAuth tokens.
#[derive(Clone, Default, Deserialize)]
pub struct TokenPayload {
    /// Bearer token for API calls.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token used to obtain a new access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Resolved configuration for talking to QCS.
#[derive(Clone)]
pub struct QcsClientConfiguration {
    profile_name: String,
    api_url: String,
    qvm_url: String,
    quilc_url: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for QcsClientConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QcsClientConfiguration")
            .field("profile_name", &self.profile_name)
            .field("api_url", &self.api_url)
            .field("qvm_url", &self.qvm_url)
            .field("quilc_url", &self.quilc_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for QcsClientConfiguration {
    fn default() -> Self {
        Self {
            profile_name: DEFAULT_PROFILE.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            qvm_url: DEFAULT_QVM_URL.to_string(),
            quilc_url: DEFAULT_QUILC_URL.to_string(),
            access_token: None,
        }
    }
}

impl QcsClientConfiguration {
    /// Load from the default locations, honoring environment overrides.
    pub fn load() -> HalResult<Self> {
        let settings_path = env_path("QCS_SETTINGS_FILE_PATH", "settings.toml");
        let secrets_path = env_path("QCS_SECRETS_FILE_PATH", "secrets.toml");
        let profile = std::env::var("QCS_PROFILE_NAME").ok();
        let mut config = Self::load_from(
            settings_path.as_deref(),
            secrets_path.as_deref(),
            profile.as_deref(),
        )?;
        if let Ok(url) = std::env::var("QCS_SETTINGS_APPLICATIONS_QVM_URL") {
            config.qvm_url = url;
        }
        if let Ok(url) = std::env::var("QCS_SETTINGS_APPLICATIONS_QUILC_URL") {
            config.quilc_url = url;
        }
        Ok(config)
    }

    /// Load from explicit files. Missing paths or files mean empty settings.
    pub fn load_from(
        settings_path: Option<&Path>,
        secrets_path: Option<&Path>,
        profile: Option<&str>,
    ) -> HalResult<Self> {
        let settings: QcsSettings = read_toml(settings_path)?;
        let secrets: QcsSecrets = read_toml(secrets_path)?;
        Self::from_parts(&settings, &secrets, profile)
    }

    /// Parse settings and secrets from TOML text.
    pub fn from_toml_strs(settings: &str, secrets: &str, profile: Option<&str>) -> HalResult<Self> {
        let settings: QcsSettings = toml::from_str(settings)
            .map_err(|e| HalError::Configuration(format!("invalid settings: {e}")))?;
        let secrets: QcsSecrets = toml::from_str(secrets)
            .map_err(|e| HalError::Configuration(format!("invalid secrets: {e}")))?;
        Self::from_parts(&settings, &secrets, profile)
    }

    /// Resolve a profile against parsed settings and secrets.
    ///
    /// Requesting a profile that does not exist is an error, except for the
    /// implicit default profile, which falls back to built-in defaults.
    pub fn from_parts(
        settings: &QcsSettings,
        secrets: &QcsSecrets,
        profile: Option<&str>,
    ) -> HalResult<Self> {
        let explicit = profile.is_some();
        let profile_name = profile
            .map(str::to_string)
            .or_else(|| settings.default_profile_name.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let Some(p) = settings.profiles.get(&profile_name) else {
            if explicit && profile_name != DEFAULT_PROFILE {
                return Err(HalError::Configuration(format!(
                    "profile '{profile_name}' not found in settings"
                )));
            }
            debug!("QCS profile '{}' not found, using defaults", profile_name);
            return Ok(Self {
                profile_name,
                ..Self::default()
            });
        };

        let credentials_name = p.credentials_name.as_deref().unwrap_or(DEFAULT_PROFILE);
        let access_token = secrets
            .credentials
            .get(credentials_name)
            .and_then(|c| c.token_payload.as_ref())
            .and_then(|t| t.access_token.clone())
            .filter(|t| !t.is_empty());

        Ok(Self {
            api_url: p.api_url.clone().unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            qvm_url: p
                .applications
                .pyquil
                .qvm_url
                .clone()
                .unwrap_or_else(|| DEFAULT_QVM_URL.to_string()),
            quilc_url: p
                .applications
                .pyquil
                .quilc_url
                .clone()
                .unwrap_or_else(|| DEFAULT_QUILC_URL.to_string()),
            profile_name,
            access_token,
        })
    }

    /// Replace the API URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Replace the access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Selected profile.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// QCS REST API endpoint.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// QVM endpoint.
    pub fn qvm_url(&self) -> &str {
        &self.qvm_url
    }

    /// quilc endpoint.
    pub fn quilc_url(&self) -> &str {
        &self.quilc_url
    }

    /// Bearer token, if credentials are configured.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

fn env_path(var: &str, file_name: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".qcs").join(file_name)))
}

fn read_toml<T: Default + for<'de> Deserialize<'de>>(path: Option<&Path>) -> HalResult<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    if !path.exists() {
        debug!("{} does not exist, using defaults", path.display());
        return Ok(T::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| HalError::Configuration(format!("cannot read {}: {e}", path.display())))?;
    toml::from_str(&text)
        .map_err(|e| HalError::Configuration(format!("invalid {}: {e}", path.display())))
}

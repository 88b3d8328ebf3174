//! Configuration loading and management

use crate::core::validation::ValidationProfile;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Environment variable naming the YAML configuration file
pub const CONFIG_ENV: &str = "STUDENT_RECORDS_CONFIG";

/// Environment variable overriding the bind address
pub const BIND_ENV: &str = "STUDENT_RECORDS_BIND";

/// Which storage backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    InMemory,
    Mysql,
    Mongodb,
}

/// Storage backend settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,

    /// Connection string for mysql/mongodb
    pub url: Option<String>,

    /// MongoDB database name
    pub database: Option<String>,
}

/// How `/students` requests are authenticated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Everything is public
    None,
    /// Cookie-backed server-side sessions
    #[default]
    Session,
    /// HS256 JWT carried in the `x-access-token` header
    Token,
}

/// Authentication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,

    /// HS256 signing secret (token mode)
    pub secret: String,

    /// Lifetime of a session or token
    pub ttl_minutes: i64,

    /// Session cookie name (session mode)
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            secret: "change-me".to_string(),
            ttl_minutes: 30,
            cookie_name: "student_app_session".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address the server listens on
    pub bind: String,

    pub backend: BackendConfig,

    pub auth: AuthConfig,

    /// Either a profile name (`classic`, `orm`, `strict`) or an explicit profile
    #[serde(deserialize_with = "deserialize_profile")]
    pub validation: ValidationProfile,

    /// Student payloads created at startup
    pub seed: Vec<Value>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            backend: BackendConfig::default(),
            auth: AuthConfig::default(),
            validation: ValidationProfile::default(),
            seed: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileSetting {
    Named(String),
    Explicit(ValidationProfile),
}

fn deserialize_profile<'de, D>(deserializer: D) -> std::result::Result<ValidationProfile, D::Error>
where
    D: Deserializer<'de>,
{
    match ProfileSetting::deserialize(deserializer)? {
        ProfileSetting::Named(name) => ValidationProfile::named(&name).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown validation profile '{}'", name))
        }),
        ProfileSetting::Explicit(profile) => Ok(profile),
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Load from the file named by `STUDENT_RECORDS_CONFIG` (defaults when
    /// unset), then apply `STUDENT_RECORDS_BIND`
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.bind = bind;
        }

        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.validation.age.min > self.validation.age.max {
            return Err(anyhow!(
                "validation.age.min ({}) is greater than validation.age.max ({})",
                self.validation.age.min,
                self.validation.age.max
            ));
        }
        if self.auth.ttl_minutes <= 0 {
            return Err(anyhow!("auth.ttl_minutes must be positive"));
        }
        if self.backend.kind != BackendKind::InMemory && self.backend.url.is_none() {
            return Err(anyhow!("backend.url is required for {:?}", self.backend.kind));
        }
        let cookie_name = &self.auth.cookie_name;
        if cookie_name.is_empty()
            || !cookie_name
                .chars()
                .all(|c| c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c))
        {
            return Err(anyhow!("auth.cookie_name {:?} is not a valid cookie name", cookie_name));
        }
        Ok(())
    }
}

//! Service Configuration
//!
//! Loaded once from a YAML file at startup. Durations are written as
//! `<number><unit>` segments (`500ms`, `10s`, `1h30m`), units `ms s m h d`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use platform::password::WorkFactor;
use serde::{Deserialize, Deserializer};
use sso::AuthConfig;

/// Deployment environment; selects the log format and default level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    #[default]
    Local,
    Dev,
    Prod,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Local => "local",
            Env::Dev => "dev",
            Env::Prod => "prod",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: Env,
    pub storage_path: PathBuf,
    #[serde(deserialize_with = "deserialize_duration")]
    pub token_ttl: Duration,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub hasher: Option<HasherConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout: default_timeout(),
        }
    }
}

fn default_port() -> u16 {
    44044
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Argon2id work factor override
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl From<HasherConfig> for WorkFactor {
    fn from(cfg: HasherConfig) -> Self {
        WorkFactor {
            memory_kib: cfg.memory_kib,
            iterations: cfg.iterations,
            parallelism: cfg.parallelism,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_yaml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.storage_path.as_os_str().is_empty() {
            bail!("storage_path must not be empty");
        }
        // Token timestamps are whole seconds
        if self.token_ttl < Duration::from_secs(1) || self.token_ttl.subsec_nanos() != 0 {
            bail!("token_ttl must be a whole number of seconds, at least 1s");
        }
        if self.http.timeout.is_zero() {
            bail!("http.timeout must be positive");
        }
        Ok(())
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            token_ttl: self.token_ttl,
            work_factor: self.hasher.map(WorkFactor::from).unwrap_or_default(),
        }
    }
}

/// Parse `1h`, `90s`, `1h30m`, `250ms`, `7d`.
pub fn parse_duration(input: &str) -> anyhow::Result<Duration> {
    let input = input.trim();
    if input.is_empty() {
        bail!("empty duration");
    }

    let mut total = Duration::ZERO;
    let mut rest = input;

    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            bail!("invalid duration {input:?}: expected a number");
        }
        let value: u64 = rest[..digits]
            .parse()
            .with_context(|| format!("invalid duration {input:?}"))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let segment = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.saturating_mul(60)),
            "h" => Duration::from_secs(value.saturating_mul(3600)),
            "d" => Duration::from_secs(value.saturating_mul(86_400)),
            "" => bail!("invalid duration {input:?}: missing unit"),
            unit => bail!("invalid duration {input:?}: unknown unit {unit:?}"),
        };
        rest = &rest[unit_len..];

        total = total.saturating_add(segment);
    }

    Ok(total)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}

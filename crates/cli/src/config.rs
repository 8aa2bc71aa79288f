// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration
//!
//! Later sources win: built-in defaults, the TOML file named by `--config`,
//! `LULL_*` environment variables, then command-line flags. Clap resolves the
//! last two, so a flag and its variable arrive here as one value.

use bytesize::ByteSize;
use lull_engine::{FileFilter, RuntimeConfig, UploadPolicy};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_FILE_REGEX: &str = r".*\.demo$";
pub const DEFAULT_UPLOAD_TIMEOUT: &str = "5m";
pub const DEFAULT_SIZE_LIMIT: &str = "10MB";
pub const DEFAULT_HTTP_TIMEOUT: &str = "2m";

/// Longest accepted timeout; deadlines are computed as `now + timeout`
pub const MAX_DURATION: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            key,
            reason: reason.to_string(),
        }
    }
}

/// Configuration flags shared by every command
#[derive(Debug, Default, Clone, clap::Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(long, env = "LULL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Folder to watch (not recursive)
    #[arg(long, env = "LULL_WATCH_FOLDER")]
    pub watch_folder: Option<PathBuf>,

    /// Regular expression matched against the full path [default: .*\.demo$]
    #[arg(long, env = "LULL_FILE_REGEX")]
    pub file_regex: Option<String>,

    /// Endpoint that receives the uploads
    #[arg(long, env = "LULL_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// How long a file must stay unmodified before upload [default: 5m]
    #[arg(long, env = "LULL_UPLOAD_TIMEOUT")]
    pub upload_timeout: Option<String>,

    /// Largest archive to upload, 0B for no limit [default: 10MB]
    #[arg(long, env = "LULL_SIZE_LIMIT")]
    pub size_limit: Option<String>,

    /// Per-request HTTP timeout [default: 2m]
    #[arg(long, env = "LULL_HTTP_TIMEOUT")]
    pub http_timeout: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "LULL_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Contents of a configuration file
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub watch_folder: Option<PathBuf>,
    pub file_regex: Option<String>,
    pub webhook_url: Option<String>,
    pub upload_timeout: Option<String>,
    pub size_limit: Option<String>,
    pub http_timeout: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay flags and environment variables on top of the file
    pub fn overlay(self, args: &ConfigArgs) -> Self {
        Self {
            watch_folder: args.watch_folder.clone().or(self.watch_folder),
            file_regex: args.file_regex.clone().or(self.file_regex),
            webhook_url: args.webhook_url.clone().or(self.webhook_url),
            upload_timeout: args.upload_timeout.clone().or(self.upload_timeout),
            size_limit: args.size_limit.clone().or(self.size_limit),
            http_timeout: args.http_timeout.clone().or(self.http_timeout),
            log_file: args.log_file.clone().or(self.log_file),
        }
    }

    /// Apply defaults and check every value
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let watch_folder = self
            .watch_folder
            .ok_or(ConfigError::Missing("watch_folder"))?;
        match std::fs::metadata(&watch_folder) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ConfigError::invalid("watch_folder", "not a directory")),
            Err(e) => return Err(ConfigError::invalid("watch_folder", e)),
        }

        let file_regex = match self.file_regex.as_deref() {
            None => DEFAULT_FILE_REGEX,
            Some("") => ".*",
            Some(pattern) => pattern,
        };
        let file_regex = Regex::new(file_regex).map_err(|e| ConfigError::invalid("file_regex", e))?;

        let webhook_url = self.webhook_url.ok_or(ConfigError::Missing("webhook_url"))?;
        let webhook_url = parse_webhook_url(&webhook_url)?;

        let upload_timeout = parse_duration(
            "upload_timeout",
            self.upload_timeout.as_deref().unwrap_or(DEFAULT_UPLOAD_TIMEOUT),
        )?;
        let http_timeout = parse_duration(
            "http_timeout",
            self.http_timeout.as_deref().unwrap_or(DEFAULT_HTTP_TIMEOUT),
        )?;
        if http_timeout.is_zero() {
            return Err(ConfigError::invalid("http_timeout", "must be greater than zero"));
        }

        let size_limit = parse_size_limit(self.size_limit.as_deref().unwrap_or(DEFAULT_SIZE_LIMIT))?;

        Ok(Settings {
            watch_folder,
            file_regex,
            webhook_url,
            upload_timeout,
            size_limit,
            http_timeout,
            log_file: self.log_file,
        })
    }
}

/// Resolve every source into validated settings
pub fn load(args: &ConfigArgs) -> Result<Settings, ConfigError> {
    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };
    file.overlay(args).validate()
}

fn parse_webhook_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::invalid("webhook_url", e))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(ConfigError::invalid("webhook_url", "missing host")),
        scheme => Err(ConfigError::invalid(
            "webhook_url",
            format!("unsupported scheme {:?}", scheme),
        )),
    }
}

fn parse_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value).map_err(|e| ConfigError::invalid(key, e))?;
    if duration > MAX_DURATION {
        return Err(ConfigError::invalid(
            key,
            format!("must be at most {}", humantime::format_duration(MAX_DURATION)),
        ));
    }
    Ok(duration)
}

/// `None` when the limit is zero
fn parse_size_limit(value: &str) -> Result<Option<u64>, ConfigError> {
    let size: ByteSize = value
        .parse()
        .map_err(|e: String| ConfigError::invalid("size_limit", e))?;
    Ok(Some(size.as_u64()).filter(|&bytes| bytes > 0))
}

/// Validated configuration
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub watch_folder: PathBuf,
    #[serde(serialize_with = "display")]
    pub file_regex: Regex,
    #[serde(serialize_with = "display")]
    pub webhook_url: Url,
    #[serde(with = "humantime_serde")]
    pub upload_timeout: Duration,
    pub size_limit: Option<u64>,
    #[serde(with = "humantime_serde")]
    pub http_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            filter: FileFilter::from_regex(self.file_regex.clone()),
            policy: UploadPolicy {
                webhook_url: self.webhook_url.to_string(),
                quiescence: self.upload_timeout,
                size_limit: self.size_limit,
            },
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "watch_folder:   {}", self.watch_folder.display())?;
        writeln!(f, "file_regex:     {}", self.file_regex)?;
        writeln!(f, "webhook_url:    {}", self.webhook_url)?;
        writeln!(
            f,
            "upload_timeout: {}",
            humantime::format_duration(self.upload_timeout)
        )?;
        match self.size_limit {
            Some(bytes) => writeln!(f, "size_limit:     {}", ByteSize(bytes))?,
            None => writeln!(f, "size_limit:     none")?,
        }
        writeln!(
            f,
            "http_timeout:   {}",
            humantime::format_duration(self.http_timeout)
        )?;
        match &self.log_file {
            Some(path) => write!(f, "log_file:       {}", path.display()),
            None => write!(f, "log_file:       stderr"),
        }
    }
}

fn display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Toolkit configuration at ~/.config/campaignkit/config.toml

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{ToolkitError, ToolkitResult};
use crate::qr::DEFAULT_QR_ENDPOINT;

static DEFAULT_PAGE_URL: &str = "http://localhost:3000/";
static DEFAULT_DOWNLOAD_DIR: &str = ".";

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

fn default_qr_endpoint() -> String {
    DEFAULT_QR_ENDPOINT.to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOWNLOAD_DIR)
}

/// Settings that stand in for what a browser would provide (time zone,
/// page address, downloads folder) plus the QR service endpoint.
///
/// Every key can be overridden with a `CAMPAIGNKIT_`-prefixed environment
/// variable, e.g. `CAMPAIGNKIT_TIMEZONE=Europe/Paris`.
#[derive(Debug, Deserialize, Clone)]
pub struct ToolkitConfig {
    /// IANA zone calendar fields are entered in. System zone when unset.
    pub timezone: Option<String>,

    #[serde(default = "default_page_url")]
    pub page_url: String,

    #[serde(default = "default_qr_endpoint")]
    pub qr_endpoint: String,

    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            page_url: default_page_url(),
            qr_endpoint: default_qr_endpoint(),
            download_dir: default_download_dir(),
        }
    }
}

impl ToolkitConfig {
    pub fn config_path() -> ToolkitResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ToolkitError::Config("Could not determine config directory".into()))?
            .join("campaignkit");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out file on first run.
    pub fn load() -> ToolkitResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (missing file means defaults) plus environment overrides.
    pub fn load_from(path: &Path) -> ToolkitResult<Self> {
        let config: ToolkitConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CAMPAIGNKIT"))
            .build()
            .map_err(|e| ToolkitError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ToolkitError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ToolkitResult<()> {
        let contents = format!(
            "\
# campaignkit configuration

# Time zone calendar dates and times are entered in (defaults to the system zone):
# timezone = \"America/New_York\"

# Address written to the URL property of iCal links:
# page_url = \"{}\"

# QR image service endpoint:
# qr_endpoint = \"{}\"

# Where downloaded QR codes are saved:
# download_dir = \"{}\"
",
            DEFAULT_PAGE_URL, DEFAULT_QR_ENDPOINT, DEFAULT_DOWNLOAD_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ToolkitError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ToolkitError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Configured zone, else the system zone, else UTC.
    pub fn time_zone(&self) -> ToolkitResult<Tz> {
        match self.timezone.as_deref() {
            Some(name) => parse_time_zone(name),
            None => Ok(system_time_zone()),
        }
    }

    /// `download_dir` with `~` expanded.
    pub fn download_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.download_dir.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }
}

pub fn parse_time_zone(name: &str) -> ToolkitResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ToolkitError::UnknownTimeZone(name.to_string()))
}

fn system_time_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(%name, "system time zone not recognized, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            tracing::warn!(error = %e, "could not detect system time zone, using UTC");
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolkitConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.page_url, "http://localhost:3000/");
        assert_eq!(config.qr_endpoint, DEFAULT_QR_ENDPOINT);
        assert_eq!(config.download_dir, PathBuf::from("."));
    }

    #[test]
    fn generated_default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaignkit").join("config.toml");

        ToolkitConfig::create_default_config(&path).unwrap();
        let config = ToolkitConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.page_url, "http://localhost:3000/");
        assert!(config.timezone.is_none());
    }

    #[test]
    fn commented_examples_are_valid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        ToolkitConfig::create_default_config(&path).unwrap();

        let uncommented: String = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .filter_map(|line| line.strip_prefix("# "))
            .filter(|line| line.contains(" = "))
            .map(|line| format!("{line}\n"))
            .collect();
        let config: ToolkitConfig = toml::from_str(&uncommented).unwrap();

        assert_eq!(config.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(config.qr_endpoint, DEFAULT_QR_ENDPOINT);
        assert_eq!(config.download_dir, PathBuf::from("."));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "timezone = \"Europe/Berlin\"\n\
             page_url = \"https://tools.example.com/calendar\"\n\
             qr_endpoint = \"https://qr.example.com/chart\"\n\
             download_dir = \"/tmp/qr\"\n",
        )
        .unwrap();

        let config = ToolkitConfig::load_from(&path).unwrap();

        assert_eq!(config.time_zone().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.page_url, "https://tools.example.com/calendar");
        assert_eq!(config.qr_endpoint, "https://qr.example.com/chart");
        assert_eq!(config.download_path(), PathBuf::from("/tmp/qr"));
    }

    #[test]
    fn unknown_time_zone_is_an_error() {
        let config = ToolkitConfig {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.time_zone(),
            Err(ToolkitError::UnknownTimeZone(_))
        ));
    }

    #[test]
    fn tilde_is_expanded() {
        let config = ToolkitConfig {
            download_dir: PathBuf::from("~/Downloads"),
            ..Default::default()
        };
        assert!(!config.download_path().starts_with("~"));
    }
}

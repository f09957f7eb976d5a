use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

const APP_NAME: &str = "cap-alert";

/// Overrides the stored gazetteer root when set.
pub const GEOCODE_PATH_ENV: &str = "CAP_ALERT_GEOCODE_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub geocode: GeocodeConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Directory holding `kml/` and `gml/` boundary files.
    pub root: Option<PathBuf>,
}

/// Header metadata of generated GeoRSS feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_id")]
    pub id: String,
    #[serde(default = "default_feed_title")]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            id: default_feed_id(),
            title: default_feed_title(),
            name: String::new(),
            link: String::new(),
        }
    }
}

fn default_feed_id() -> String {
    "urn:cap-alert:feed".to_string()
}

fn default_feed_title() -> String {
    "CAP alerts".to_string()
}

impl AppConfig {
    /// Gazetteer root, with the environment taking precedence over the stored value.
    pub fn geocode_root(&self) -> Option<PathBuf> {
        self.geocode_root_with(std::env::var_os(GEOCODE_PATH_ENV))
    }

    fn geocode_root_with(&self, env: Option<OsString>) -> Option<PathBuf> {
        env.filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.geocode.root.clone())
    }
}

pub fn load() -> Result<AppConfig> {
    let cfg: AppConfig = confy::load(APP_NAME, None).context("Failed to load app config")?;
    Ok(cfg)
}

pub fn store(cfg: &AppConfig) -> Result<()> {
    confy::store(APP_NAME, None, cfg).context("Failed to store app config")?;
    Ok(())
}

/// Where [`load`] and [`store`] keep the configuration file.
pub fn path() -> Result<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None)
        .context("Failed to locate app config file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_stored_root() {
        let cfg = AppConfig {
            geocode: GeocodeConfig {
                root: Some(PathBuf::from("/srv/gazetteer")),
            },
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.geocode_root_with(Some(OsString::from("/tmp/geo"))),
            Some(PathBuf::from("/tmp/geo"))
        );
        assert_eq!(
            cfg.geocode_root_with(Some(OsString::new())),
            Some(PathBuf::from("/srv/gazetteer"))
        );
        assert_eq!(
            cfg.geocode_root_with(None),
            Some(PathBuf::from("/srv/gazetteer"))
        );
        assert_eq!(AppConfig::default().geocode_root_with(None), None);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"feed":{"name":"Central Weather"}}"#).unwrap();
        assert_eq!(cfg.geocode.root, None);
        assert_eq!(cfg.feed.name, "Central Weather");
        assert_eq!(cfg.feed.id, default_feed_id());
        assert_eq!(cfg.feed.title, default_feed_title());

        let empty: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AppConfig::default());
    }
}

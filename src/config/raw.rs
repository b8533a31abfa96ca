use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = include_str!("eventdesk.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub store: Option<Store>,
    pub media: Option<Media>,
    pub notifications: Option<Notifications>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Store {
    pub dir: PathBuf,
    #[serde(default)]
    pub pretty: bool,
}

impl Default for Store {
    fn default() -> Self {
        Config::default().store.expect("Store configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Media {
    pub base_url: String,
    pub upload_folder: Option<String>,
    pub root: Option<PathBuf>,
    pub max_file_size: Option<usize>,
}

impl Default for Media {
    fn default() -> Self {
        Config::default().media.expect("Media configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Notifications {
    /// Write outgoing messages as JSON files into this directory.
    pub json_dir: Option<PathBuf>,
    #[serde(default)]
    pub reviewers: Vec<String>,
    #[serde(default)]
    pub notify_on: Vec<NotificationType>,
}

impl Default for Notifications {
    fn default() -> Self {
        Config::default()
            .notifications
            .expect("Notifications configuration")
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    EventSubmitted,
    EditSubmitted,
    EventApproved,
    EditApproved,
}

use anyhow::{anyhow, Result};
use eventdesk_core::{
    content::{MediaPaths, DEFAULT_UPLOAD_FOLDER},
    entities::EmailAddress,
    gateways::notify::NotificationType,
};
use std::{
    collections::HashSet,
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "eventdesk.toml";

const ENV_NAME_STORE_DIR: &str = "EVENTDESK_STORE_DIR";
const ENV_NAME_MEDIA_BASE_URL: &str = "EVENTDESK_MEDIA_BASE_URL";

const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub struct Config {
    pub store: Store,
    pub media: Media,
    pub notifications: Notifications,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_overrides(
            env::var(ENV_NAME_STORE_DIR).ok(),
            env::var(ENV_NAME_MEDIA_BASE_URL).ok(),
        )?;
        Ok(cfg)
    }

    fn apply_overrides(
        &mut self,
        store_dir: Option<String>,
        media_base_url: Option<String>,
    ) -> Result<()> {
        if let Some(dir) = store_dir {
            log::debug!("Use store directory from {ENV_NAME_STORE_DIR}");
            self.store.dir = dir.into();
        }
        if let Some(base_url) = media_base_url {
            log::debug!("Use media base URL from {ENV_NAME_MEDIA_BASE_URL}");
            self.media.paths = MediaPaths::try_new(&base_url, self.media.paths.upload_folder())
                .map_err(|_| anyhow!("Invalid media base URL '{base_url}'"))?;
        }
        Ok(())
    }
}

pub struct Store {
    /// File system directory of the JSON store.
    pub dir: PathBuf,
    pub pretty: bool,
}

pub struct Media {
    pub paths: MediaPaths,
    /// File system directory that is served as the media base URL.
    pub root: PathBuf,
    pub max_file_size: usize,
}

pub struct Notifications {
    pub json_dir: Option<PathBuf>,
    pub reviewers: Vec<EmailAddress>,
    pub notify_on: HashSet<NotificationType>,
}

impl From<raw::NotificationType> for NotificationType {
    fn from(from: raw::NotificationType) -> Self {
        use raw::NotificationType as R;
        match from {
            R::EventSubmitted => Self::EventSubmitted,
            R::EditSubmitted => Self::EditSubmitted,
            R::EventApproved => Self::EventApproved,
            R::EditApproved => Self::EditApproved,
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            store,
            media,
            notifications,
        } = from;

        let raw::Store { dir, pretty } = store.unwrap_or_default();
        let store = Store { dir, pretty };

        let raw::Media {
            base_url,
            upload_folder,
            root,
            max_file_size,
        } = media.unwrap_or_default();
        let upload_folder = upload_folder.unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string());
        let paths = MediaPaths::try_new(&base_url, &upload_folder)
            .map_err(|_| anyhow!("Invalid media base URL '{base_url}'"))?;
        let media = Media {
            paths,
            root: root.unwrap_or_else(|| store.dir.join("public")),
            max_file_size: max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
        };

        let raw::Notifications {
            json_dir,
            reviewers,
            notify_on,
        } = notifications.unwrap_or_default();
        let reviewers = reviewers
            .into_iter()
            .map(|email| {
                email
                    .parse::<EmailAddress>()
                    .map_err(|_| anyhow!("Invalid reviewer email address '{email}'"))
            })
            .collect::<Result<_>>()?;
        let notifications = Notifications {
            json_dir,
            reviewers,
            notify_on: notify_on.into_iter().map(Into::into).collect(),
        };

        Ok(Self {
            store,
            media,
            notifications,
        })
    }
}
